use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SosRequest {
    #[serde(rename = "type", default = "default_alert_type")]
    pub alert_type: String,
    #[serde(default)]
    pub location: serde_json::Value,
    #[serde(default)]
    pub message: String,
}

fn default_alert_type() -> String {
    "emergency".to_string()
}

/// Simulated SOS dispatch: resolves the caller and their contact list,
/// then acknowledges without persisting an alert or notifying anyone.
pub async fn create_sos(
    identity: AuthenticatedUser,
    req: web::Json<SosRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let user = state.auth.current_user(identity.user_id).await?;
    let contacts = state.db.list_contacts(identity.user_id).await?;

    info!(
        "SOS alert ({}) from user {} would notify {} contacts: {}",
        req.alert_type,
        user.id,
        contacts.len(),
        req.message
    );

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": format!("SOS alert ({}) created successfully", req.alert_type),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "location": req.location,
        "user": user,
        "contacts_notified": contacts.len(),
    })))
}

/// Fixed sample history; there is no alert persistence.
pub async fn alert_history(_identity: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let sample_alerts = json!([
        {
            "id": 1,
            "type": "emergency",
            "status": "resolved",
            "created_at": "2023-05-01T14:30:00Z",
            "location": {"lat": 37.7749, "lng": -122.4194}
        },
        {
            "id": 2,
            "type": "medical",
            "status": "resolved",
            "created_at": "2023-04-15T09:45:00Z",
            "location": {"lat": 37.7749, "lng": -122.4194}
        }
    ]);

    Ok(HttpResponse::Ok().json(sample_alerts))
}

pub async fn cancel_alert(
    _identity: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let alert_id = path.into_inner();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Alert {} cancelled successfully", alert_id),
    })))
}
