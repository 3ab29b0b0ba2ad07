use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::AuthenticatedUser;
use crate::db::models::User;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub password: String,
    pub address: Option<String>,
    pub meta: Option<RegisterMeta>,
}

/// Optional client-supplied extras. Emergency contacts are kept as raw
/// JSON so one malformed entry cannot reject the whole registration.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterMeta {
    #[serde(default)]
    pub emergency_contacts: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);

    let contacts = req
        .meta
        .as_ref()
        .map(|m| m.emergency_contacts.as_slice())
        .unwrap_or(&[]);

    match state
        .auth
        .register(
            &req.email,
            &req.username,
            &req.full_name,
            &req.phone,
            req.address.clone(),
            &req.password,
            contacts,
        )
        .await
    {
        Ok(_) => {
            info!("Registration successful for email: {}", req.email);
            Ok(HttpResponse::Created().json(serde_json::json!({
                "message": "User registered successfully"
            })))
        }
        Err(e) => {
            error!("Registration failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    match state.auth.authenticate(&req.email, &req.password).await {
        Ok((access_token, user)) => {
            info!("Login successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(LoginResponse { access_token, user }))
        }
        Err(e) => {
            error!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

/// Stateless logout: the token stays valid until its natural expiry, the
/// client discards it. Requires a valid token so an anonymous call still
/// gets 401.
pub async fn logout(_identity: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

pub async fn me(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state.auth.current_user(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
