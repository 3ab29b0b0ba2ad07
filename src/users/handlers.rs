use actix_web::{web, HttpResponse};
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::db::models::{ContactUpdate, NewContact, ProfileUpdate};
use crate::error::AppError;
use crate::AppState;

pub async fn get_profile(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state.auth.current_user(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_profile(
    identity: AuthenticatedUser,
    req: web::Json<ProfileUpdate>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .db
        .update_user_profile(identity.user_id, &req)
        .await?;

    info!("Updated profile for user {}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

pub async fn list_contacts(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let contacts = state.db.list_contacts(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(contacts))
}

pub async fn add_contact(
    identity: AuthenticatedUser,
    req: web::Json<NewContact>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let contact = state.db.create_contact(identity.user_id, &req).await?;

    info!("Added emergency contact {} for user {}", contact.id, identity.user_id);
    Ok(HttpResponse::Created().json(contact))
}

/// Updates are scoped by owner: a contact id belonging to another user
/// behaves exactly like a missing one.
pub async fn update_contact(
    identity: AuthenticatedUser,
    path: web::Path<i64>,
    req: web::Json<ContactUpdate>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let contact_id = path.into_inner();
    let contact = state
        .db
        .update_contact(contact_id, identity.user_id, &req)
        .await?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    identity: AuthenticatedUser,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let contact_id = path.into_inner();
    state.db.delete_contact(contact_id, identity.user_id).await?;

    info!("Deleted emergency contact {} for user {}", contact_id, identity.user_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Contact deleted"
    })))
}
