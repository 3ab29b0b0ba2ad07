use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::{AppError, AuthError};
use crate::AppState;

/// Identity resolved from the bearer token of the current request.
///
/// Handlers take this as a parameter instead of re-parsing headers;
/// extraction fails with 401 before the handler body runs when the
/// token is missing, malformed, tampered or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::AuthError(AuthError::Unauthorized))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::AuthError(AuthError::Unauthorized))?;

    let user_id = state.auth.user_id_from_token(token)?;

    Ok(AuthenticatedUser { user_id })
}
