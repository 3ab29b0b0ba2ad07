pub mod alerts;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, AuthenticatedUser};
pub use db::{DbOperations, EmergencyContact, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers. Constructed once at
/// startup and injected via web::Data; there is no ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db: DbOperations,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(5),
        )
        .await?;

        let auth = Arc::new(AuthService::new(
            db.clone(),
            config.auth.jwt_secret.clone(),
            config.auth.token_expiry_hours,
        ));

        Ok(Self {
            config: Arc::new(config),
            db,
            auth,
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.db.pool().close().await;
        Ok(())
    }
}
