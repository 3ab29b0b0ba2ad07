use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use safenest_server::auth::handlers::{login, logout, me, register};
use safenest_server::{alerts, health_check, users, AppError, AppState, Settings};
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> safenest_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!("Starting server at {}:{}", config.server.host, config.server.port);

    // Initialize application state
    let state = AppState::new(config.clone()).await?;
    let state = web::Data::new(state);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if config.cors.enabled {
            let cors_config = Cors::default();

            // Apply specific CORS rules based on configuration
            let cors_config = if config.cors.allow_any_origin {
                cors_config
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_any_header()
            } else {
                // More restrictive CORS for production use
                cors_config
                    .allowed_origin("http://localhost:3000")
                    .allowed_origin("http://127.0.0.1:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec!["Authorization", "Content-Type"])
                    .supports_credentials()
            };

            // Set max age
            cors_config.max_age(config.cors.max_age as usize)
        } else {
            // CORS disabled - use most restrictive settings
            Cors::default()
        };

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/api/health", web::get().to(health_check))
            .route("/api/auth/register", web::post().to(register))
            .route("/api/auth/login", web::post().to(login))
            .route("/api/auth/logout", web::post().to(logout))
            .route("/api/auth/me", web::get().to(me))
            .route("/api/users/profile", web::get().to(users::handlers::get_profile))
            .route("/api/users/profile", web::put().to(users::handlers::update_profile))
            .route(
                "/api/users/emergency-contacts",
                web::get().to(users::handlers::list_contacts),
            )
            .route(
                "/api/users/emergency-contacts",
                web::post().to(users::handlers::add_contact),
            )
            .route(
                "/api/users/emergency-contacts/{id}",
                web::put().to(users::handlers::update_contact),
            )
            .route(
                "/api/users/emergency-contacts/{id}",
                web::delete().to(users::handlers::delete_contact),
            )
            .route("/api/alerts/sos", web::post().to(alerts::handlers::create_sos))
            .route("/api/alerts/history", web::get().to(alerts::handlers::alert_history))
            .route(
                "/api/alerts/{id}/cancel",
                web::post().to(alerts::handlers::cancel_alert),
            )
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
