use actix_web::web;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection};
use std::sync::Arc;
use uuid::Uuid;

use safenest_server::config::{AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, Settings};
use safenest_server::{AppState, AuthService, DbOperations};

pub struct TestApp {
    pub state: web::Data<AppState>,
    admin_url: String,
    db_name: String,
}

/// Create an isolated per-run database and an AppState wired to it.
/// Returns None (and the test should bail out) when TEST_DATABASE_URL
/// is not set, so the suite can run without a Postgres instance.
pub async fn spawn_app() -> Option<TestApp> {
    let admin_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
            return None;
        }
    };

    let db_name = format!("safenest_test_{}", Uuid::new_v4().simple());
    let base = admin_url
        .rsplit_once('/')
        .expect("TEST_DATABASE_URL must contain a database path")
        .0;
    let test_url = format!("{}/{}", base, db_name);

    let mut admin_conn = PgConnection::connect(&admin_url)
        .await
        .expect("Failed to connect to admin database");
    admin_conn
        .execute(&*format!("CREATE DATABASE \"{}\"", db_name))
        .await
        .expect("Failed to create test database");
    admin_conn.close().await.ok();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: 1,
        },
        database: DatabaseConfig {
            url: test_url,
            max_connections: 2,
        },
        auth: AuthConfig {
            jwt_secret: "test_secret".to_string(),
            token_expiry_hours: 24,
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            max_age: 3600,
        },
    };

    let db = DbOperations::new(Arc::new(pool));
    let auth = Arc::new(AuthService::new(
        db.clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_expiry_hours,
    ));
    let state = web::Data::new(AppState {
        config: Arc::new(config),
        db,
        auth,
    });

    Some(TestApp {
        state,
        admin_url,
        db_name,
    })
}

impl TestApp {
    pub async fn cleanup(self) {
        self.state.db.pool().close().await;

        let mut admin_conn = PgConnection::connect(&self.admin_url)
            .await
            .expect("Failed to connect to admin database for cleanup");
        admin_conn
            .execute(&*format!(
                "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
                self.db_name
            ))
            .await
            .ok();
        admin_conn
            .execute(&*format!("DROP DATABASE IF EXISTS \"{}\"", self.db_name))
            .await
            .expect("Failed to drop test database during cleanup");
        admin_conn.close().await.ok();
    }
}
