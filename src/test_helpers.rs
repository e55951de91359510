use std::sync::Arc;

use axum::{Router, middleware};

use crate::{
    config::{AppConfig, AuthConfig, DatabaseConfig},
    db::connection,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Defaults plus a private in-memory SQLite database.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
        ..AppConfig::default()
    }
}

pub async fn sqlite_state() -> anyhow::Result<Arc<AppState>> {
    let cfg = test_config();
    let db = connection::connect(&cfg.database).await?;
    Ok(AppState::new(cfg, db))
}

/// The full router with the same error layers `main` installs.
pub fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(router(state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}
