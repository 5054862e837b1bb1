use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

/// Config that never touches the process environment.
pub fn test_config() -> AppConfig {
    AppConfig::default()
}

pub fn mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Sqlite).into_connection()
}

/// Full application over a database that only answers what the test queued.
pub fn mock_app(db: DatabaseConnection) -> Router {
    app(AppState::new(test_config(), db))
}

/// Full application over a fresh in-memory SQLite database with the schema
/// synced and foreign keys enforced.
pub async fn sqlite_app() -> anyhow::Result<Router> {
    let mut cfg = test_config();
    cfg.database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_idle: 1,
        ..DatabaseConfig::default()
    };

    let db = connection::connect(&cfg.database).await?;
    Ok(app(AppState::new(cfg, db)))
}
