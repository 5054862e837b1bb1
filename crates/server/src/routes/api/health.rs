use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::{error::AppError, state::AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    state.db.ping().await.map_err(|err| {
        tracing::error!(error = %err, "database ping failed");
        AppError::unavailable("Database unavailable")
    })?;
    Ok(Json(json!({"status": "ok"})))
}
