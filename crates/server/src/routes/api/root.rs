use axum::{Json, Router, routing::get};
use serde_json::{Map, Value};

use super::RESOURCES;

/// Index of every resource's list path under `prefix`.
pub fn index(prefix: &str) -> Map<String, Value> {
    RESOURCES
        .iter()
        .map(|resource| {
            let path = format!("{prefix}/{resource}/");
            (resource.to_string(), Value::String(path))
        })
        .collect()
}

pub fn router(prefix: &str) -> Router {
    let body = Value::Object(index(prefix));
    let route = get(move || {
        let body = body.clone();
        async move { Json(body) }
    });

    if prefix.is_empty() {
        Router::new().route("/", route)
    } else {
        Router::new()
            .route(prefix, route.clone())
            .route(&format!("{prefix}/"), route)
    }
}
