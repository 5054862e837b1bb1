use std::sync::Arc;

use axum::Router;

use crate::{routes::resource_router::ResourceRouter, services::ServiceContext, state::AppState};

use super::{health, root};

/// Path segment of every resource, in API root order.
pub const RESOURCES: [&str; 6] = [
    "users",
    "events",
    "todo-lists",
    "gift-ideas",
    "journal-entries",
    "trip-plans",
];

pub fn router(state: Arc<AppState>) -> Router {
    let prefix = state.config.general.api_prefix.as_str();
    let services = ServiceContext::from_state(state.as_ref());
    let path = |segment: &str| format!("{prefix}/{segment}");

    Router::new()
        .merge(ResourceRouter::new(services.user(), path("users")).router())
        .merge(ResourceRouter::new(services.event(), path("events")).router())
        .merge(ResourceRouter::new(services.todo_list(), path("todo-lists")).router())
        .merge(ResourceRouter::new(services.gift_idea(), path("gift-ideas")).router())
        .merge(ResourceRouter::new(services.journal_entry(), path("journal-entries")).router())
        .merge(ResourceRouter::new(services.trip_plan(), path("trip-plans")).router())
        .merge(root::router(prefix))
        .merge(health::router(state.clone()))
}
