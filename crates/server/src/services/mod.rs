pub mod context;
pub mod crud_service;
pub mod event_service;
pub mod gift_idea_service;
pub mod journal_entry_service;
pub mod payload;
pub mod resource_service;
pub mod todo_list_service;
pub mod trip_plan_service;
pub mod user_service;

pub use context::ServiceContext;
pub use payload::WriteMode;
pub use resource_service::{DateFilter, ListQuery, ResourceService};
