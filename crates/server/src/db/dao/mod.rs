pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod event_dao;
pub mod gift_idea_dao;
pub mod journal_entry_dao;
pub mod todo_list_dao;
pub mod trip_plan_dao;
pub mod user_dao;

pub use base::DaoBase;
pub use base_traits::{HasIdColumn, OwnedEntity, TimestampedActiveModel, TimestampedEntity};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use event_dao::EventDao;
pub use gift_idea_dao::GiftIdeaDao;
pub use journal_entry_dao::JournalEntryDao;
pub use todo_list_dao::TodoListDao;
pub use trip_plan_dao::TripPlanDao;
pub use user_dao::UserDao;
