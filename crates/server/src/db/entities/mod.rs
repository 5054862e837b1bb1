#[allow(unused_imports)]
pub mod prelude {
    pub use super::event::Entity as Event;
    pub use super::gift_idea::Entity as GiftIdea;
    pub use super::journal_entry::Entity as JournalEntry;
    pub use super::todo_list::Entity as TodoList;
    pub use super::trip_plan::Entity as TripPlan;
    pub use super::user::Entity as User;
}

pub mod event;
pub mod gift_idea;
pub mod journal_entry;
pub mod todo_list;
pub mod trip_plan;
pub mod user;
