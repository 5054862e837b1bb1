use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{
        event_service::EventService, gift_idea_service::GiftIdeaService,
        journal_entry_service::JournalEntryService, todo_list_service::TodoListService,
        trip_plan_service::TripPlanService, user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn event(&self) -> EventService {
        EventService::new(self.daos.event(), self.daos.user())
    }

    pub fn todo_list(&self) -> TodoListService {
        TodoListService::new(self.daos.todo_list(), self.daos.user())
    }

    pub fn gift_idea(&self) -> GiftIdeaService {
        GiftIdeaService::new(self.daos.gift_idea(), self.daos.user())
    }

    pub fn journal_entry(&self) -> JournalEntryService {
        JournalEntryService::new(self.daos.journal_entry(), self.daos.user())
    }

    pub fn trip_plan(&self) -> TripPlanService {
        TripPlanService::new(self.daos.trip_plan(), self.daos.user())
    }
}
