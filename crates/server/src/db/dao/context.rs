use sea_orm::DatabaseConnection;

use super::{
    DaoBase, EventDao, GiftIdeaDao, JournalEntryDao, TodoListDao, TripPlanDao, UserDao,
};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn event(&self) -> EventDao {
        DaoBase::new(&self.db)
    }

    pub fn todo_list(&self) -> TodoListDao {
        DaoBase::new(&self.db)
    }

    pub fn gift_idea(&self) -> GiftIdeaDao {
        DaoBase::new(&self.db)
    }

    pub fn journal_entry(&self) -> JournalEntryDao {
        DaoBase::new(&self.db)
    }

    pub fn trip_plan(&self) -> TripPlanDao {
        DaoBase::new(&self.db)
    }
}
