use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::journal_entry;

#[derive(Clone)]
pub struct JournalEntryDao {
    db: DatabaseConnection,
}

impl DaoBase for JournalEntryDao {
    type Entity = journal_entry::Entity;
    type Model = journal_entry::Model;
    type ActiveModel = journal_entry::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
