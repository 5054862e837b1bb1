use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::event;

#[derive(Clone)]
pub struct EventDao {
    db: DatabaseConnection,
}

impl DaoBase for EventDao {
    type Entity = event::Entity;
    type Model = event::Model;
    type ActiveModel = event::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
