use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::gift_idea;

#[derive(Clone)]
pub struct GiftIdeaDao {
    db: DatabaseConnection,
}

impl DaoBase for GiftIdeaDao {
    type Entity = gift_idea::Entity;
    type Model = gift_idea::Model;
    type ActiveModel = gift_idea::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
