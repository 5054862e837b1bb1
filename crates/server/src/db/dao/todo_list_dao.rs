use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::todo_list;

#[derive(Clone)]
pub struct TodoListDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoListDao {
    type Entity = todo_list::Entity;
    type Model = todo_list::Model;
    type ActiveModel = todo_list::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
