use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::trip_plan;

#[derive(Clone)]
pub struct TripPlanDao {
    db: DatabaseConnection,
}

impl DaoBase for TripPlanDao {
    type Entity = trip_plan::Entity;
    type Model = trip_plan::Model;
    type ActiveModel = trip_plan::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
