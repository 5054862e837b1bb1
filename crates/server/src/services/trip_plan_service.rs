use chrono::NaiveDate;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{
        dao::{OwnedEntity, TripPlanDao, UserDao},
        entities::trip_plan,
    },
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{DateFilter, ResourceService, check_owner, timestamp},
    },
};

/// `end_date` may precede `start_date`; the dates are stored as given.
#[derive(Debug, Default, Validate)]
pub struct TripPlanPayload {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user: Option<i32>,
}

impl Payload for TripPlanPayload {
    const FIELDS: &'static [&'static str] =
        &["title", "description", "start_date", "end_date", "user"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.string("title"),
            description: reader.string("description"),
            start_date: reader.date("start_date"),
            end_date: reader.date("end_date"),
            user: reader.pk("user"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripPlanOutput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<trip_plan::Model> for TripPlanOutput {
    fn from(model: trip_plan::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            user: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct TripPlanService {
    trip_plan_dao: TripPlanDao,
    user_dao: UserDao,
}

impl TripPlanService {
    pub fn new(trip_plan_dao: TripPlanDao, user_dao: UserDao) -> Self {
        Self {
            trip_plan_dao,
            user_dao,
        }
    }
}

impl CrudService for TripPlanService {
    type Dao = TripPlanDao;

    fn dao(&self) -> &Self::Dao {
        &self.trip_plan_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for TripPlanService {
    type Payload = TripPlanPayload;
    type Output = TripPlanOutput;

    fn search_columns(&self) -> Vec<trip_plan::Column> {
        vec![trip_plan::Column::Title, trip_plan::Column::Description]
    }

    fn owner_column(&self) -> Option<trip_plan::Column> {
        Some(trip_plan::Entity::owner_column())
    }

    fn date_columns(&self) -> Vec<(DateFilter, trip_plan::Column)> {
        vec![
            (DateFilter::StartDate, trip_plan::Column::StartDate),
            (DateFilter::EndDate, trip_plan::Column::EndDate),
        ]
    }

    async fn check_references(
        &self,
        _id: Option<i32>,
        payload: &TripPlanPayload,
    ) -> Result<FieldErrors, AppError> {
        check_owner(&self.user_dao, payload.user).await
    }

    fn apply(active: &mut trip_plan::ActiveModel, payload: TripPlanPayload) {
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(description) = payload.description {
            active.description = Set(description);
        }
        if let Some(start_date) = payload.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = payload.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(user) = payload.user {
            active.user_id = Set(user);
        }
    }
}
