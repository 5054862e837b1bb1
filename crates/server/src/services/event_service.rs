use chrono::NaiveDate;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{
        dao::{EventDao, OwnedEntity, UserDao},
        entities::event,
    },
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{DateFilter, ResourceService, check_owner, timestamp},
    },
};

#[derive(Debug, Default, Validate)]
pub struct EventPayload {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub user: Option<i32>,
}

impl Payload for EventPayload {
    const FIELDS: &'static [&'static str] = &["title", "description", "date", "user"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.string("title"),
            description: reader.string("description"),
            date: reader.date("date"),
            user: reader.pk("user"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventOutput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub user: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<event::Model> for EventOutput {
    fn from(model: event::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            date: model.date,
            user: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct EventService {
    event_dao: EventDao,
    user_dao: UserDao,
}

impl EventService {
    pub fn new(event_dao: EventDao, user_dao: UserDao) -> Self {
        Self {
            event_dao,
            user_dao,
        }
    }
}

impl CrudService for EventService {
    type Dao = EventDao;

    fn dao(&self) -> &Self::Dao {
        &self.event_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for EventService {
    type Payload = EventPayload;
    type Output = EventOutput;

    fn search_columns(&self) -> Vec<event::Column> {
        vec![event::Column::Title, event::Column::Description]
    }

    fn owner_column(&self) -> Option<event::Column> {
        Some(event::Entity::owner_column())
    }

    fn date_columns(&self) -> Vec<(DateFilter, event::Column)> {
        vec![(DateFilter::Date, event::Column::Date)]
    }

    async fn check_references(
        &self,
        _id: Option<i32>,
        payload: &EventPayload,
    ) -> Result<FieldErrors, AppError> {
        check_owner(&self.user_dao, payload.user).await
    }

    fn apply(active: &mut event::ActiveModel, payload: EventPayload) {
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(description) = payload.description {
            active.description = Set(description);
        }
        if let Some(date) = payload.date {
            active.date = Set(date);
        }
        if let Some(user) = payload.user {
            active.user_id = Set(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, QueryFilter, QueryTrait, entity::prelude::*};
    use serde_json::json;

    use super::EventService;
    use crate::db::dao::DaoContext;
    use crate::db::entities::{event, user};
    use crate::error::AppError;
    use crate::services::{
        payload::WriteMode,
        resource_service::{ListQuery, ResourceService},
    };

    fn service(db: &DatabaseConnection) -> EventService {
        let daos = DaoContext::new(db);
        EventService::new(daos.event(), daos.user())
    }

    fn ts() -> DateTimeWithTimeZone {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2024, 1, 5, 9, 30, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn standup(id: i32) -> event::Model {
        event::Model {
            id,
            title: "Standup".to_string(),
            description: "daily".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date should be valid"),
            user_id: 1,
            created_at: ts(),
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let err = service(&db)
            .create_from(json!({
                "title": "Standup",
                "description": "daily",
                "date": "2024-01-05",
                "user": 42
            }))
            .await
            .expect_err("owner does not exist");

        let AppError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errors.get("user"),
            Some(&["Invalid pk \"42\" - object does not exist.".to_string()][..])
        );
    }

    #[tokio::test]
    async fn retrieve_renders_owner_as_user() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![standup(7)]])
            .into_connection();

        let output = service(&db).retrieve(7).await.expect("row exists");
        let value = serde_json::to_value(output).expect("output serializes");

        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Standup",
                "description": "daily",
                "date": "2024-01-05",
                "user": 1,
                "created_at": "2024-01-05T09:30:00.000000Z"
            })
        );
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found_before_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<event::Model>::new()])
            .into_connection();

        let err = service(&db)
            .update_from(99, json!({"title": ""}), WriteMode::Patch)
            .await
            .expect_err("row does not exist");

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn list_condition_combines_owner_and_search() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let condition = service(&db).list_condition(&ListQuery {
            user: Some(3),
            search: Some("stand%".to_string()),
            ..ListQuery::default()
        });

        let sql = event::Entity::find()
            .filter(condition)
            .build(DatabaseBackend::Sqlite)
            .to_string();

        assert!(sql.contains("\"user_id\" = 3"));
        assert!(sql.contains("\"title\" LIKE"));
        assert!(sql.contains("\"description\" LIKE"));
        assert!(sql.contains("ESCAPE"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn list_condition_filters_event_date_and_creation_day() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let condition = service(&db).list_condition(&ListQuery {
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1),
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..ListQuery::default()
        });

        let sql = event::Entity::find()
            .filter(condition)
            .build(DatabaseBackend::Sqlite)
            .to_string();

        assert!(sql.contains("\"date\" = '2024-01-05'"));
        assert!(sql.contains("\"created_at\" >= '2024-01-01"));
        assert!(sql.contains("\"created_at\" < '2024-01-02"));
        assert!(!sql.contains("2024-02-01"));
    }
}
