use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{dao::UserDao, entities::user},
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{ResourceService, timestamp},
    },
};

#[derive(Debug, Default, Validate)]
pub struct UserPayload {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
}

impl Payload for UserPayload {
    const FIELDS: &'static [&'static str] = &["username", "email"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            username: reader.string("username"),
            email: reader.string("email"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserOutput {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    fn lookup_failed(err: crate::db::dao::DaoLayerError) -> AppError {
        AppError::internal_with_source(
            "User lookup failed. Please check the logs for more details",
            err,
        )
    }
}

impl CrudService for UserService {
    type Dao = UserDao;

    fn dao(&self) -> &Self::Dao {
        &self.user_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for UserService {
    type Payload = UserPayload;
    type Output = UserOutput;

    fn search_columns(&self) -> Vec<user::Column> {
        vec![user::Column::Username, user::Column::Email]
    }

    async fn check_references(
        &self,
        id: Option<i32>,
        payload: &UserPayload,
    ) -> Result<FieldErrors, AppError> {
        let mut errors = FieldErrors::new();

        if let Some(username) = payload.username.as_deref() {
            let existing = self
                .user_dao
                .find_by_username(username)
                .await
                .map_err(Self::lookup_failed)?;
            if existing.is_some_and(|row| Some(row.id) != id) {
                errors.add("username", "user with this username already exists.");
            }
        }

        if let Some(email) = payload.email.as_deref() {
            let existing = self
                .user_dao
                .find_by_email(email)
                .await
                .map_err(Self::lookup_failed)?;
            if existing.is_some_and(|row| Some(row.id) != id) {
                errors.add("email", "user with this email already exists.");
            }
        }

        Ok(errors)
    }

    fn apply(active: &mut user::ActiveModel, payload: UserPayload) {
        if let Some(username) = payload.username {
            active.username = Set(username);
        }
        if let Some(email) = payload.email {
            active.email = Set(email);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    use super::UserService;
    use crate::db::dao::DaoContext;
    use crate::db::entities::user;
    use crate::error::AppError;
    use crate::services::resource_service::ResourceService;

    fn user_model(id: i32, username: &str, email: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: FixedOffset::east_opt(0)
                .expect("offset should be valid")
                .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .single()
                .expect("timestamp should be valid"),
        }
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_reported_per_field() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![user_model(1, "ana", "other@example.com")]])
            .append_query_results([vec![user_model(2, "bob", "ana@example.com")]])
            .into_connection();
        let service = UserService::new(DaoContext::new(&db).user());

        let err = service
            .create_from(json!({"username": "ana", "email": "ana@example.com"}))
            .await
            .expect_err("both values are taken");

        let AppError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errors.get("username"),
            Some(&["user with this username already exists.".to_string()][..])
        );
        assert_eq!(
            errors.get("email"),
            Some(&["user with this email already exists.".to_string()][..])
        );
    }

    #[tokio::test]
    async fn update_ignores_the_row_being_updated() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![user_model(3, "ana", "ana@example.com")]])
            .into_connection();
        let service = UserService::new(DaoContext::new(&db).user());

        let errors = service
            .check_references(
                Some(3),
                &super::UserPayload {
                    username: Some("ana".to_string()),
                    email: None,
                },
            )
            .await
            .expect("lookup succeeds");

        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn invalid_email_fails_before_touching_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let service = UserService::new(DaoContext::new(&db).user());

        let err = service
            .create_from(json!({"username": "ana", "email": "nope"}))
            .await
            .expect_err("email is malformed");

        let AppError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errors.get("email"),
            Some(&["Enter a valid email address.".to_string()][..])
        );
    }
}
