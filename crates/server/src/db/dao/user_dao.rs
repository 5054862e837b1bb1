use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult};
use crate::db::entities::user;

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = user::Entity;
    type Model = user::Model;
    type ActiveModel = user::ActiveModel;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<user::Model>> {
        let username = username.to_string();
        self.find_one(move |query| query.filter(user::Column::Username.eq(username)))
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let email = email.to_string();
        self.find_one(move |query| query.filter(user::Column::Email.eq(email)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Set};

    use super::UserDao;
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::user;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn user_model(id: i32, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            created_at: ts(),
        }
    }

    #[tokio::test]
    async fn find_by_username_returns_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_model(3, "ada")]])
            .into_connection();
        let dao = UserDao::new(&db);

        let found = dao
            .find_by_username("ada")
            .await
            .expect("query should succeed");

        assert_eq!(found.map(|user| user.id), Some(3));
    }

    #[tokio::test]
    async fn find_by_email_returns_none_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let dao = UserDao::new(&db);

        let found = dao
            .find_by_email("nobody@example.com")
            .await
            .expect("query should succeed");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_model(1, "ada")]])
            .into_connection();
        let dao = UserDao::new(&db);

        let created = dao
            .create(user::ActiveModel {
                username: Set("ada".to_string()),
                email: Set("ada@example.com".to_string()),
                ..Default::default()
            })
            .await
            .expect("insert should succeed");

        assert_eq!(created.id, 1);
        assert_eq!(created.username, "ada");
    }

    #[tokio::test]
    async fn find_by_id_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let dao = UserDao::new(&db);

        let err = dao.find_by_id(42).await.expect_err("lookup should fail");

        assert!(matches!(err, DaoLayerError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn exists_is_false_for_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let dao = UserDao::new(&db);

        assert!(!dao.exists(9).await.expect("query should succeed"));
    }

    #[tokio::test]
    async fn update_without_changes_skips_the_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_model(5, "ada")]])
            .into_connection();
        let dao = UserDao::new(&db);

        let model = dao
            .update(5, |_active| {})
            .await
            .expect("update should succeed");

        assert_eq!(model, user_model(5, "ada"));
    }

    #[tokio::test]
    async fn delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = UserDao::new(&db);

        let err = dao.delete(7).await.expect_err("delete should fail");

        assert!(matches!(err, DaoLayerError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn database_errors_are_wrapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("select failed".to_string())])
            .into_connection();
        let dao = UserDao::new(&db);

        let err = dao
            .find_all(|query| query)
            .await
            .expect_err("query should fail");

        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
