use sea_orm::{Condition, DbErr, EntityTrait, IntoActiveModel, QueryFilter, SqlErr};

use crate::db::dao::{DaoBase, DaoLayerError};
use crate::error::{AppError, NON_FIELD_ERRORS};

type CrudEntity<D> = <D as DaoBase>::Entity;
type CrudModel<D> = <CrudEntity<D> as EntityTrait>::Model;
type CrudActiveModel<D> = <CrudEntity<D> as EntityTrait>::ActiveModel;

#[derive(Clone, Copy)]
pub struct CrudErrors {
    pub create_failed: &'static str,
    pub find_failed: &'static str,
    pub not_found: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Default for CrudErrors {
    fn default() -> Self {
        Self {
            create_failed: "Create failed",
            find_failed: "Find failed",
            not_found: "Not found.",
            update_failed: "Update failed",
            delete_failed: "Delete failed",
        }
    }
}

#[derive(Clone, Copy)]
pub enum CrudOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

#[async_trait::async_trait]
pub trait CrudService {
    type Dao: DaoBase;

    fn dao(&self) -> &Self::Dao;

    fn errors(&self) -> CrudErrors {
        CrudErrors::default()
    }

    /// Constraint violations that slip past the pre-write checks (two writers
    /// racing for the same username, an owner deleted mid-request) surface as
    /// validation errors rather than 500s.
    fn map_error(&self, op: CrudOp, err: DaoLayerError) -> AppError {
        let errors = self.errors();
        match err {
            DaoLayerError::Db(db_err) => {
                if let Some(err) = constraint_error(&db_err) {
                    return err;
                }
                let context = match op {
                    CrudOp::Create => errors.create_failed,
                    CrudOp::Find | CrudOp::List => errors.find_failed,
                    CrudOp::Update => errors.update_failed,
                    CrudOp::Delete => errors.delete_failed,
                };
                let message = format!("{context}. Please check the logs for more details");
                AppError::internal_with_source(message, db_err)
            }
            DaoLayerError::NotFound { .. } => AppError::not_found(errors.not_found),
        }
    }

    async fn create<T>(&self, data: T) -> Result<CrudModel<Self::Dao>, AppError>
    where
        T: IntoActiveModel<CrudActiveModel<Self::Dao>> + Send,
    {
        self.dao()
            .create(data)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))
    }

    async fn find_by_id(&self, id: i32) -> Result<CrudModel<Self::Dao>, AppError> {
        self.dao()
            .find_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.dao()
            .exists(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))
    }

    async fn find_all(&self, condition: Condition) -> Result<Vec<CrudModel<Self::Dao>>, AppError> {
        self.dao()
            .find_all(move |select| select.filter(condition))
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    async fn update<F>(&self, id: i32, apply: F) -> Result<CrudModel<Self::Dao>, AppError>
    where
        F: for<'a> FnOnce(&'a mut CrudActiveModel<Self::Dao>) + Send,
    {
        self.dao()
            .update(id, apply)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.dao()
            .delete(id)
            .await
            .map(|_| ())
            .map_err(|err| self.map_error(CrudOp::Delete, err))
    }
}

fn constraint_error(err: &DbErr) -> Option<AppError> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(detail) => {
            tracing::warn!(%detail, "unique constraint rejected write");
            Some(AppError::validation(
                NON_FIELD_ERRORS,
                "A record with these values already exists.",
            ))
        }
        SqlErr::ForeignKeyConstraintViolation(detail) => {
            tracing::warn!(%detail, "foreign key constraint rejected write");
            Some(AppError::validation(
                "user",
                "Referenced object does not exist.",
            ))
        }
        _ => None,
    }
}

pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr,
    };

    use crate::db::dao::{DaoBase, TodoListDao};
    use crate::db::entities::todo_list;
    use crate::error::AppError;

    use super::{CrudService, escape_like};

    #[derive(Clone)]
    struct TodoLists {
        dao: TodoListDao,
    }

    impl CrudService for TodoLists {
        type Dao = TodoListDao;

        fn dao(&self) -> &Self::Dao {
            &self.dao
        }
    }

    fn service(db: DatabaseConnection) -> TodoLists {
        TodoLists {
            dao: TodoListDao::new(&db),
        }
    }

    #[tokio::test]
    async fn missing_rows_map_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<todo_list::Model>::new()])
            .into_connection();

        let err = service(db)
            .find_by_id(12)
            .await
            .expect_err("row does not exist");

        assert!(matches!(err, AppError::NotFound(message) if message == "Not found."));
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = service(db).delete(5).await.expect_err("nothing deleted");

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn storage_failures_become_internal_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal("gone".to_string()))])
            .into_connection();

        let err = service(db)
            .find_all(sea_orm::Condition::all())
            .await
            .expect_err("query failed");

        match err {
            AppError::Internal { message, source } => {
                assert!(message.starts_with("Find failed"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
