use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{
        dao::{OwnedEntity, TodoListDao, UserDao},
        entities::todo_list,
    },
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{ResourceService, check_owner, timestamp},
    },
};

#[derive(Debug, Default, Validate)]
pub struct TodoListPayload {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    pub user: Option<i32>,
}

impl Payload for TodoListPayload {
    const FIELDS: &'static [&'static str] = &["title", "user"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.string("title"),
            user: reader.pk("user"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoListOutput {
    pub id: i32,
    pub title: String,
    pub user: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<todo_list::Model> for TodoListOutput {
    fn from(model: todo_list::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            user: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct TodoListService {
    todo_list_dao: TodoListDao,
    user_dao: UserDao,
}

impl TodoListService {
    pub fn new(todo_list_dao: TodoListDao, user_dao: UserDao) -> Self {
        Self {
            todo_list_dao,
            user_dao,
        }
    }
}

impl CrudService for TodoListService {
    type Dao = TodoListDao;

    fn dao(&self) -> &Self::Dao {
        &self.todo_list_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for TodoListService {
    type Payload = TodoListPayload;
    type Output = TodoListOutput;

    fn search_columns(&self) -> Vec<todo_list::Column> {
        vec![todo_list::Column::Title]
    }

    fn owner_column(&self) -> Option<todo_list::Column> {
        Some(todo_list::Entity::owner_column())
    }

    async fn check_references(
        &self,
        _id: Option<i32>,
        payload: &TodoListPayload,
    ) -> Result<FieldErrors, AppError> {
        check_owner(&self.user_dao, payload.user).await
    }

    fn apply(active: &mut todo_list::ActiveModel, payload: TodoListPayload) {
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(user) = payload.user {
            active.user_id = Set(user);
        }
    }
}
