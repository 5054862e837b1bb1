use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{
        dao::{JournalEntryDao, OwnedEntity, UserDao},
        entities::journal_entry,
    },
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{ResourceService, check_owner, timestamp},
    },
};

#[derive(Debug, Default, Validate)]
pub struct JournalEntryPayload {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub content: Option<String>,
    pub user: Option<i32>,
}

impl Payload for JournalEntryPayload {
    const FIELDS: &'static [&'static str] = &["title", "content", "user"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.string("title"),
            content: reader.string("content"),
            user: reader.pk("user"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JournalEntryOutput {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<journal_entry::Model> for JournalEntryOutput {
    fn from(model: journal_entry::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            user: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct JournalEntryService {
    journal_entry_dao: JournalEntryDao,
    user_dao: UserDao,
}

impl JournalEntryService {
    pub fn new(journal_entry_dao: JournalEntryDao, user_dao: UserDao) -> Self {
        Self {
            journal_entry_dao,
            user_dao,
        }
    }
}

impl CrudService for JournalEntryService {
    type Dao = JournalEntryDao;

    fn dao(&self) -> &Self::Dao {
        &self.journal_entry_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for JournalEntryService {
    type Payload = JournalEntryPayload;
    type Output = JournalEntryOutput;

    fn search_columns(&self) -> Vec<journal_entry::Column> {
        vec![journal_entry::Column::Title, journal_entry::Column::Content]
    }

    fn owner_column(&self) -> Option<journal_entry::Column> {
        Some(journal_entry::Entity::owner_column())
    }

    async fn check_references(
        &self,
        _id: Option<i32>,
        payload: &JournalEntryPayload,
    ) -> Result<FieldErrors, AppError> {
        check_owner(&self.user_dao, payload.user).await
    }

    fn apply(active: &mut journal_entry::ActiveModel, payload: JournalEntryPayload) {
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(content) = payload.content {
            active.content = Set(content);
        }
        if let Some(user) = payload.user {
            active.user_id = Set(user);
        }
    }
}
