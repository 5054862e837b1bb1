use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use validator::Validate;

use crate::{
    db::{
        dao::{GiftIdeaDao, OwnedEntity, UserDao},
        entities::gift_idea,
    },
    error::{AppError, FieldErrors},
    services::{
        crud_service::CrudService,
        payload::{FieldReader, Payload, not_blank},
        resource_service::{ResourceService, check_owner, timestamp},
    },
};

#[derive(Debug, Default, Validate)]
pub struct GiftIdeaPayload {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub user: Option<i32>,
}

impl Payload for GiftIdeaPayload {
    const FIELDS: &'static [&'static str] = &["title", "description", "user"];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.string("title"),
            description: reader.string("description"),
            user: reader.pk("user"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GiftIdeaOutput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub user: i32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTimeWithTimeZone,
}

impl From<gift_idea::Model> for GiftIdeaOutput {
    fn from(model: gift_idea::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            user: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct GiftIdeaService {
    gift_idea_dao: GiftIdeaDao,
    user_dao: UserDao,
}

impl GiftIdeaService {
    pub fn new(gift_idea_dao: GiftIdeaDao, user_dao: UserDao) -> Self {
        Self {
            gift_idea_dao,
            user_dao,
        }
    }
}

impl CrudService for GiftIdeaService {
    type Dao = GiftIdeaDao;

    fn dao(&self) -> &Self::Dao {
        &self.gift_idea_dao
    }
}

#[async_trait::async_trait]
impl ResourceService for GiftIdeaService {
    type Payload = GiftIdeaPayload;
    type Output = GiftIdeaOutput;

    fn search_columns(&self) -> Vec<gift_idea::Column> {
        vec![gift_idea::Column::Title, gift_idea::Column::Description]
    }

    fn owner_column(&self) -> Option<gift_idea::Column> {
        Some(gift_idea::Entity::owner_column())
    }

    async fn check_references(
        &self,
        _id: Option<i32>,
        payload: &GiftIdeaPayload,
    ) -> Result<FieldErrors, AppError> {
        check_owner(&self.user_dao, payload.user).await
    }

    fn apply(active: &mut gift_idea::ActiveModel, payload: GiftIdeaPayload) {
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(description) = payload.description {
            active.description = Set(description);
        }
        if let Some(user) = payload.user {
            active.user_id = Set(user);
        }
    }
}
