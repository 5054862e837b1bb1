use chrono::{SubsecRound, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PrimaryKeyTrait, QueryOrder, Select,
};

use super::base_traits::{HasIdColumn, TimestampedActiveModel, TimestampedEntity};
use super::error::{DaoLayerError, DaoResult};

/// Single-table statements shared by every organizer entity.
///
/// Rows are keyed by an auto-increment `i32` primary key; `created_at` is
/// stamped here on insert and never touched again.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: EntityTrait<
            Model = Self::Model,
            ActiveModel = Self::ActiveModel,
            PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
        > + HasIdColumn
        + TimestampedEntity
        + Send
        + Sync;
    type Model: FromQueryResult + IntoActiveModel<Self::ActiveModel> + Clone + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TimestampedActiveModel
        + Send
        + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn entity_name() -> &'static str {
        std::any::type_name::<Self::Entity>()
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<Self::ActiveModel> + Send,
    ) -> DaoResult<Self::Model> {
        let now = Utc::now().trunc_subsecs(6).fixed_offset();
        let mut active = data.into_active_model();
        active.set_created_at(now);
        Ok(active.insert(self.db()).await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Self::Model> {
        let model = Self::Entity::find_by_id(id).one(self.db()).await?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::entity_name(),
            id,
        })
    }

    async fn exists(&self, id: i32) -> DaoResult<bool> {
        let model = Self::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.is_some())
    }

    async fn find_one<F>(&self, apply: F) -> DaoResult<Option<Self::Model>>
    where
        F: FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    {
        Ok(apply(Self::Entity::find()).one(self.db()).await?)
    }

    async fn find_all<F>(&self, apply: F) -> DaoResult<Vec<Self::Model>>
    where
        F: FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    {
        let select = apply(Self::Entity::find()).order_by_asc(Self::Entity::id_column());
        Ok(select.all(self.db()).await?)
    }

    async fn update<F>(&self, id: i32, apply: F) -> DaoResult<Self::Model>
    where
        F: for<'a> FnOnce(&'a mut Self::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.clone().into_active_model();
        apply(&mut active);
        if !active.is_changed() {
            return Ok(model);
        }

        Ok(active.update(self.db()).await?)
    }

    async fn delete(&self, id: i32) -> DaoResult<i32> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            });
        }

        Ok(id)
    }
}
