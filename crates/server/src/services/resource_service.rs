use chrono::{Days, NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelBehavior, ColumnTrait, Condition, EntityTrait,
    sea_query::{Expr, ExprTrait, LikeExpr},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db::dao::{DaoBase, TimestampedEntity, UserDao},
    error::{AppError, FieldErrors},
    services::{
        crud_service::{CrudService, escape_like},
        payload::{Payload, WriteMode, missing_pk_message},
    },
};

pub type ResourceModel<S> = <<S as CrudService>::Dao as DaoBase>::Model;
pub type ResourceActiveModel<S> = <<S as CrudService>::Dao as DaoBase>::ActiveModel;
pub type ResourceColumn<S> =
    <<<S as CrudService>::Dao as DaoBase>::Entity as EntityTrait>::Column;

/// Optional list filters; unknown query parameters are ignored, as are date
/// filters on resources without that column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub user: Option<i32>,
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Calendar day in UTC.
    pub created_at: Option<NaiveDate>,
}

/// Date columns a resource can be filtered on by exact day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Date,
    StartDate,
    EndDate,
}

impl ListQuery {
    pub fn date_for(&self, filter: DateFilter) -> Option<NaiveDate> {
        match filter {
            DateFilter::Date => self.date,
            DateFilter::StartDate => self.start_date,
            DateFilter::EndDate => self.end_date,
        }
    }
}

/// One flat organizer resource: how its payload is validated and written, and
/// how its rows are filtered and rendered.
#[async_trait::async_trait]
pub trait ResourceService: CrudService + Clone + Send + Sync + 'static {
    type Payload: Payload;
    type Output: Serialize + From<ResourceModel<Self>> + Send + 'static;

    fn search_columns(&self) -> Vec<ResourceColumn<Self>>;

    fn owner_column(&self) -> Option<ResourceColumn<Self>> {
        None
    }

    fn date_columns(&self) -> Vec<(DateFilter, ResourceColumn<Self>)> {
        Vec::new()
    }

    /// Checks that need the database: uniqueness and owner existence. `id` is
    /// the row being updated, excluded from uniqueness checks.
    async fn check_references(
        &self,
        id: Option<i32>,
        payload: &Self::Payload,
    ) -> Result<FieldErrors, AppError>;

    /// Copies every supplied payload field onto the active model.
    fn apply(active: &mut ResourceActiveModel<Self>, payload: Self::Payload);

    fn list_condition(&self, query: &ListQuery) -> Condition {
        let mut condition = Condition::all();

        if let (Some(owner), Some(column)) = (query.user, self.owner_column()) {
            condition = condition.add(ColumnTrait::eq(&column, owner));
        }

        for (filter, column) in self.date_columns() {
            if let Some(day) = query.date_for(filter) {
                condition = condition.add(ColumnTrait::eq(&column, day));
            }
        }

        if let Some(day) = query.created_at {
            let column =
                <<Self::Dao as DaoBase>::Entity as TimestampedEntity>::created_at_column();
            let start = day.and_time(NaiveTime::MIN).and_utc().fixed_offset();
            condition = condition.add(ColumnTrait::gte(&column, start));
            if let Some(next) = day.checked_add_days(Days::new(1)) {
                let end = next.and_time(NaiveTime::MIN).and_utc().fixed_offset();
                condition = condition.add(ColumnTrait::lt(&column, end));
            }
        }

        let term = query.search.as_deref().map(str::trim).unwrap_or_default();
        if !term.is_empty() {
            let pattern = format!("%{}%", escape_like(term));
            let mut any = Condition::any();
            for column in self.search_columns() {
                any = any.add(
                    Expr::col(column).like(LikeExpr::new(pattern.clone()).escape('\\')),
                );
            }
            condition = condition.add(any);
        }

        condition
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Self::Output>, AppError> {
        let condition = self.list_condition(&query);
        let rows = self.find_all(condition).await?;
        Ok(rows.into_iter().map(Self::Output::from).collect())
    }

    async fn retrieve(&self, id: i32) -> Result<Self::Output, AppError> {
        Ok(self.find_by_id(id).await?.into())
    }

    async fn create_from(&self, body: Value) -> Result<Self::Output, AppError> {
        let payload = Self::Payload::from_json(&body, WriteMode::Create)?;
        self.check_references(None, &payload).await?.into_result()?;

        let mut active = <ResourceActiveModel<Self> as ActiveModelBehavior>::new();
        Self::apply(&mut active, payload);
        Ok(self.create(active).await?.into())
    }

    async fn update_from(
        &self,
        id: i32,
        body: Value,
        mode: WriteMode,
    ) -> Result<Self::Output, AppError> {
        if !self.exists(id).await? {
            return Err(AppError::not_found(self.errors().not_found));
        }

        let payload = Self::Payload::from_json(&body, mode)?;
        self.check_references(Some(id), &payload).await?.into_result()?;

        let model = self
            .update(id, move |active| Self::apply(active, payload))
            .await?;
        Ok(model.into())
    }

    async fn remove(&self, id: i32) -> Result<(), AppError> {
        self.delete(id).await
    }
}

/// Owner reference check shared by every resource that belongs to a user.
pub async fn check_owner(users: &UserDao, owner: Option<i32>) -> Result<FieldErrors, AppError> {
    let mut errors = FieldErrors::new();
    let Some(owner) = owner else {
        return Ok(errors);
    };

    let exists = users.exists(owner).await.map_err(|err| {
        AppError::internal_with_source(
            "Owner lookup failed. Please check the logs for more details",
            err,
        )
    })?;
    if !exists {
        errors.add("user", missing_pk_message(owner));
    }
    Ok(errors)
}

pub(crate) mod timestamp {
    use chrono::SecondsFormat;
    use sea_orm::prelude::DateTimeWithTimeZone;
    use serde::Serializer;

    /// RFC 3339 with microseconds, `Z` for UTC.
    pub fn serialize<S: Serializer>(
        value: &DateTimeWithTimeZone,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}
