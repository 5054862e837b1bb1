use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

// start_date and end_date are independent; no ordering is enforced.
#[base_entity(owner = "user_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trip_plans")]
pub struct Model {
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
