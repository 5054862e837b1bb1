use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub username: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(254))")]
    pub email: String,
    #[sea_orm(has_many)]
    pub events: HasMany<super::event::Entity>,
    #[sea_orm(has_many)]
    pub todo_lists: HasMany<super::todo_list::Entity>,
    #[sea_orm(has_many)]
    pub gift_ideas: HasMany<super::gift_idea::Entity>,
    #[sea_orm(has_many)]
    pub journal_entries: HasMany<super::journal_entry::Entity>,
    #[sea_orm(has_many)]
    pub trip_plans: HasMany<super::trip_plan::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
