use sea_orm::EntityTrait;

pub trait HasIdColumn: EntityTrait {
    fn id_column() -> Self::Column;
}

/// Entities owned by a user through a cascading foreign key.
pub trait OwnedEntity: EntityTrait {
    fn owner_column() -> Self::Column;
}

pub trait TimestampedEntity: EntityTrait {
    fn created_at_column() -> Self::Column;
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}
