use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Column that orders records oldest-to-newest when no explicit order is requested.
pub trait HasCreatedAtColumn: sea_orm::EntityTrait {
    fn created_at_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);

    /// No-op for records that never track modification time.
    fn set_updated_at(&mut self, _ts: DateTimeWithTimeZone) {}
}
