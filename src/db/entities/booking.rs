use record_derive::record;
use sea_orm::entity::prelude::*;

/// One seat held for one movie by one user.
///
/// `(movie_id, seat_id)` is a composite unique key: the same seat can be booked for
/// different movies, never twice for the same one.
#[record(created_at = "booking_date", no_updated_at)]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(indexed, unique_key = "movie_seat")]
    pub movie_id: Uuid,
    #[sea_orm(indexed, unique_key = "movie_seat")]
    pub seat_id: Uuid,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "movie_id", to = "id", on_delete = "Cascade")]
    pub movie: HasOne<super::movie::Entity>,
    #[sea_orm(belongs_to, from = "seat_id", to = "id", on_delete = "Cascade")]
    pub seat: HasOne<super::seat::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
