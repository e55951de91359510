use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::booking;
use crate::db::entities::prelude::Booking;

#[derive(Clone)]
pub struct BookingDao {
    db: DatabaseConnection,
}

impl DaoBase for BookingDao {
    type Entity = Booking;
    type Model = booking::Model;
    type ActiveModel = booking::ActiveModel;
    type Column = booking::Column;

    const ENTITY_NAME: &'static str = "booking";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl BookingDao {
    /// Newest first; `user_id` narrows the list to one user's bookings.
    pub async fn list(&self, user_id: Option<Uuid>) -> DaoResult<Vec<booking::Model>> {
        self.find_all(None, move |query| match user_id {
            Some(user_id) => query.filter(booking::Column::UserId.eq(user_id)),
            None => query,
        })
        .await
    }

    pub async fn find_pair_with<C>(
        &self,
        conn: &C,
        movie_id: Uuid,
        seat_id: Uuid,
    ) -> DaoResult<Option<booking::Model>>
    where
        C: ConnectionTrait + Sync,
    {
        Ok(Booking::find()
            .filter(booking::Column::MovieId.eq(movie_id))
            .filter(booking::Column::SeatId.eq(seat_id))
            .one(conn)
            .await?)
    }

    pub async fn exists_with<C>(&self, conn: &C, movie_id: Uuid, seat_id: Uuid) -> DaoResult<bool>
    where
        C: ConnectionTrait + Sync,
    {
        let count = Booking::find()
            .filter(booking::Column::MovieId.eq(movie_id))
            .filter(booking::Column::SeatId.eq(seat_id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert_with<C>(
        &self,
        conn: &C,
        movie_id: Uuid,
        seat_id: Uuid,
        user_id: Uuid,
    ) -> DaoResult<booking::Model>
    where
        C: ConnectionTrait + Sync,
    {
        let model = booking::ActiveModel {
            movie_id: Set(movie_id),
            seat_id: Set(seat_id),
            user_id: Set(user_id),
            ..Default::default()
        };
        self.create_with(conn, model).await
    }

    /// Seat ids already taken for `movie_id`.
    pub async fn booked_seat_ids(&self, movie_id: Uuid) -> DaoResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> = Booking::find()
            .select_only()
            .column(booking::Column::SeatId)
            .filter(booking::Column::MovieId.eq(movie_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }
}
