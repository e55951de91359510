use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Booking, Seat};
use crate::db::entities::{booking, seat};

#[derive(Clone)]
pub struct SeatDao {
    db: DatabaseConnection,
}

impl DaoBase for SeatDao {
    type Entity = Seat;
    type Model = seat::Model;
    type ActiveModel = seat::ActiveModel;
    type Column = seat::Column;

    const ENTITY_NAME: &'static str = "seat";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SeatDao {
    pub async fn list_by_number(&self) -> DaoResult<Vec<seat::Model>> {
        self.find_all(Some((seat::Column::SeatNumber, Order::Asc)), |query| query)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> DaoResult<Vec<seat::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Seat::find()
            .filter(seat::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(seat::Column::SeatNumber)
            .all(&self.db)
            .await?)
    }

    pub async fn count(&self) -> DaoResult<u64> {
        Ok(Seat::find().count(&self.db).await?)
    }

    /// Inserts one seat per label, but only while the seat table is still empty.
    ///
    /// The emptiness check and the inserts share one write transaction. Returns `None`
    /// when seats already exist.
    pub async fn seed_if_empty(&self, numbers: &[String]) -> DaoResult<Option<Vec<seat::Model>>> {
        let txn = self.begin_write().await?;
        if Seat::find().count(&txn).await? > 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let mut created = Vec::with_capacity(numbers.len());
        for number in numbers {
            let model = seat::ActiveModel {
                seat_number: Set(number.clone()),
                ..Default::default()
            };
            created.push(self.create_with(&txn, model).await?);
        }
        txn.commit().await?;
        Ok(Some(created))
    }

    /// Removes the seat along with every booking that references it.
    pub async fn delete_with_bookings(&self, id: &Uuid) -> DaoResult<u64> {
        let txn = self.begin_write().await?;
        self.find_by_id_with(&txn, *id).await?;
        let bookings = Booking::delete_many()
            .filter(booking::Column::SeatId.eq(*id))
            .exec(&txn)
            .await?
            .rows_affected;
        self.delete_with(&txn, *id).await?;
        txn.commit().await?;
        Ok(bookings)
    }
}
