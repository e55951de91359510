use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{BookingDao, DaoLayerError, SeatDao},
    db::entities::seat::{self, SEAT_NUMBER_MAX_LEN},
    error::AppError,
    services::{
        crud_service::{CrudErrors, CrudOp, CrudService},
        seat_grid::{SeatRow, default_grid_labels, group_seats},
    },
};

#[derive(Clone)]
pub struct SeatService {
    seat_dao: SeatDao,
    booking_dao: BookingDao,
}

impl SeatService {
    pub fn new(seat_dao: SeatDao, booking_dao: BookingDao) -> Self {
        Self {
            seat_dao,
            booking_dao,
        }
    }

    pub async fn list(&self) -> Result<Vec<seat::Model>, AppError> {
        self.seat_dao
            .list_by_number()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn get(&self, id: &Uuid) -> Result<seat::Model, AppError> {
        CrudService::find_by_id(self, *id).await
    }

    pub async fn create(&self, seat_number: &str) -> Result<seat::Model, AppError> {
        let seat_number = normalize_seat_number(seat_number)?;
        let model = seat::ActiveModel {
            seat_number: Set(seat_number),
            ..Default::default()
        };
        CrudService::create(self, model).await
    }

    pub async fn update(&self, id: &Uuid, seat_number: &str) -> Result<seat::Model, AppError> {
        let seat_number = normalize_seat_number(seat_number)?;
        CrudService::update(self, *id, move |active| {
            active.seat_number = Set(seat_number);
        })
        .await
    }

    /// Deletes the seat and every booking that holds it. Returns the number of bookings removed.
    pub async fn delete(&self, id: &Uuid) -> Result<u64, AppError> {
        let removed = self
            .seat_dao
            .delete_with_bookings(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Delete, err))?;
        tracing::info!(seat_id = %id, bookings_deleted = removed, "seat deleted");
        Ok(removed)
    }

    /// Seeds `rows` x `1..=columns` when the seat table is empty. Returns whether it seeded.
    ///
    /// Concurrent callers seed at most once; the others see a populated table.
    pub async fn ensure_default_grid(&self, rows: &str, columns: u32) -> Result<bool, AppError> {
        if self.seat_dao.count().await? > 0 {
            return Ok(false);
        }

        let labels = default_grid_labels(rows, columns);
        match self.seat_dao.seed_if_empty(&labels).await {
            Ok(Some(created)) => {
                tracing::info!(seats = created.len(), "seeded default seat grid");
                Ok(true)
            }
            Ok(None) => Ok(false),
            // A seat with one of the default labels was created in the meantime.
            Err(DaoLayerError::Duplicate(_)) => Ok(false),
            Err(err) => Err(self.map_error(CrudOp::Create, err)),
        }
    }

    /// The seat grid with the seats already taken for `movie_id` flagged.
    pub async fn grid_for_movie(&self, movie_id: &Uuid) -> Result<Vec<SeatRow>, AppError> {
        let seats = self.list().await?;
        let booked = self.booking_dao.booked_seat_ids(*movie_id).await?;
        Ok(group_seats(&seats, &booked))
    }
}

impl CrudService for SeatService {
    type Dao = SeatDao;

    fn dao(&self) -> &Self::Dao {
        &self.seat_dao
    }

    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Seat create failed",
            find_failed: "Seat lookup failed",
            not_found: "Seat not found",
            update_failed: "Seat update failed",
            delete_failed: "Seat delete failed",
            duplicate: "Seat number already exists.",
        }
    }
}

fn normalize_seat_number(raw: &str) -> Result<String, AppError> {
    let seat_number = raw.trim();
    let len = seat_number.chars().count();
    if len == 0 || len > SEAT_NUMBER_MAX_LEN {
        return Err(AppError::bad_request(format!(
            "seat_number must be between 1 and {SEAT_NUMBER_MAX_LEN} characters"
        )));
    }
    Ok(seat_number.to_string())
}
