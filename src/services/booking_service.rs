use std::collections::{HashMap, HashSet};

use sea_orm::{Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    db::dao::{BookingDao, DaoBase, DaoContext, DaoLayerError, MovieDao, SeatDao, UserDao},
    db::entities::{booking, movie, seat, user},
    error::AppError,
    services::crud_service::{CrudErrors, CrudOp, CrudService},
};

pub const SEAT_ALREADY_BOOKED: &str = "Seat already booked for this movie.";
pub const MOVIE_ID_REQUIRED: &str = "movie_id is required.";
pub const INVALID_MOVIE_ID: &str = "Invalid movie_id.";
pub const SEAT_ID_REQUIRED: &str = "seat_id is required.";
pub const INVALID_SEAT_ID: &str = "Invalid seat_id.";

/// A booking together with the records it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: booking::Model,
    pub movie: movie::Model,
    pub seat: seat::Model,
    pub user: user::Model,
}

impl std::fmt::Display for BookingDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.user.username, self.movie.title, self.seat.seat_number
        )
    }
}

/// Raw identifiers as submitted; each is resolved and validated by the service.
#[derive(Debug, Clone, Default)]
pub struct BookingInput {
    pub movie_id: Option<String>,
    pub seat_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuickBookOutcome {
    Booked(Box<BookingDetail>),
    MissingMovie,
    AlreadyBooked,
}

#[derive(Clone)]
pub struct BookingService {
    booking_dao: BookingDao,
    movie_dao: MovieDao,
    seat_dao: SeatDao,
    user_dao: UserDao,
}

impl BookingService {
    pub fn new(daos: &DaoContext) -> Self {
        Self {
            booking_dao: daos.booking(),
            movie_dao: daos.movie(),
            seat_dao: daos.seat(),
            user_dao: daos.user(),
        }
    }

    /// Newest first, optionally restricted to one user.
    pub async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<BookingDetail>, AppError> {
        let bookings = self
            .booking_dao
            .list(user_id)
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))?;
        self.with_details(bookings).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<BookingDetail, AppError> {
        let booking = CrudService::find_by_id(self, *id).await?;
        self.detail(booking).await
    }

    /// Books every seat in `seat_ids` for the movie, silently skipping seats already taken.
    ///
    /// Returns the labels of the seats booked by this call, in request order.
    pub async fn book_seats(
        &self,
        movie_id: &Uuid,
        seat_ids: &[Uuid],
        actor: &user::Model,
    ) -> Result<Vec<String>, AppError> {
        let movie = self.movie_dao.find_by_id(*movie_id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Movie not found"),
            other => other.into(),
        })?;

        let mut seen = HashSet::new();
        let requested: Vec<Uuid> = seat_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
        let seats: HashMap<Uuid, seat::Model> = self
            .seat_dao
            .find_by_ids(&requested)
            .await?
            .into_iter()
            .map(|seat| (seat.id, seat))
            .collect();
        if requested.iter().any(|id| !seats.contains_key(id)) {
            return Err(AppError::not_found("Seat not found"));
        }

        let txn = self.booking_dao.begin_write().await?;
        let mut booked = Vec::new();
        for seat_id in &requested {
            if self.booking_dao.exists_with(&txn, movie.id, *seat_id).await? {
                continue;
            }

            // Savepoint, so a lost race on the unique key skips only this seat.
            let savepoint = txn.begin().await?;
            match self
                .booking_dao
                .insert_with(&savepoint, movie.id, *seat_id, actor.id)
                .await
            {
                Ok(_) => {
                    savepoint.commit().await?;
                    booked.push(seats[seat_id].seat_number.clone());
                }
                Err(DaoLayerError::Duplicate(_)) => savepoint.rollback().await?,
                Err(err) => return Err(err.into()),
            }
        }
        txn.commit().await?;

        tracing::info!(
            movie_id = %movie.id,
            user_id = %actor.id,
            requested = requested.len(),
            booked = booked.len(),
            "seats booked"
        );
        Ok(booked)
    }

    /// Books one seat, rejecting the request if the seat is already taken for that movie.
    pub async fn book_seat(
        &self,
        seat_id: &Uuid,
        movie_id: Option<&str>,
        actor: &user::Model,
    ) -> Result<BookingDetail, AppError> {
        let seat = self.seat_dao.find_by_id(*seat_id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Seat not found"),
            other => other.into(),
        })?;
        let movie = self.resolve_movie(movie_id).await?;
        self.insert_checked(movie, seat, actor.clone()).await
    }

    pub async fn create(
        &self,
        input: BookingInput,
        actor: &user::Model,
    ) -> Result<BookingDetail, AppError> {
        let movie = self.resolve_movie(input.movie_id.as_deref()).await?;
        let seat = self.resolve_seat(input.seat_id.as_deref()).await?;
        self.insert_checked(movie, seat, actor.clone()).await
    }

    /// Moves a booking to another movie and/or seat.
    ///
    /// With `partial` unset both identifiers are required; otherwise absent ones are kept.
    pub async fn update(
        &self,
        id: &Uuid,
        input: BookingInput,
        partial: bool,
    ) -> Result<BookingDetail, AppError> {
        let current = CrudService::find_by_id(self, *id).await?;

        let movie = match (input.movie_id.as_deref(), partial) {
            (None, true) => None,
            (raw, _) => Some(self.resolve_movie(raw).await?),
        };
        let seat = match (input.seat_id.as_deref(), partial) {
            (None, true) => None,
            (raw, _) => Some(self.resolve_seat(raw).await?),
        };
        let movie_id = movie.as_ref().map_or(current.movie_id, |movie| movie.id);
        let seat_id = seat.as_ref().map_or(current.seat_id, |seat| seat.id);

        let txn = self.booking_dao.begin_write().await?;
        if let Some(existing) = self
            .booking_dao
            .find_pair_with(&txn, movie_id, seat_id)
            .await?
            && existing.id != current.id
        {
            return Err(AppError::bad_request(SEAT_ALREADY_BOOKED));
        }
        let updated = self
            .booking_dao
            .update_with(&txn, current.id, move |active| {
                active.movie_id = Set(movie_id);
                active.seat_id = Set(seat_id);
            })
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))?;
        txn.commit().await?;

        self.detail(updated).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        CrudService::delete(self, *id).await
    }

    /// One-click booking from the seat list page.
    ///
    /// A missing movie or an already-taken seat is an outcome, not an error; unknown ids are 404.
    pub async fn quick_book(
        &self,
        seat_id: &Uuid,
        movie_id: Option<&str>,
        actor: &user::Model,
    ) -> Result<QuickBookOutcome, AppError> {
        let seat = self.seat_dao.find_by_id(*seat_id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Seat not found"),
            other => other.into(),
        })?;
        let Some(raw) = movie_id.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(QuickBookOutcome::MissingMovie);
        };
        let movie_id =
            Uuid::parse_str(raw).map_err(|_| AppError::not_found("Movie not found"))?;
        let movie = self.movie_dao.find_by_id(movie_id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Movie not found"),
            other => other.into(),
        })?;

        match self.insert_checked(movie, seat, actor.clone()).await {
            Ok(detail) => Ok(QuickBookOutcome::Booked(Box::new(detail))),
            Err(AppError::BadRequest(message)) if message == SEAT_ALREADY_BOOKED => {
                Ok(QuickBookOutcome::AlreadyBooked)
            }
            Err(err) => Err(err),
        }
    }

    async fn resolve_movie(&self, raw: Option<&str>) -> Result<movie::Model, AppError> {
        let id = parse_id(raw, MOVIE_ID_REQUIRED, INVALID_MOVIE_ID)?;
        self.movie_dao.find_by_id(id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::bad_request(INVALID_MOVIE_ID),
            other => other.into(),
        })
    }

    async fn resolve_seat(&self, raw: Option<&str>) -> Result<seat::Model, AppError> {
        let id = parse_id(raw, SEAT_ID_REQUIRED, INVALID_SEAT_ID)?;
        self.seat_dao.find_by_id(id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::bad_request(INVALID_SEAT_ID),
            other => other.into(),
        })
    }

    /// Check-then-insert in one transaction; the unique key catches concurrent inserts.
    async fn insert_checked(
        &self,
        movie: movie::Model,
        seat: seat::Model,
        user: user::Model,
    ) -> Result<BookingDetail, AppError> {
        let txn = self.booking_dao.begin_write().await?;
        if self
            .booking_dao
            .exists_with(&txn, movie.id, seat.id)
            .await?
        {
            return Err(AppError::bad_request(SEAT_ALREADY_BOOKED));
        }
        let booking = self
            .booking_dao
            .insert_with(&txn, movie.id, seat.id, user.id)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))?;
        txn.commit().await?;

        tracing::info!(
            booking_id = %booking.id,
            movie_id = %movie.id,
            seat = %seat.seat_number,
            user = %user.username,
            "seat booked"
        );
        Ok(BookingDetail {
            booking,
            movie,
            seat,
            user,
        })
    }

    async fn detail(&self, booking: booking::Model) -> Result<BookingDetail, AppError> {
        self.with_details(vec![booking])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Booking references a missing record"))
    }

    async fn with_details(
        &self,
        bookings: Vec<booking::Model>,
    ) -> Result<Vec<BookingDetail>, AppError> {
        let movie_ids = unique_ids(bookings.iter().map(|booking| booking.movie_id));
        let seat_ids = unique_ids(bookings.iter().map(|booking| booking.seat_id));
        let user_ids = unique_ids(bookings.iter().map(|booking| booking.user_id));

        let movies: HashMap<Uuid, movie::Model> = self
            .movie_dao
            .find_by_ids(&movie_ids)
            .await?
            .into_iter()
            .map(|movie| (movie.id, movie))
            .collect();
        let seats: HashMap<Uuid, seat::Model> = self
            .seat_dao
            .find_by_ids(&seat_ids)
            .await?
            .into_iter()
            .map(|seat| (seat.id, seat))
            .collect();
        let users: HashMap<Uuid, user::Model> = self
            .user_dao
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(bookings
            .into_iter()
            .filter_map(|booking| {
                Some(BookingDetail {
                    movie: movies.get(&booking.movie_id)?.clone(),
                    seat: seats.get(&booking.seat_id)?.clone(),
                    user: users.get(&booking.user_id)?.clone(),
                    booking,
                })
            })
            .collect())
    }
}

impl CrudService for BookingService {
    type Dao = BookingDao;

    fn dao(&self) -> &Self::Dao {
        &self.booking_dao
    }

    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Booking create failed",
            find_failed: "Booking lookup failed",
            not_found: "Booking not found",
            update_failed: "Booking update failed",
            delete_failed: "Booking delete failed",
            duplicate: SEAT_ALREADY_BOOKED,
        }
    }
}

fn parse_id(
    raw: Option<&str>,
    missing: &'static str,
    invalid: &'static str,
) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| AppError::bad_request(missing))?;
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(invalid))
}

fn unique_ids(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
