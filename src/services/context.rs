use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{
        booking_service::BookingService, movie_service::MovieService, seat_service::SeatService,
        user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn movie(&self) -> MovieService {
        MovieService::new(self.daos.movie())
    }

    pub fn seat(&self) -> SeatService {
        SeatService::new(self.daos.seat(), self.daos.booking())
    }

    pub fn booking(&self) -> BookingService {
        BookingService::new(&self.daos)
    }
}
