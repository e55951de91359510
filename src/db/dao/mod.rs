pub mod base;
pub mod base_traits;
pub mod booking_dao;
mod context;
pub mod error;
pub mod movie_dao;
pub mod seat_dao;
pub mod user_dao;

pub use base::DaoBase;
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use booking_dao::BookingDao;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use movie_dao::MovieDao;
pub use seat_dao::SeatDao;
pub use user_dao::UserDao;
