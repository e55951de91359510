pub mod booking_service;
pub mod context;
pub mod crud_service;
pub mod movie_service;
pub mod seat_grid;
pub mod seat_service;
pub mod user_service;

pub use context::ServiceContext;
