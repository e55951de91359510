pub mod bookings;
pub mod movies;
mod router;
pub mod seats;

pub use router::router;
