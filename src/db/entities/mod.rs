#[allow(unused_imports)]
pub mod prelude {
    pub use super::booking::Entity as Booking;
    pub use super::movie::Entity as Movie;
    pub use super::seat::Entity as Seat;
    pub use super::user::Entity as User;
}

pub mod booking;
pub mod movie;
pub mod seat;
pub mod user;
