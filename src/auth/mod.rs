mod identity;
pub mod jwt;
mod types;

pub use identity::{CurrentUser, GuestIdentity};
pub use types::Claims;
