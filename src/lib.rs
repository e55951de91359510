pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod exercises;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
