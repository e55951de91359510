use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{bookings, movies, seats};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(movies::router(state.clone()))
        .merge(seats::router(state.clone()))
        .merge(bookings::router(state))
}
