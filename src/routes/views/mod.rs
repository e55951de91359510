use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

mod history;
mod movies;
mod render;
mod seats;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(movies::router(state.clone()))
        .merge(seats::router(state.clone()))
        .merge(history::router(state))
}
