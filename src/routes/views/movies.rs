use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::render::{MovieRow, PageResult, html_error, page_error, render};
use crate::{
    auth::CurrentUser, services::ServiceContext, services::seat_grid::SeatRow, state::AppState,
};

#[derive(Template)]
#[template(path = "movie_list.html")]
struct MovieListTemplate {
    movies: Vec<MovieRow>,
}

#[derive(Template)]
#[template(path = "seat_grid.html")]
struct SeatGridTemplate {
    movie: MovieRow,
    rows: Vec<SeatRow>,
}

#[derive(Template)]
#[template(path = "booking_confirmation.html")]
struct ConfirmationTemplate {
    movie: MovieRow,
    booked: Vec<String>,
    requested: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pages/movies", get(movie_list))
        .route("/pages/movies/{id}/seats", get(seat_grid).post(book_selected))
        .with_state(state)
}

async fn movie_list(State(state): State<Arc<AppState>>) -> PageResult {
    let movies = ServiceContext::from_state(state.as_ref())
        .movie()
        .list()
        .await
        .map_err(page_error)?;
    render(&MovieListTemplate {
        movies: movies.into_iter().map(MovieRow::from).collect(),
    })
}

async fn seat_grid(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> PageResult {
    let services = ServiceContext::from_state(state.as_ref());
    let movie = services.movie().get(&id).await.map_err(page_error)?;

    let seats = services.seat();
    let booking = &state.config.booking;
    seats
        .ensure_default_grid(&booking.grid_rows, booking.grid_columns)
        .await
        .map_err(page_error)?;
    let rows = seats.grid_for_movie(&movie.id).await.map_err(page_error)?;

    render(&SeatGridTemplate {
        movie: movie.into(),
        rows,
    })
}

/// Books every checked `seat_ids` box; seats taken in the meantime are skipped.
async fn book_selected(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
    Form(fields): Form<Vec<(String, String)>>,
) -> PageResult {
    let seat_ids = fields
        .into_iter()
        .filter(|(name, _)| name == "seat_ids")
        .map(|(_, value)| Uuid::parse_str(value.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| html_error(StatusCode::BAD_REQUEST, "Invalid seat selection."))?;

    let services = ServiceContext::from_state(state.as_ref());
    let movie = services.movie().get(&id).await.map_err(page_error)?;
    let actor = services
        .user()
        .acting_user(current.user(), &state.guest)
        .await
        .map_err(page_error)?;
    let booked = services
        .booking()
        .book_seats(&movie.id, &seat_ids, &actor)
        .await
        .map_err(page_error)?;

    render(&ConfirmationTemplate {
        movie: movie.into(),
        booked,
        requested: seat_ids.len(),
    })
}
