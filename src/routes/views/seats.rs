use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::render::{MovieRow, PageResult, page_error, render};
use crate::{
    auth::CurrentUser, db::entities::seat, services::ServiceContext,
    services::booking_service::QuickBookOutcome, state::AppState,
};

const SEAT_LIST_PATH: &str = "/pages/seats";
const HISTORY_PATH: &str = "/pages/history";

#[derive(Debug, Clone)]
struct SeatItem {
    id: String,
    label: String,
}

impl From<seat::Model> for SeatItem {
    fn from(model: seat::Model) -> Self {
        Self {
            id: model.id.to_string(),
            label: model.seat_number,
        }
    }
}

#[derive(Template)]
#[template(path = "seat_list.html")]
struct SeatListTemplate {
    seats: Vec<SeatItem>,
    movies: Vec<MovieRow>,
}

#[derive(Debug, Default, Deserialize)]
struct QuickBookForm {
    #[serde(default)]
    movie_id: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SEAT_LIST_PATH, get(seat_list))
        .route("/pages/seats/{id}/book", post(quick_book))
        .with_state(state)
}

async fn seat_list(State(state): State<Arc<AppState>>) -> PageResult {
    let services = ServiceContext::from_state(state.as_ref());
    let seats = services.seat().list().await.map_err(page_error)?;
    let movies = services.movie().list().await.map_err(page_error)?;

    render(&SeatListTemplate {
        seats: seats.into_iter().map(SeatItem::from).collect(),
        movies: movies.into_iter().map(MovieRow::from).collect(),
    })
}

/// Redirects to the history page on success and back to the seat list otherwise.
async fn quick_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
    Form(form): Form<QuickBookForm>,
) -> Response {
    let services = ServiceContext::from_state(state.as_ref());
    let outcome = match services
        .user()
        .acting_user(current.user(), &state.guest)
        .await
    {
        Ok(actor) => {
            services
                .booking()
                .quick_book(&id, form.movie_id.as_deref(), &actor)
                .await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(QuickBookOutcome::Booked(_)) => Redirect::to(HISTORY_PATH).into_response(),
        Ok(QuickBookOutcome::MissingMovie | QuickBookOutcome::AlreadyBooked) => {
            Redirect::to(SEAT_LIST_PATH).into_response()
        }
        Err(err) => page_error(err).into_response(),
    }
}
