use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, routing::get};

use super::render::{PageResult, page_error, render};
use crate::{
    auth::CurrentUser, services::ServiceContext, services::booking_service::BookingDetail,
    state::AppState,
};

struct HistoryRow {
    summary: String,
    movie_title: String,
    seat_number: String,
    username: String,
    booked_at: String,
}

impl From<BookingDetail> for HistoryRow {
    fn from(detail: BookingDetail) -> Self {
        Self {
            summary: detail.to_string(),
            booked_at: detail.booking.booking_date.format("%Y-%m-%d %H:%M").to_string(),
            movie_title: detail.movie.title,
            seat_number: detail.seat.seat_number,
            username: detail.user.username,
        }
    }
}

#[derive(Template)]
#[template(path = "booking_history.html")]
struct HistoryTemplate {
    heading: String,
    bookings: Vec<HistoryRow>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pages/history", get(booking_history))
        .with_state(state)
}

/// Signed-in users see their own bookings; anonymous visitors see all of them.
async fn booking_history(State(state): State<Arc<AppState>>, current: CurrentUser) -> PageResult {
    let user = current.user();
    let bookings = ServiceContext::from_state(state.as_ref())
        .booking()
        .list(user.map(|user| user.id))
        .await
        .map_err(page_error)?;

    let heading = match user {
        Some(user) => format!("Bookings for {}", user.username),
        None => "All bookings".to_string(),
    };
    render(&HistoryTemplate {
        heading,
        bookings: bookings.into_iter().map(HistoryRow::from).collect(),
    })
}
