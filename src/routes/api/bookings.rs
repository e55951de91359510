use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::api::{movies::MovieResponse, seats::SeatResponse},
    services::{
        ServiceContext,
        booking_service::{BookingDetail, BookingInput, BookingService},
    },
    state::AppState,
};

/// Identifiers arrive as strings so a missing or malformed id gets a field-specific message.
#[derive(Debug, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub seat_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub movie: MovieResponse,
    pub seat: SeatResponse,
    pub user: Uuid,
    pub booking_date: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct BookingDeletedResponse {
    pub id: Uuid,
}

impl From<BookingDetail> for BookingResponse {
    fn from(detail: BookingDetail) -> Self {
        Self {
            id: detail.booking.id,
            movie: detail.movie.into(),
            seat: detail.seat.into(),
            user: detail.booking.user_id,
            booking_date: detail.booking.booking_date,
        }
    }
}

impl From<BookingRequest> for BookingInput {
    fn from(body: BookingRequest) -> Self {
        Self {
            movie_id: body.movie_id,
            seat_id: body.seat_id,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking)
                .put(replace_booking)
                .patch(patch_booking)
                .delete(delete_booking),
        )
        .with_state(state)
}

fn booking_service(state: &AppState) -> BookingService {
    ServiceContext::from_state(state).booking()
}

/// `?user=me` narrows the list to the caller; anonymous callers still see every booking.
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
    current: CurrentUser,
) -> ApiResult<Vec<BookingResponse>> {
    let only_mine = query.user.as_deref() == Some("me");
    let user_id = current.user().filter(|_| only_mine).map(|user| user.id);

    let bookings = booking_service(&state).list(user_id).await?;
    JsonApiResponse::ok(bookings.into_iter().map(BookingResponse::from).collect())
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(body): Json<BookingRequest>,
) -> ApiResult<BookingResponse> {
    let services = ServiceContext::from_state(state.as_ref());
    let actor = services
        .user()
        .acting_user(current.user(), &state.guest)
        .await?;
    let detail = services.booking().create(body.into(), &actor).await?;
    JsonApiResponse::created(detail.into())
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<BookingResponse> {
    let detail = booking_service(&state).get(&id).await?;
    JsonApiResponse::ok(detail.into())
}

async fn replace_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<BookingRequest>,
) -> ApiResult<BookingResponse> {
    let detail = booking_service(&state)
        .update(&id, body.into(), false)
        .await?;
    JsonApiResponse::ok(detail.into())
}

async fn patch_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<BookingRequest>,
) -> ApiResult<BookingResponse> {
    let detail = booking_service(&state).update(&id, body.into(), true).await?;
    JsonApiResponse::ok(detail.into())
}

async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<BookingDeletedResponse> {
    booking_service(&state).delete(&id).await?;
    JsonApiResponse::with_status(StatusCode::OK, "deleted", BookingDeletedResponse { id })
}
