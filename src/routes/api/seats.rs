use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    db::entities::seat,
    response::{ApiResult, JsonApiResponse},
    routes::api::bookings::BookingResponse,
    services::{ServiceContext, seat_service::SeatService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub seat_number: String,
}

#[derive(Debug, Deserialize)]
pub struct SeatPatchRequest {
    pub seat_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookSeatRequest {
    #[serde(default)]
    pub movie_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatResponse {
    pub id: Uuid,
    pub seat_number: String,
}

#[derive(Debug, Serialize)]
pub struct SeatDeletedResponse {
    pub id: Uuid,
    pub bookings_deleted: u64,
}

impl From<seat::Model> for SeatResponse {
    fn from(model: seat::Model) -> Self {
        Self {
            id: model.id,
            seat_number: model.seat_number,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/seats", get(list_seats).post(create_seat))
        .route(
            "/seats/{id}",
            get(get_seat)
                .put(replace_seat)
                .patch(patch_seat)
                .delete(delete_seat),
        )
        .route("/seats/{id}/book", post(book_seat))
        .with_state(state)
}

fn seat_service(state: &AppState) -> SeatService {
    ServiceContext::from_state(state).seat()
}

async fn list_seats(State(state): State<Arc<AppState>>) -> ApiResult<Vec<SeatResponse>> {
    let seats = seat_service(&state).list().await?;
    JsonApiResponse::ok(seats.into_iter().map(SeatResponse::from).collect())
}

async fn create_seat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeatRequest>,
) -> ApiResult<SeatResponse> {
    let seat = seat_service(&state).create(&body.seat_number).await?;
    JsonApiResponse::created(seat.into())
}

async fn get_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<SeatResponse> {
    let seat = seat_service(&state).get(&id).await?;
    JsonApiResponse::ok(seat.into())
}

async fn replace_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeatRequest>,
) -> ApiResult<SeatResponse> {
    let seat = seat_service(&state).update(&id, &body.seat_number).await?;
    JsonApiResponse::ok(seat.into())
}

async fn patch_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeatPatchRequest>,
) -> ApiResult<SeatResponse> {
    let service = seat_service(&state);
    let seat = match body.seat_number {
        Some(seat_number) => service.update(&id, &seat_number).await?,
        None => service.get(&id).await?,
    };
    JsonApiResponse::ok(seat.into())
}

async fn delete_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<SeatDeletedResponse> {
    let bookings_deleted = seat_service(&state).delete(&id).await?;
    JsonApiResponse::with_status(
        StatusCode::OK,
        "deleted",
        SeatDeletedResponse {
            id,
            bookings_deleted,
        },
    )
}

async fn book_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
    Json(body): Json<BookSeatRequest>,
) -> ApiResult<BookingResponse> {
    let services = ServiceContext::from_state(state.as_ref());
    let actor = services
        .user()
        .acting_user(current.user(), &state.guest)
        .await?;
    let detail = services
        .booking()
        .book_seat(&id, body.movie_id.as_deref(), &actor)
        .await?;
    JsonApiResponse::created(detail.into())
}
