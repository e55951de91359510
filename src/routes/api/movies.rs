use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::movie,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        movie_service::{MovieInput, MoviePatch, MovieService},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub showtime: Option<DateTimeWithTimeZone>,
}

/// Absent fields are left unchanged; `"showtime": null` clears the showtime.
#[derive(Debug, Default, Deserialize)]
pub struct MoviePatchRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub showtime: Option<Option<DateTimeWithTimeZone>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShowtimeRequest {
    #[serde(default)]
    pub showtime: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub showtime: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct MovieDeletedResponse {
    pub id: Uuid,
    pub title: String,
    pub bookings_deleted: u64,
}

impl From<movie::Model> for MovieResponse {
    fn from(model: movie::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration,
            showtime: model.showtime,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MovieRequest> for MovieInput {
    fn from(body: MovieRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            release_date: body.release_date,
            duration: body.duration,
            showtime: body.showtime,
        }
    }
}

impl From<MoviePatchRequest> for MoviePatch {
    fn from(body: MoviePatchRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            release_date: body.release_date,
            duration: body.duration,
            showtime: body.showtime,
        }
    }
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie)
                .put(replace_movie)
                .patch(patch_movie)
                .delete(delete_movie),
        )
        .route("/movies/{id}/delete-movie", post(delete_movie_action))
        .route("/movies/{id}/update-showtime", post(update_showtime))
        .with_state(state)
}

fn movie_service(state: &AppState) -> MovieService {
    ServiceContext::from_state(state).movie()
}

async fn list_movies(State(state): State<Arc<AppState>>) -> ApiResult<Vec<MovieResponse>> {
    let movies = movie_service(&state).list().await?;
    JsonApiResponse::ok(movies.into_iter().map(MovieResponse::from).collect())
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MovieRequest>,
) -> ApiResult<MovieResponse> {
    let movie = movie_service(&state).create(body.into()).await?;
    JsonApiResponse::created(movie.into())
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<MovieResponse> {
    let movie = movie_service(&state).get(&id).await?;
    JsonApiResponse::ok(movie.into())
}

async fn replace_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<MovieRequest>,
) -> ApiResult<MovieResponse> {
    let movie = movie_service(&state).replace(&id, body.into()).await?;
    JsonApiResponse::ok(movie.into())
}

async fn patch_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<MoviePatchRequest>,
) -> ApiResult<MovieResponse> {
    let movie = movie_service(&state).patch(&id, body.into()).await?;
    JsonApiResponse::ok(movie.into())
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<MovieDeletedResponse> {
    let deleted = movie_service(&state).delete(&id).await?;
    JsonApiResponse::with_status(
        StatusCode::OK,
        "deleted",
        MovieDeletedResponse {
            id: deleted.id,
            title: deleted.title,
            bookings_deleted: deleted.bookings_deleted,
        },
    )
}

async fn delete_movie_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<MovieDeletedResponse> {
    let deleted = movie_service(&state).delete(&id).await?;
    let message = format!("Movie '{}' deleted successfully!", deleted.title);
    JsonApiResponse::with_status(
        StatusCode::OK,
        message,
        MovieDeletedResponse {
            id: deleted.id,
            title: deleted.title,
            bookings_deleted: deleted.bookings_deleted,
        },
    )
}

async fn update_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateShowtimeRequest>,
) -> ApiResult<MovieResponse> {
    let movie = movie_service(&state)
        .update_showtime(&id, body.showtime.as_deref())
        .await?;
    let message = format!("Showtime updated for '{}'", movie.title);
    JsonApiResponse::with_status(StatusCode::OK, message, movie.into())
}
