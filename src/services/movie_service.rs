use chrono::{DateTime, NaiveDate};
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use uuid::Uuid;

use crate::{
    db::dao::MovieDao,
    db::entities::movie,
    error::AppError,
    services::crud_service::{CrudErrors, CrudOp, CrudService},
};

pub const TITLE_MAX_LEN: usize = 200;
pub const SHOWTIME_REQUIRED: &str = "showtime field is required";

/// Every writable movie field, as accepted by create and full update.
#[derive(Debug, Clone)]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub showtime: Option<DateTimeWithTimeZone>,
}

/// Partial update; `showtime: Some(None)` clears the showtime.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    pub showtime: Option<Option<DateTimeWithTimeZone>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDeletion {
    pub id: Uuid,
    pub title: String,
    pub bookings_deleted: u64,
}

#[derive(Clone)]
pub struct MovieService {
    movie_dao: MovieDao,
}

impl MovieService {
    pub fn new(movie_dao: MovieDao) -> Self {
        Self { movie_dao }
    }

    pub async fn list(&self) -> Result<Vec<movie::Model>, AppError> {
        self.movie_dao
            .list_by_title()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn get(&self, id: &Uuid) -> Result<movie::Model, AppError> {
        CrudService::find_by_id(self, *id).await
    }

    pub async fn create(&self, input: MovieInput) -> Result<movie::Model, AppError> {
        let title = normalize_title(&input.title)?;
        let duration = validate_duration(input.duration)?;

        let model = movie::ActiveModel {
            title: Set(title),
            description: Set(input.description),
            release_date: Set(input.release_date),
            duration: Set(duration),
            showtime: Set(input.showtime),
            ..Default::default()
        };
        let movie = CrudService::create(self, model).await?;
        tracing::info!(movie_id = %movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }

    pub async fn replace(&self, id: &Uuid, input: MovieInput) -> Result<movie::Model, AppError> {
        let title = normalize_title(&input.title)?;
        let duration = validate_duration(input.duration)?;

        CrudService::update(self, *id, move |active| {
            active.title = Set(title);
            active.description = Set(input.description);
            active.release_date = Set(input.release_date);
            active.duration = Set(duration);
            active.showtime = Set(input.showtime);
        })
        .await
    }

    pub async fn patch(&self, id: &Uuid, patch: MoviePatch) -> Result<movie::Model, AppError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        let duration = patch.duration.map(validate_duration).transpose()?;

        CrudService::update(self, *id, move |active| {
            if let Some(title) = title {
                active.title = Set(title);
            }
            if let Some(description) = patch.description {
                active.description = Set(description);
            }
            if let Some(release_date) = patch.release_date {
                active.release_date = Set(release_date);
            }
            if let Some(duration) = duration {
                active.duration = Set(duration);
            }
            if let Some(showtime) = patch.showtime {
                active.showtime = Set(showtime);
            }
        })
        .await
    }

    /// Sets the showtime from an RFC 3339 string.
    ///
    /// An unknown movie is reported before a missing or malformed showtime.
    pub async fn update_showtime(
        &self,
        id: &Uuid,
        raw: Option<&str>,
    ) -> Result<movie::Model, AppError> {
        CrudService::find_by_id(self, *id).await?;
        let showtime = parse_showtime(raw)?;

        let movie = CrudService::update(self, *id, move |active| {
            active.showtime = Set(Some(showtime));
        })
        .await?;
        tracing::info!(movie_id = %movie.id, %showtime, "showtime updated");
        Ok(movie)
    }

    /// Deletes the movie and its bookings; seats and users are left alone.
    pub async fn delete(&self, id: &Uuid) -> Result<MovieDeletion, AppError> {
        let (movie, bookings_deleted) = self
            .movie_dao
            .delete_with_bookings(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Delete, err))?;
        tracing::info!(movie_id = %movie.id, bookings_deleted, "movie deleted");

        Ok(MovieDeletion {
            id: movie.id,
            title: movie.title,
            bookings_deleted,
        })
    }
}

impl CrudService for MovieService {
    type Dao = MovieDao;

    fn dao(&self) -> &Self::Dao {
        &self.movie_dao
    }

    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Movie create failed",
            find_failed: "Movie lookup failed",
            not_found: "Movie not found",
            update_failed: "Movie update failed",
            delete_failed: "Movie delete failed",
            ..CrudErrors::default()
        }
    }
}

fn normalize_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(AppError::bad_request(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_duration(duration: i32) -> Result<i32, AppError> {
    if duration < 1 {
        return Err(AppError::bad_request("duration must be a positive number of minutes"));
    }
    Ok(duration)
}

pub fn parse_showtime(raw: Option<&str>) -> Result<DateTimeWithTimeZone, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::bad_request(SHOWTIME_REQUIRED))?;

    DateTime::parse_from_rfc3339(raw)
        .map_err(|err| AppError::bad_request(format!("Invalid showtime: {err}")))
}
