use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::{db::entities::movie, error::AppError, response::status_for};

pub type HtmlError = (StatusCode, Html<String>);
pub type PageResult = Result<Html<String>, HtmlError>;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    reason: String,
    message: String,
}

/// Movie fields preformatted for display.
#[derive(Debug, Clone)]
pub struct MovieRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub duration: i32,
    pub showtime: String,
}

impl From<movie::Model> for MovieRow {
    fn from(model: movie::Model) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title,
            description: model.description,
            release_date: model.release_date.format("%Y-%m-%d").to_string(),
            duration: model.duration,
            showtime: model
                .showtime
                .map(|showtime| showtime.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "TBA".to_string()),
        }
    }
}

pub fn render<T: Template>(template: &T) -> PageResult {
    template.render().map(Html).map_err(|err| {
        tracing::error!(error = %err, "failed to render page");
        html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render page")
    })
}

pub fn html_error(status: StatusCode, message: impl Into<String>) -> HtmlError {
    let message = message.into();
    let page = ErrorTemplate {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error").to_string(),
        message: message.clone(),
    };
    let body = page.render().unwrap_or(message);
    (status, Html(body))
}

/// Renders an [`AppError`] as an HTML page with the matching status.
pub fn page_error(err: AppError) -> HtmlError {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), message = err.message(), "page failed");
    }
    html_error(status, err.message())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{html_error, page_error};
    use crate::error::AppError;

    #[test]
    fn page_error_keeps_status_and_escapes_message() {
        let (status, body) = page_error(AppError::not_found("<em>Movie not found"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.0.contains("&lt;em&gt;Movie not found"));
        assert!(!body.0.contains("<em>Movie"));
    }

    #[test]
    fn html_error_names_the_status() {
        let (_, body) = html_error(StatusCode::BAD_REQUEST, "bad seat");
        assert!(body.0.contains("400"));
        assert!(body.0.contains("Bad Request"));
    }
}
