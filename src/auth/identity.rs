use std::sync::Arc;

use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use super::jwt::decode_token;
use crate::{
    config::BookingConfig, db::entities::user, error::AppError, services::ServiceContext,
    state::AppState,
};

/// Fallback account that owns bookings made without a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestIdentity {
    username: String,
}

impl GuestIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<&BookingConfig> for GuestIdentity {
    fn from(cfg: &BookingConfig) -> Self {
        Self::new(cfg.guest_username.trim())
    }
}

/// The caller named by `Authorization: Bearer`, or `None` for anonymous requests.
///
/// A malformed or expired token, or one whose subject no longer exists, is rejected
/// rather than treated as anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<user::Model>);

impl CurrentUser {
    pub fn user(&self) -> Option<&user::Model> {
        self.0.as_ref()
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>().cloned() {
            return Ok(current);
        }

        let Some(auth) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let token = auth
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::unauthorized("Missing/invalid Authorization header"))?;

        let claims = decode_token(&state.jwt, token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid token subject"))?;
        let user = ServiceContext::from_state(state.as_ref())
            .user()
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown user"))?;

        let current = Self(Some(user));
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
