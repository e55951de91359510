use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.auth.jwt_secret.trim().is_empty() {
        errors.push("auth.jwt_secret must not be empty".to_string());
    } else if !cfg!(debug_assertions) && cfg.auth.jwt_secret == defaults::DEV_JWT_SECRET {
        errors.push("auth.jwt_secret must be set in release builds".to_string());
    }

    if cfg.booking.guest_username.trim().is_empty() {
        errors.push("booking.guest_username must not be empty".to_string());
    }

    if cfg.booking.grid_rows.trim().is_empty() {
        errors.push("booking.grid_rows must name at least one row".to_string());
    } else if cfg.booking.grid_rows.chars().any(|row| !row.is_ascii_alphabetic()) {
        errors.push("booking.grid_rows must only contain letters".to_string());
    }

    if cfg.booking.grid_columns == 0 {
        errors.push("booking.grid_columns must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
