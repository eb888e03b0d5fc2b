//! Environment configuration, loaded through `.env` when present.

use crate::error::ConfigError;
use log::LevelFilter;
use models::validation::LayoutLimits;
use sea_orm::ConnectOptions;
use std::{env, str::FromStr, time::Duration};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub sql_logging: bool,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQL_LOGGING`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            url,
            max_connections: optional_var("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            sql_logging: optional_var("DATABASE_SQL_LOGGING")?.unwrap_or(false),
        })
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(self.sql_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        options
    }
}

/// Validator bounds, with `LAYOUT_OVERLAP_TOLERANCE` overriding the overlap tolerance
pub fn layout_limits_from_env() -> Result<LayoutLimits, ConfigError> {
    dotenvy::dotenv().ok();

    let mut limits = LayoutLimits::default();
    if let Some(tolerance) = optional_var::<f64>("LAYOUT_OVERLAP_TOLERANCE")? {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                name: "LAYOUT_OVERLAP_TOLERANCE",
                value: tolerance.to_string(),
            });
        }
        limits.overlap_tolerance = tolerance;
    }

    Ok(limits)
}

fn optional_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}
