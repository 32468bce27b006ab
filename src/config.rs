//! Server configuration from environment variables.

use anyhow::{Context, Result};

const DEFAULT_DATABASE: &str = "calendar_db";
const DEFAULT_PORT: u16 = 8000;

pub struct Config {
    pub mongo_url: String,
    pub database: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment (after `dotenvy` has run).
    ///
    /// `MONGO_URL` is required; `AGENDA_DB` and `AGENDA_PORT` fall back to
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let mongo_url = std::env::var("MONGO_URL").context("MONGO_URL not set")?;

        let database =
            std::env::var("AGENDA_DB").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let port = std::env::var("AGENDA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Config {
            mongo_url,
            database,
            port,
        })
    }
}
