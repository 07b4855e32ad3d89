//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the CampusCare API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 7001)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `JWT_SECRET`: Secret used to verify bearer tokens (required)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CLINIC_TIMEZONE`: IANA timezone for dates and clock times (default: "Asia/Kolkata")
//! - `CLINIC_SLOT_MINUTES`: Length of one bookable slot (default: 30)

use campuscare_core::{
    clock::{ClinicClock, DEFAULT_TIMEZONE},
    slots::DEFAULT_SLOT_MINUTES,
};
use eyre::{eyre, Result, WrapErr};
use std::env;
use tracing::Level;

const MAX_SLOT_MINUTES: i64 = 24 * 60;

/// Configuration for the CampusCare API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use campuscare_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// HS256 secret for verifying bearer tokens
    pub jwt_secret: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone all civil dates and times are interpreted in
    pub clock: ClinicClock,

    /// Length of a bookable slot in minutes
    pub slot_minutes: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `JWT_SECRET` is not set
    /// - `API_PORT` cannot be parsed as a u16
    /// - `CLINIC_TIMEZONE` is not a known IANA timezone
    /// - `CLINIC_SLOT_MINUTES` is not between 1 and 1440
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "7001".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Security settings
        let jwt_secret = env::var("JWT_SECRET")
            .wrap_err("JWT_SECRET environment variable must be set")?;

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Clinic settings
        let timezone = env::var("CLINIC_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let clock = ClinicClock::from_name(&timezone).map_err(|e| eyre!("Invalid CLINIC_TIMEZONE: {}", e))?;

        let slot_minutes = match env::var("CLINIC_SLOT_MINUTES") {
            Ok(raw) => parse_slot_minutes(&raw)?,
            Err(_) => DEFAULT_SLOT_MINUTES,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            jwt_secret,
            request_timeout,
            clock,
            slot_minutes,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:7001")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses `CLINIC_SLOT_MINUTES`; a slot lasts at least a minute and at most a day.
pub fn parse_slot_minutes(raw: &str) -> Result<i64> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .wrap_err("Invalid CLINIC_SLOT_MINUTES value")?;

    if !(1..=MAX_SLOT_MINUTES).contains(&minutes) {
        return Err(eyre!(
            "CLINIC_SLOT_MINUTES must be between 1 and {}, got {}",
            MAX_SLOT_MINUTES,
            minutes
        ));
    }

    Ok(minutes)
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
