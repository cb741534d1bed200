//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `DEFAULT_TIMEZONE`: Timezone for slot requests that name none (default: "UTC")
//! - `RATE_LIMIT_MAX_REQUESTS`: Slot lookups allowed per client per window (default: 60)
//! - `RATE_LIMIT_WINDOW_SECONDS`: Length of the rate limit window (default: 60)
//! - `RATE_LIMIT_TRUST_PROXY`: Key rate limits on `X-Forwarded-For` (default: false)

use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use std::env;
use std::time::Duration;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
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

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone used when a slot or booking request does not name one
    pub default_timezone: Tz,

    /// Requests per client allowed on the public slot endpoint per window
    pub rate_limit_max_requests: u32,

    /// Rate limit window in seconds
    pub rate_limit_window_seconds: u64,

    /// Whether a reverse proxy sets `X-Forwarded-For`; only then is it trusted
    pub rate_limit_trust_proxy: bool,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The DEFAULT_TIMEZONE value is not a known IANA timezone
    /// - A rate limit value is not a positive integer
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let timezone_name = env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let default_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|e| eyre::eyre!("Invalid DEFAULT_TIMEZONE value '{}': {}", timezone_name, e))?;

        let rate_limit_max_requests = parse_positive("RATE_LIMIT_MAX_REQUESTS", 60)?;
        let rate_limit_window_seconds = parse_positive("RATE_LIMIT_WINDOW_SECONDS", 60)?;
        let rate_limit_trust_proxy = match env::var("RATE_LIMIT_TRUST_PROXY") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| eyre::eyre!("Invalid RATE_LIMIT_TRUST_PROXY value '{}'", raw))?,
            Err(_) => false,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            default_timezone,
            rate_limit_max_requests,
            rate_limit_window_seconds,
            rate_limit_trust_proxy,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_seconds)
    }
}

/// Unknown levels fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_positive<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .wrap_err_with(|| format!("Invalid {} value", name))?,
        Err(_) => default,
    };
    if value <= T::default() {
        eyre::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}
