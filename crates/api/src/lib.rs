//! # Slotbook API
//!
//! The web server of the Slotbook booking service. It exposes the public slot
//! lookup and booking endpoints used by booking pages, and the admin endpoints
//! that manage event types, weekly availability and bookings.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: Request processing, delegating slot math to `slotbook_core`
//! - **Middleware**: Error mapping and per-client rate limiting
//! - **Config**: Environment-driven settings
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling and rate limiting
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::{config::ApiConfig, middleware::rate_limit::RateLimiter};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Timezone for requests that do not name one
    pub default_timezone: Tz,
    /// Per-client counters for the public slot endpoint
    pub rate_limiter: RateLimiter,
}

impl ApiState {
    pub fn new(db_pool: PgPool, config: &ApiConfig) -> Self {
        Self {
            db_pool,
            default_timezone: config.default_timezone,
            rate_limiter: RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window(),
            )
            .trust_forwarded_for(config.rate_limit_trust_proxy),
        }
    }
}

/// Builds the full application router with CORS, timeout and tracing layers.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
pub fn build_router(state: Arc<ApiState>, config: &ApiConfig) -> Result<Router> {
    let app = Router::new()
        .merge(routes::health::routes())
        .merge(routes::availability::routes(state.clone()))
        .merge(routes::event_types::routes())
        .merge(routes::bookings::routes())
        .with_state(state);

    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    Ok(app)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use slotbook_api::config::ApiConfig;
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = slotbook_db::create_pool(&config.database_url).await?;
/// slotbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, &config));
    let app = build_router(state, &config)?;

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (default timezone {})",
        addr, config.default_timezone
    );

    // Peer addresses feed the rate limiter when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
