//! # CampusCare API
//!
//! The API crate provides the web server for the CampusCare health-services
//! backend: doctors publish daily shifts split into bookable slots, students
//! reserve slots, doctors post notices and file medical reports.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints, URL structure and required roles
//! - **Handlers**: Extract requests and wrap results in the response envelope
//! - **Services**: Validation and booking rules over the [`CareStore`] seam
//! - **Middleware**: Bearer-token authentication and error mapping
//! - **Config**: Environment and application configuration
//!
//! The API uses Axum as the web framework; storage goes through
//! `campuscare_db::store::CareStore`, backed by PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Success envelope
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;
/// Scheduling, booking, directory, alert and report rules
pub mod services;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum::{http::Method, Router};
use campuscare_core::clock::ClinicClock;
use campuscare_db::{store::{CareStore, PgStore}, DbPool};
use chrono::Duration;
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Storage for directory, availability, appointments and alerts
    pub store: Arc<dyn CareStore>,
    /// Converts between clinic-local civil time and UTC
    pub clock: ClinicClock,
    /// Length of one bookable slot
    pub slot_length: Duration,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
}

impl ApiState {
    pub fn new(store: Arc<dyn CareStore>, config: &config::ApiConfig) -> Self {
        Self {
            store,
            clock: config.clock,
            slot_length: Duration::minutes(config.slot_minutes),
            jwt_secret: config.jwt_secret.clone(),
        }
    }
}

/// Builds the application router with every route and its auth layer
///
/// CORS and timeouts are left to [`start_server`] so tests can drive the
/// router directly.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Shift, slot and appointment endpoints
        .merge(routes::appointments::routes(state.clone()))
        // Doctor directory endpoints
        .merge(routes::doctors::routes(state.clone()))
        // Alert endpoints
        .merge(routes::alerts::routes(state.clone()))
        // Medical report endpoints
        .merge(routes::reports::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store: Arc<dyn CareStore> = Arc::new(PgStore::new(db_pool));
    let state = Arc::new(ApiState::new(store, &config));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(TimeoutLayer::new(StdDuration::from_secs(config.request_timeout)));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (timezone {}, {}-minute slots)",
        addr,
        config.clock.timezone().name(),
        config.slot_minutes
    );
    axum::serve(listener, app).await?;

    Ok(())
}
