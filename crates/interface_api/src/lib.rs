//! HTTP API Layer
//!
//! This crate provides the REST API for the concert service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Auth**: Session cookie extraction
//! - **Extract**: Path, query, and body extractors that reject with `ApiError`
//! - **Middleware**: Tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects, built by `mapper`
//! - **Error Handling**: Consistent error responses
//!
//! Handlers reach the store only through the [`ConcertPort`] held in
//! [`AppState`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(PostgresConcertAdapter::new(pool)), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod mapper;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use domain_concert::ConcertPort;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{auth as login, bookings, concerts, health, performers, seats};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub port: Arc<dyn ConcertPort>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// Every route is mounted under `config.base_path`.
pub fn create_router(port: Arc<dyn ConcertPort>, config: ApiConfig) -> Router {
    let base_path = config.base_path.clone();
    let state = AppState { port, config };

    let concert_routes = Router::new()
        .route("/", get(concerts::list_concerts))
        .route("/summaries", get(concerts::list_concert_summaries))
        .route("/:id", get(concerts::retrieve_concert));

    let performer_routes = Router::new()
        .route("/", get(performers::list_performers))
        .route("/:id", get(performers::retrieve_performer));

    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::make_booking))
        .route("/:id", get(bookings::retrieve_booking));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/login", axum::routing::post(login::login))
        .route("/seats/:date", get(seats::list_seats))
        .nest("/concerts", concert_routes)
        .nest("/performers", performer_routes)
        .nest("/bookings", booking_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    let router = if base_path.is_empty() {
        api_routes
    } else {
        Router::new().nest(&base_path, api_routes)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
