//! Application router assembly.
//!
//! Combines the ask endpoint, a liveness probe, and the static single-page
//! client behind the usual middleware stack (trace, CORS, request timeout).

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::ask::{ask_routes, AskAppState};

/// Builds the full application router.
///
/// Requests not matching an API route fall back to static files served from
/// the configured directory, so `GET /` returns the single-page client.
pub fn app_router(state: AskAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(ask_routes())
        .route("/health", get(health))
        .with_state(state)
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// GET /health - liveness probe.
async fn health() -> &'static str {
    "OK"
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
