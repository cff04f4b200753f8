//! Axum routes for the ask endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{ask, AskAppState};

/// Creates routes for the ask endpoint.
///
/// Endpoints:
/// - POST /ask - Relay a question to the assistant
pub fn ask_routes() -> Router<AskAppState> {
    Router::new().route("/ask", post(ask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_routes_creates_valid_router() {
        let _routes = ask_routes();
    }
}
