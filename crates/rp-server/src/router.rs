//! Router configuration.
//!
//! This module creates the Axum router combining the relying-party
//! endpoints.

use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::handlers::{acs_post, acs_redirect, authenticate};
use crate::state::AppState;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Outbound: issue an AuthnRequest and redirect to the asserting party
        .route("/saml2/authenticate/{registration_id}", get(authenticate))
        // Inbound: assertion consumer service, both bindings
        .route(
            "/login/saml2/sso/{registration_id}",
            get(acs_redirect).post(acs_post),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check response body.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn router_builds_from_state() {
        let state = AppState::new(ServerConfig::for_testing());
        let _router = create_router(state);
    }
}
