//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use stratadb_kube::ServiceClient;
use stratadb_store::Store;

use crate::handlers::{health, services};
use crate::state::OperatorState;

/// Create the management API router.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /v1/services` - List Services created through the operator
/// - `POST /v1/services` - Create a Service from a JSON manifest
/// - `DELETE /v1/services` - Delete a batch of Services, best-effort
pub fn create_router<C, S>(state: OperatorState<C, S>) -> Router
where
    C: ServiceClient + 'static,
    S: Store + 'static,
{
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/v1/services",
            get(services::list_services::<C, S>)
                .post(services::create_service::<C, S>)
                .delete(services::delete_services::<C, S>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
