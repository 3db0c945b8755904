//! Axum router construction for the deployment API.
//!
//! Assembles the single API route with CORS middleware enabled so the map
//! frontend can be served from another origin.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use firemit_sources::DataSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the API server.
///
/// The router includes:
/// - `GET /api/optimal-deployment` -- run one episode
///
/// CORS allows any origin.
pub fn build_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: DataSource + Clone + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/optimal-deployment",
            get(handlers::optimal_deployment::<S>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
