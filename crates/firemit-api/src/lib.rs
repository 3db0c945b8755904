//! Deployment API server for the fire mitigation service.
//!
//! This crate provides an Axum HTTP server exposing one endpoint,
//! `GET /api/optimal-deployment`, which runs a single fire mitigation
//! episode through the [`Dispatcher`](firemit_dispatch::Dispatcher) and
//! returns stations, leading hydrants, leading wildfires and the station
//! route as JSON.
//!
//! # Architecture
//!
//! ```text
//! GET /api/optimal-deployment
//!   -> Dispatcher::run_once      (isolated task, deadline)
//!     -> FireMitigationEnv::reset  (Overpass + ArcGIS fetches)
//!     -> FireMitigationEnv::step   (random action)
//!   <- 200 EpisodeResult | 500 {"error": ...}
//! ```
//!
//! Requests share nothing mutable: every request builds its own
//! environment, and the only shared object is the HTTP client inside the
//! data source.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
