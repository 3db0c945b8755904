//! Shared application state for the API server.

use std::time::Duration;

use firemit_dispatch::Dispatcher;
use firemit_sources::DataSource;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Holds no per-request data: each request gets a fresh
/// environment from the dispatcher.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// Runs one episode per request.
    pub dispatcher: Dispatcher<S>,
}

impl<S> AppState<S>
where
    S: DataSource + Clone + 'static,
{
    /// Create application state over a data source.
    pub const fn new(source: S, run_timeout: Duration) -> Self {
        Self {
            dispatcher: Dispatcher::new(source, run_timeout),
        }
    }
}
