//! Deployment API entry point.
//!
//! # Startup Sequence
//!
//! 1. Load and validate configuration from environment variables
//! 2. Initialize structured logging (tracing)
//! 3. Build the HTTP data source for Overpass and ArcGIS
//! 4. Serve `GET /api/optimal-deployment` until `Ctrl-C`

use std::sync::Arc;

use firemit_api::{AppState, LogFormat, ServiceConfig, start_server};
use firemit_sources::HttpDataSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP client cannot be
/// built, or the server fails to bind or serve.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    init_logging(config.log_format);
    info!("firemit-api starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        hydrant_region = config.sources.hydrant_region,
        overpass_url = %config.sources.overpass_url,
        outbreak_layer_url = %config.sources.outbreak_layer_url,
        wildfire_layer_url = %config.sources.wildfire_layer_url,
        run_timeout_ms = config.run_timeout.as_millis(),
        "configuration loaded"
    );

    let source = HttpDataSource::new(config.sources.clone(), config.run_timeout)?;
    let state = Arc::new(AppState::new(source, config.run_timeout));

    start_server(&config.server, state).await?;

    Ok(())
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
