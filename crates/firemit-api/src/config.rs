//! Service configuration loaded from environment variables.
//!
//! Every endpoint and tunable is supplied by the environment and validated
//! once at startup, so a bad URL or region fails the process before the
//! listener binds rather than on the first request.

use std::time::Duration;

use firemit_sources::SourceConfig;
use reqwest::Url;

use crate::server::ServerConfig;

/// Default Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default administrative region hydrants are fetched for.
pub const DEFAULT_HYDRANT_REGION: &str = "California";

/// Default per-run deadline in milliseconds.
pub const DEFAULT_RUN_TIMEOUT_MS: u64 = 60_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required env var {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },

    /// A variable is set to an unusable value.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Listener address.
    pub server: ServerConfig,
    /// Upstream endpoints and hydrant region.
    pub sources: SourceConfig,
    /// Deadline for one dispatcher run.
    pub run_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// Required variables:
    /// - `OUTBREAK_LAYER_URL` -- feature layer holding outbreak records
    /// - `WILDFIRE_LAYER_URL` -- feature layer holding wildfire records
    ///
    /// Optional variables:
    /// - `SERVER_HOST` -- bind host (default `0.0.0.0`)
    /// - `SERVER_PORT` -- bind port (default 8080)
    /// - `HYDRANT_REGION` -- administrative region name (default `California`)
    /// - `OVERPASS_URL` -- interpreter endpoint (default public instance)
    /// - `RUN_TIMEOUT_MS` -- dispatcher run deadline (default 60000)
    /// - `LOG_FORMAT` -- `text` or `json` (default `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let defaults = ServerConfig::default();
        let host = var("SERVER_HOST").unwrap_or(defaults.host);
        let port = match var("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "SERVER_PORT",
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        let hydrant_region =
            var("HYDRANT_REGION").unwrap_or_else(|| DEFAULT_HYDRANT_REGION.to_owned());
        validate_region(&hydrant_region)?;

        let overpass_url = parse_url(
            "OVERPASS_URL",
            &var("OVERPASS_URL").unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_owned()),
        )?;
        let outbreak_layer_url = parse_url(
            "OUTBREAK_LAYER_URL",
            &var("OUTBREAK_LAYER_URL").ok_or(ConfigError::Missing {
                name: "OUTBREAK_LAYER_URL",
            })?,
        )?;
        let wildfire_layer_url = parse_url(
            "WILDFIRE_LAYER_URL",
            &var("WILDFIRE_LAYER_URL").ok_or(ConfigError::Missing {
                name: "WILDFIRE_LAYER_URL",
            })?,
        )?;

        let run_timeout_ms = match var("RUN_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "RUN_TIMEOUT_MS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_RUN_TIMEOUT_MS,
        };
        if run_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "RUN_TIMEOUT_MS",
                reason: String::from("must be greater than zero"),
            });
        }

        let log_format = match var("LOG_FORMAT").map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason: format!("unknown format {other}, expected text or json"),
                });
            }
        };

        Ok(Self {
            server: ServerConfig { host, port },
            sources: SourceConfig {
                overpass_url,
                hydrant_region,
                outbreak_layer_url,
                wildfire_layer_url,
            },
            run_timeout: Duration::from_millis(run_timeout_ms),
            log_format,
        })
    }
}

/// Parse an absolute `http` or `https` URL.
fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("{raw}: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

/// The region is interpolated into a quoted Overpass QL string.
fn validate_region(region: &str) -> Result<(), ConfigError> {
    if region.contains(['"', '\\']) {
        return Err(ConfigError::Invalid {
            name: "HYDRANT_REGION",
            reason: String::from("must not contain quotes or backslashes"),
        });
    }
    Ok(())
}
