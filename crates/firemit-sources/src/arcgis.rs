//! ArcGIS feature-layer query parameters and response extraction.
//!
//! Outbreaks and wildfires are both served by feature layers and queried
//! the same way: every feature, every attribute, with geometry, as JSON.
//! Feature services report query failures as HTTP 200 with an `error`
//! object in the body, which is surfaced as [`UpstreamError::Service`].

use firemit_types::FeatureRecord;
use reqwest::Url;
use serde::Deserialize;

use crate::error::UpstreamError;

/// Query string for an unfiltered feature-layer query.
pub const QUERY_PARAMS: [(&str, &str); 4] = [
    ("where", "1=1"),
    ("outFields", "*"),
    ("returnGeometry", "true"),
    ("f", "json"),
];

/// Return the `query` endpoint of a feature layer URL.
///
/// `https://host/.../FeatureServer/0?token=t` becomes
/// `https://host/.../FeatureServer/0/query?token=t`. Only the path is
/// touched; an existing query string such as a layer token is kept.
pub fn query_endpoint(layer_url: &Url) -> Url {
    let mut endpoint = layer_url.clone();
    if let Ok(mut segments) = endpoint.path_segments_mut() {
        segments.pop_if_empty().push("query");
    }
    endpoint
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<FeatureRecord>,
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Extract feature records from a feature-layer query response body.
///
/// Feature order is preserved and `geometry`/`attributes` are passed
/// through untouched.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] if the body is not JSON of the
/// expected shape, or [`UpstreamError::Service`] if the service embedded an
/// error object.
pub fn parse_features(
    provider: &'static str,
    body: &[u8],
) -> Result<Vec<FeatureRecord>, UpstreamError> {
    let response: QueryResponse =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Malformed {
            provider,
            message: e.to_string(),
        })?;

    if let Some(error) = response.error {
        return Err(UpstreamError::Service {
            provider,
            code: error.code,
            message: error.message,
        });
    }

    Ok(response.features)
}
