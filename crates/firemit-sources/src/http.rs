//! HTTP-backed [`DataSource`] talking to Overpass and ArcGIS feature layers.
//!
//! One `reqwest` client is shared by all three fetches. The client is
//! internally reference counted, so cloning an [`HttpDataSource`] is cheap
//! and every clone reuses the same connection pool.
//!
//! Every request carries its own timeout, so a stalled upstream cannot keep
//! a fetch alive after the episode that issued it has been abandoned.

use std::time::Duration;

use firemit_types::{FeatureRecord, Hydrant, OutbreakRecord, WildfireRecord};
use reqwest::{RequestBuilder, Url};
use tracing::{debug, warn};

use crate::arcgis;
use crate::error::UpstreamError;
use crate::overpass;
use crate::source::DataSource;

/// Provider label for the outbreak feature layer.
const OUTBREAKS: &str = "Outbreaks";

/// Provider label for the wildfire feature layer.
const WILDFIRES: &str = "Wildfires";

/// Longest error body kept in [`UpstreamError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Endpoints and scoping for the upstream providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Overpass interpreter endpoint.
    pub overpass_url: Url,
    /// Administrative region name hydrants are scoped to.
    pub hydrant_region: String,
    /// Feature layer holding outbreak records.
    pub outbreak_layer_url: Url,
    /// Feature layer holding wildfire records.
    pub wildfire_layer_url: Url,
}

/// A [`DataSource`] that queries the configured public services.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpDataSource {
    /// Create a data source with its own HTTP client.
    ///
    /// Each upstream request, body included, must finish within
    /// `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Client`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: SourceConfig, request_timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn query_layer(
        &self,
        provider: &'static str,
        layer_url: &Url,
    ) -> Result<Vec<FeatureRecord>, UpstreamError> {
        let request = self
            .client
            .get(arcgis::query_endpoint(layer_url))
            .query(&arcgis::QUERY_PARAMS);
        let body = send(provider, request).await?;
        let features = arcgis::parse_features(provider, &body)?;
        debug!(provider, count = features.len(), "feature layer fetched");
        Ok(features)
    }
}

impl DataSource for HttpDataSource {
    async fn fetch_hydrants(&self) -> Result<Vec<Hydrant>, UpstreamError> {
        let query = overpass::hydrant_query(&self.config.hydrant_region);
        let request = self
            .client
            .post(self.config.overpass_url.clone())
            .form(&[("data", query)]);
        let body = send(overpass::PROVIDER, request).await?;
        let hydrants = overpass::parse_hydrants(&body)?;
        debug!(
            region = self.config.hydrant_region,
            count = hydrants.len(),
            "hydrants fetched"
        );
        Ok(hydrants)
    }

    async fn fetch_outbreaks(&self) -> Result<Vec<OutbreakRecord>, UpstreamError> {
        self.query_layer(OUTBREAKS, &self.config.outbreak_layer_url)
            .await
    }

    async fn fetch_wildfires(&self) -> Result<Vec<WildfireRecord>, UpstreamError> {
        self.query_layer(WILDFIRES, &self.config.wildfire_layer_url)
            .await
    }
}

/// Send a request and return the raw body of a 2xx response.
async fn send(provider: &'static str, request: RequestBuilder) -> Result<Vec<u8>, UpstreamError> {
    let response = request.send().await.map_err(|e| {
        warn!(provider, error = %e, "upstream request failed");
        UpstreamError::Request {
            provider,
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let mut body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        warn!(provider, status = status.as_u16(), "upstream returned error status");
        return Err(UpstreamError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(|e| UpstreamError::Request {
        provider,
        message: e.to_string(),
    })?;
    Ok(bytes.to_vec())
}
