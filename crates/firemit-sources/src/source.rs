//! Data source trait and in-memory fixture implementation.
//!
//! The [`DataSource`] trait abstracts where hydrant, outbreak and wildfire
//! records come from. Production code uses
//! [`HttpDataSource`](crate::http::HttpDataSource); tests and local runs use
//! [`FixtureDataSource`], which serves records from memory.

use std::future::Future;

use firemit_types::{Hydrant, OutbreakRecord, WildfireRecord};

use crate::error::UpstreamError;

/// A provider of the three geospatial record sets.
///
/// Each operation is one independent round trip that returns the full,
/// ordered result set. Implementations do not cache or retry.
///
/// The methods return `Send` futures so that an environment driven by a
/// data source can run on its own Tokio task.
pub trait DataSource: Send + Sync {
    /// Fetch all fire hydrants in the configured region.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, non-2xx status or a
    /// malformed body.
    fn fetch_hydrants(&self) -> impl Future<Output = Result<Vec<Hydrant>, UpstreamError>> + Send;

    /// Fetch all outbreak records.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`fetch_hydrants`](DataSource::fetch_hydrants).
    fn fetch_outbreaks(
        &self,
    ) -> impl Future<Output = Result<Vec<OutbreakRecord>, UpstreamError>> + Send;

    /// Fetch all wildfire records.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`fetch_hydrants`](DataSource::fetch_hydrants).
    fn fetch_wildfires(
        &self,
    ) -> impl Future<Output = Result<Vec<WildfireRecord>, UpstreamError>> + Send;
}

/// Which fetch a [`FixtureDataSource`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFailure {
    /// `fetch_hydrants` fails.
    Hydrants,
    /// `fetch_outbreaks` fails.
    Outbreaks,
    /// `fetch_wildfires` fails.
    Wildfires,
}

/// An in-memory data source that returns clones of preset records.
///
/// Optionally fails one of the three fetches with an
/// [`UpstreamError::Status`] of 503 to exercise error propagation.
#[derive(Debug, Clone, Default)]
pub struct FixtureDataSource {
    /// Records returned by `fetch_hydrants`.
    pub hydrants: Vec<Hydrant>,
    /// Records returned by `fetch_outbreaks`.
    pub outbreaks: Vec<OutbreakRecord>,
    /// Records returned by `fetch_wildfires`.
    pub wildfires: Vec<WildfireRecord>,
    /// Fetch that should fail, if any.
    pub failure: Option<FixtureFailure>,
}

impl FixtureDataSource {
    /// Create a fixture with the given record sets and no failure.
    pub const fn new(
        hydrants: Vec<Hydrant>,
        outbreaks: Vec<OutbreakRecord>,
        wildfires: Vec<WildfireRecord>,
    ) -> Self {
        Self {
            hydrants,
            outbreaks,
            wildfires,
            failure: None,
        }
    }

    /// Make the given fetch fail.
    #[must_use]
    pub const fn failing(mut self, failure: FixtureFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    fn check(&self, fetch: FixtureFailure, provider: &'static str) -> Result<(), UpstreamError> {
        if self.failure == Some(fetch) {
            return Err(UpstreamError::Status {
                provider,
                status: 503,
                body: String::from("fixture unavailable"),
            });
        }
        Ok(())
    }
}

impl DataSource for FixtureDataSource {
    async fn fetch_hydrants(&self) -> Result<Vec<Hydrant>, UpstreamError> {
        self.check(FixtureFailure::Hydrants, "fixture hydrants")?;
        Ok(self.hydrants.clone())
    }

    async fn fetch_outbreaks(&self) -> Result<Vec<OutbreakRecord>, UpstreamError> {
        self.check(FixtureFailure::Outbreaks, "fixture outbreaks")?;
        Ok(self.outbreaks.clone())
    }

    async fn fetch_wildfires(&self) -> Result<Vec<WildfireRecord>, UpstreamError> {
        self.check(FixtureFailure::Wildfires, "fixture wildfires")?;
        Ok(self.wildfires.clone())
    }
}
