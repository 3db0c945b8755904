//! Geospatial data sources for the fire mitigation environment.
//!
//! Three record sets are fetched from public services:
//!
//! - **Hydrants** from an Overpass interpreter, scoped to one
//!   administrative region ([`overpass`])
//! - **Outbreaks** and **wildfires** from ArcGIS feature layers
//!   ([`arcgis`])
//!
//! The [`DataSource`] trait is the seam between the environment and the
//! network. [`HttpDataSource`] is the production implementation;
//! [`FixtureDataSource`] serves preset records from memory.
//!
//! Every fetch is a single round trip returning the full result set. There
//! is no caching, pagination, rate limiting or retry; the first failure is
//! returned as an [`UpstreamError`].

pub mod arcgis;
pub mod error;
pub mod http;
pub mod overpass;
pub mod source;

pub use error::UpstreamError;
pub use http::{HttpDataSource, SourceConfig};
pub use source::{DataSource, FixtureDataSource, FixtureFailure};
