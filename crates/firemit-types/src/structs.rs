//! Geospatial entity structs served to the deployment map frontend.
//!
//! Covers [`Station`], [`Hydrant`], [`FeatureRecord`], [`RoutePoint`] and the
//! assembled [`EpisodeResult`] payload.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::StationId;

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// A responder station with a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Station {
    /// Station number.
    pub id: StationId,
    /// Latitude in decimal degrees (WGS 84).
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS 84).
    pub longitude: f64,
}

impl Station {
    /// Create a station at the given coordinates.
    pub const fn new(id: u32, latitude: f64, longitude: f64) -> Self {
        Self {
            id: StationId(id),
            latitude,
            longitude,
        }
    }
}

// ---------------------------------------------------------------------------
// Hydrant
// ---------------------------------------------------------------------------

/// A fire hydrant position extracted from map data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Hydrant {
    /// Latitude in decimal degrees (WGS 84).
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS 84).
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// FeatureRecord
// ---------------------------------------------------------------------------

/// A feature returned by a geospatial feature service.
///
/// Used for both wildfire and outbreak records. Both fields are passed
/// through from the provider without shape validation; either may be
/// `null` when the provider omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FeatureRecord {
    /// Provider geometry object (point, polyline, polygon, ...).
    #[serde(default)]
    pub geometry: serde_json::Value,
    /// Provider attribute mapping.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// A wildfire record from the wildfire feature layer.
pub type WildfireRecord = FeatureRecord;

/// An outbreak record from the outbreak feature layer.
pub type OutbreakRecord = FeatureRecord;

// ---------------------------------------------------------------------------
// RoutePoint
// ---------------------------------------------------------------------------

/// A vertex of the deployment route polyline, in the map widget's
/// `{lat, lng}` convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoutePoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl From<&Station> for RoutePoint {
    fn from(station: &Station) -> Self {
        Self {
            lat: station.latitude,
            lng: station.longitude,
        }
    }
}

// ---------------------------------------------------------------------------
// EpisodeResult
// ---------------------------------------------------------------------------

/// Response payload of `GET /api/optimal-deployment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EpisodeResult {
    /// All responder stations of the environment.
    pub stations: Vec<Station>,
    /// Leading hydrants of the last fetch.
    pub hydrants: Vec<Hydrant>,
    /// Leading wildfire records of the last fetch.
    pub wildfires: Vec<WildfireRecord>,
    /// One route point per station, in station order.
    pub route: Vec<RoutePoint>,
}
