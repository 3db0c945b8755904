//! Shared type definitions for the fire mitigation deployment service.
//!
//! Every type that crosses a crate boundary or the HTTP wire lives here.
//! Types flow downstream to `TypeScript` via `ts-rs` for the deployment map
//! frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`structs`] -- Stations, hydrants, feature records and the episode payload

pub mod ids;
pub mod structs;

pub use ids::StationId;
pub use structs::{
    EpisodeResult, FeatureRecord, Hydrant, OutbreakRecord, RoutePoint, Station, WildfireRecord,
};
