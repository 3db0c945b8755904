//! Type-safe identifier wrappers.
//!
//! Stations are numbered with small integers in the frontend payload, so
//! the identifier is a transparent wrapper around [`u32`] and serializes as
//! a bare number.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a transparent newtype wrapper around [`u32`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);
    };
}

define_id! {
    /// Identifier of a responder (fire) station.
    StationId
}
