//! Overpass QL query construction and response extraction for hydrants.
//!
//! Hydrants are `emergency=fire_hydrant` nodes inside a named administrative
//! area. The interpreter returns `{"elements": [...]}`; only `node` elements
//! carry a position, so ways and relations are skipped.

use firemit_types::Hydrant;
use serde::Deserialize;

use crate::error::UpstreamError;

/// Provider label used in errors and logs.
pub const PROVIDER: &str = "Overpass";

/// Server-side query timeout requested from the interpreter, in seconds.
pub const QUERY_TIMEOUT_SECS: u32 = 25;

/// Build the Overpass QL query selecting all fire hydrants in `region`.
///
/// `region` is the exact `name` tag of an administrative boundary (e.g.
/// `California`). It is interpolated inside a quoted string, so it must not
/// contain `"` or `\`; configuration loading enforces that.
pub fn hydrant_query(region: &str) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n\
         area[\"name\"=\"{region}\"][\"boundary\"=\"administrative\"]->.region;\n\
         node[\"emergency\"=\"fire_hydrant\"](area.region);\n\
         out body;\n"
    )
}

#[derive(Debug, Deserialize)]
struct InterpreterResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Extract hydrant positions from an interpreter response body.
///
/// Element order is preserved. A response without an `elements` array
/// yields no hydrants. Nodes lacking coordinates are dropped.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] if the body is not interpreter JSON.
pub fn parse_hydrants(body: &[u8]) -> Result<Vec<Hydrant>, UpstreamError> {
    let response: InterpreterResponse =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Malformed {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

    let hydrants = response
        .elements
        .into_iter()
        .filter(|e| e.kind == "node")
        .filter_map(|e| match (e.lat, e.lon) {
            (Some(latitude), Some(longitude)) => Some(Hydrant {
                latitude,
                longitude,
            }),
            _ => None,
        })
        .collect();

    Ok(hydrants)
}
