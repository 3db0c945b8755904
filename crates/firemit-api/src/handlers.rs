//! REST API endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/optimal-deployment` | Run one episode, return stations, hydrants, wildfires and route |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use firemit_sources::DataSource;
use firemit_types::EpisodeResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Run one episode and return its payload.
///
/// Waits for the whole run; there are no query parameters and no request
/// body.
pub async fn optimal_deployment<S>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<EpisodeResult>, ApiError>
where
    S: DataSource + Clone + 'static,
{
    let result = state.dispatcher.run_once().await?;
    Ok(Json(result))
}
