//! Episode dispatcher.
//!
//! [`Dispatcher::run_once`] builds a fresh [`FireMitigationEnv`], resets it,
//! takes one uniformly random action and packages the environment's
//! entities into an [`EpisodeResult`]. The episode runs on its own Tokio
//! task so a panic inside it is contained and reported as
//! [`DispatchError::RemoteExecution`] instead of unwinding into the caller.
//!
//! The task is aborted when the run times out or when the `run_once`
//! future is dropped before completing, e.g. because the HTTP client went
//! away. Nothing is retried. The payload is trimmed to [`MAX_HYDRANTS`] hydrants
//! and [`MAX_WILDFIRES`] wildfire records.

use std::time::{Duration, Instant};

use firemit_env::{Environment, FireMitigationEnv};
use firemit_sources::DataSource;
use firemit_types::{EpisodeResult, Hydrant, RoutePoint, Station, WildfireRecord};
use tokio::task::{AbortHandle, JoinError};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::DispatchError;

/// Most hydrants included in an [`EpisodeResult`].
pub const MAX_HYDRANTS: usize = 10;

/// Most wildfire records included in an [`EpisodeResult`].
pub const MAX_WILDFIRES: usize = 5;

/// Runs single episodes against a data source.
///
/// Each run gets its own environment built over a clone of the source, so
/// concurrent runs share nothing mutable.
#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    source: S,
    run_timeout: Duration,
}

impl<S> Dispatcher<S>
where
    S: DataSource + Clone + 'static,
{
    /// Create a dispatcher whose runs are bounded by `run_timeout`.
    pub const fn new(source: S, run_timeout: Duration) -> Self {
        Self {
            source,
            run_timeout,
        }
    }

    /// Run one episode and return its payload.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Env`] if reset or step failed, including upstream
    ///   fetch failures
    /// - [`DispatchError::RemoteExecution`] if the episode task panicked
    /// - [`DispatchError::GatewayTimeout`] if the run exceeded its deadline
    pub async fn run_once(&self) -> Result<EpisodeResult, DispatchError> {
        let started = Instant::now();
        let handle = tokio::spawn(run_episode(self.source.clone()));
        let _guard = AbortOnDrop(handle.abort_handle());

        let outcome = match timeout(self.run_timeout, handle).await {
            Ok(Ok(result)) => result.map_err(DispatchError::from),
            Ok(Err(e)) => Err(remote_failure(&e)),
            Err(_elapsed) => Err(DispatchError::GatewayTimeout {
                timeout_ms: duration_ms(self.run_timeout),
            }),
        };

        let elapsed_ms = duration_ms(started.elapsed());
        match &outcome {
            Ok(result) => info!(
                elapsed_ms,
                hydrants = result.hydrants.len(),
                wildfires = result.wildfires.len(),
                "episode dispatched"
            ),
            Err(e) => warn!(elapsed_ms, error = %e, "episode dispatch failed"),
        }
        outcome
    }
}

/// Aborts the episode task when dropped. A no-op once the task has finished.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Body of the isolated episode task.
async fn run_episode<S: DataSource>(source: S) -> Result<EpisodeResult, firemit_env::EnvError> {
    let mut env = FireMitigationEnv::new(source);
    env.reset().await?;

    let action = env.action_space().sample(&mut rand::rng());
    let transition = env.step(action)?;
    info!(
        action,
        reward = transition.reward,
        done = transition.done,
        "episode finished"
    );

    Ok(assemble(env.stations(), env.hydrants(), env.wildfires()))
}

/// Build the response payload from environment entities.
///
/// Hydrants and wildfires keep their fetch order and are cut to
/// [`MAX_HYDRANTS`] and [`MAX_WILDFIRES`]. The route has one point per
/// station, in station order.
pub fn assemble(
    stations: &[Station],
    hydrants: &[Hydrant],
    wildfires: &[WildfireRecord],
) -> EpisodeResult {
    EpisodeResult {
        stations: stations.to_vec(),
        hydrants: hydrants.iter().take(MAX_HYDRANTS).copied().collect(),
        wildfires: wildfires.iter().take(MAX_WILDFIRES).cloned().collect(),
        route: stations.iter().map(RoutePoint::from).collect(),
    }
}

fn remote_failure(e: &JoinError) -> DispatchError {
    if e.is_panic() {
        DispatchError::RemoteExecution(String::from("episode task panicked"))
    } else {
        DispatchError::RemoteExecution(e.to_string())
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
