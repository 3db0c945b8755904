//! The fire mitigation environment.
//!
//! [`FireMitigationEnv`] pairs a fixed set of responder [`Station`]s with
//! snapshots of hydrant, wildfire and outbreak records pulled from a
//! [`DataSource`]. Episodes are single-shot: one `reset`, one `step`, done.
//!
//! The observation and reward are placeholders. Neither depends on the
//! fetched records; the environment exists so the deployment endpoint has
//! a reset/step loop to drive and a snapshot to report.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use firemit_sources::DataSource;
use firemit_types::{Hydrant, OutbreakRecord, Station, WildfireRecord};
use tracing::debug;

use crate::environment::{Discrete, Environment, EpisodePhase, Observation, Transition};
use crate::error::EnvError;

/// Number of discrete actions.
pub const ACTION_COUNT: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// The action that earns [`REWARD_HIT`].
pub const REWARDED_ACTION: usize = 1;

/// Reward for [`REWARDED_ACTION`].
pub const REWARD_HIT: f32 = 1.0;

/// Reward for every other action.
pub const REWARD_MISS: f32 = 0.0;

/// The three responder stations every environment starts with.
pub const STATIONS: [Station; 3] = [
    Station::new(1, 34.0522, -118.2437),
    Station::new(2, 34.0407, -118.2468),
    Station::new(3, 34.0736, -118.2400),
];

/// Single-shot environment over fire stations and fetched hazard data.
#[derive(Debug)]
pub struct FireMitigationEnv<S> {
    source: S,
    stations: Vec<Station>,
    hydrants: Vec<Hydrant>,
    wildfires: Vec<WildfireRecord>,
    outbreaks: Vec<OutbreakRecord>,
    phase: EpisodePhase,
}

impl<S: DataSource> FireMitigationEnv<S> {
    /// Create an environment over `source` with the fixed [`STATIONS`].
    ///
    /// No data is fetched until the first [`reset`](Environment::reset).
    pub fn new(source: S) -> Self {
        Self {
            source,
            stations: STATIONS.to_vec(),
            hydrants: Vec::new(),
            wildfires: Vec::new(),
            outbreaks: Vec::new(),
            phase: EpisodePhase::Terminal,
        }
    }

    /// The responder stations, in id order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Hydrants from the last successful reset.
    pub fn hydrants(&self) -> &[Hydrant] {
        &self.hydrants
    }

    /// Wildfire records from the last successful reset.
    pub fn wildfires(&self) -> &[WildfireRecord] {
        &self.wildfires
    }

    /// Outbreak records from the last successful reset.
    pub fn outbreaks(&self) -> &[OutbreakRecord] {
        &self.outbreaks
    }
}

impl<S: DataSource> Environment for FireMitigationEnv<S> {
    async fn reset(&mut self) -> Result<Observation, EnvError> {
        self.phase = EpisodePhase::Terminal;

        // All three sets are replaced together or not at all.
        let (hydrants, outbreaks, wildfires) = tokio::try_join!(
            self.source.fetch_hydrants(),
            self.source.fetch_outbreaks(),
            self.source.fetch_wildfires(),
        )?;

        debug!(
            hydrants = hydrants.len(),
            outbreaks = outbreaks.len(),
            wildfires = wildfires.len(),
            "environment data refreshed"
        );

        self.hydrants = hydrants;
        self.outbreaks = outbreaks;
        self.wildfires = wildfires;
        self.phase = EpisodePhase::Ready;

        Ok(Observation::INITIAL)
    }

    fn step(&mut self, action: usize) -> Result<Transition, EnvError> {
        if self.phase != EpisodePhase::Ready {
            return Err(EnvError::InvalidState { phase: self.phase });
        }
        let space = self.action_space();
        if !space.contains(action) {
            return Err(EnvError::InvalidAction {
                action,
                n: space.n(),
            });
        }

        let reward = if action == REWARDED_ACTION {
            REWARD_HIT
        } else {
            REWARD_MISS
        };
        self.phase = EpisodePhase::Terminal;
        debug!(action, reward, "episode stepped");

        Ok(Transition {
            observation: Observation::INITIAL,
            reward,
            done: true,
            info: BTreeMap::new(),
        })
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(ACTION_COUNT)
    }

    fn phase(&self) -> EpisodePhase {
        self.phase
    }
}
