//! Episodic fire mitigation environment.
//!
//! This crate defines the [`Environment`] contract (`reset` / `step`) and
//! its one implementation, [`FireMitigationEnv`], which holds three fixed
//! responder stations plus hydrant, wildfire and outbreak snapshots
//! refreshed from a [`DataSource`](firemit_sources::DataSource) on every
//! reset.
//!
//! # Episode protocol
//!
//! Episodes are single-shot. After a successful `reset` the environment is
//! [`EpisodePhase::Ready`]; the first `step` always ends the episode
//! (`done == true`) and returns it to [`EpisodePhase::Terminal`]. Stepping
//! a terminal environment is an [`EnvError::InvalidState`].

pub mod environment;
pub mod error;
pub mod fire;

pub use environment::{Discrete, Environment, EpisodePhase, Observation, Transition};
pub use error::EnvError;
pub use fire::{ACTION_COUNT, FireMitigationEnv, REWARDED_ACTION, STATIONS};
