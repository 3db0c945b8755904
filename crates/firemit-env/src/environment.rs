//! The minimal episodic-environment contract.
//!
//! An [`Environment`] is driven by alternating [`reset`] and [`step`]
//! calls. `reset` starts an episode and yields an [`Observation`]; `step`
//! applies an action and yields a [`Transition`]. Which calls are legal is
//! tracked by [`EpisodePhase`].
//!
//! [`reset`]: Environment::reset
//! [`step`]: Environment::step

use std::collections::BTreeMap;
use std::future::Future;
use std::num::NonZeroUsize;

use rand::Rng;

use crate::error::EnvError;

/// Lifecycle phase of an environment's current episode.
///
/// ```text
///            reset() ok
/// Terminal ------------> Ready
///    ^                     |
///    +------- step() ------+
/// ```
///
/// A freshly constructed environment is `Terminal`: no episode is in
/// progress and only `reset` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodePhase {
    /// Reset succeeded and the episode awaits its step.
    Ready,
    /// No episode in progress.
    Terminal,
}

impl core::fmt::Display for EpisodePhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// Scalar observation in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation(pub f32);

impl Observation {
    /// The observation every episode starts from.
    pub const INITIAL: Self = Self(0.0);

    /// Return the inner value.
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Result of a single [`Environment::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation after the action.
    pub observation: Observation,
    /// Reward earned by the action.
    pub reward: f32,
    /// Whether the episode ended.
    pub done: bool,
    /// Auxiliary diagnostics.
    pub info: BTreeMap<String, String>,
}

/// A discrete action space `{0, 1, ..., n - 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: NonZeroUsize,
}

impl Discrete {
    /// Create an action space with `n` actions.
    pub const fn new(n: NonZeroUsize) -> Self {
        Self { n }
    }

    /// Number of actions.
    pub const fn n(&self) -> usize {
        self.n.get()
    }

    /// Whether `action` is a member of the space.
    pub const fn contains(&self, action: usize) -> bool {
        action < self.n.get()
    }

    /// Draw a uniformly random action.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n.get())
    }
}

/// An episodic environment exposing `reset` and `step`.
pub trait Environment {
    /// Start a new episode and return its first observation.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Upstream`] if the environment's data could not be
    /// refreshed. The environment is not ready afterwards.
    fn reset(&mut self) -> impl Future<Output = Result<Observation, EnvError>> + Send;

    /// Apply `action` to the current episode.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidState`] if no episode is ready, or
    /// [`EnvError::InvalidAction`] if `action` is outside
    /// [`action_space`](Environment::action_space).
    fn step(&mut self, action: usize) -> Result<Transition, EnvError>;

    /// The set of valid actions.
    fn action_space(&self) -> Discrete;

    /// Current episode phase.
    fn phase(&self) -> EpisodePhase;
}
