//! Error types for the `firemit-env` crate.

use firemit_sources::UpstreamError;

use crate::environment::EpisodePhase;

/// Errors that can occur while driving an environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    /// A data source fetch failed during `reset`.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// `step` was called outside a `Ready` episode.
    #[error("step requires a ready episode, environment is {phase}; call reset first")]
    InvalidState {
        /// The phase the environment was in.
        phase: EpisodePhase,
    },

    /// The action is outside the discrete action set.
    #[error("action {action} is outside the action space [0, {n})")]
    InvalidAction {
        /// The rejected action.
        action: usize,
        /// Size of the action space.
        n: usize,
    },
}

impl EnvError {
    /// Whether this error is a misuse of the episode protocol rather than
    /// an upstream failure.
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::InvalidAction { .. })
    }
}
