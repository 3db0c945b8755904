//! Error types for the dispatcher.

use firemit_env::EnvError;

/// Errors that can occur while running an episode.
///
/// Environment and upstream failures pass through unchanged via
/// [`DispatchError::Env`]; the other variants describe failures of the
/// execution context itself.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The environment (or a data source beneath it) failed.
    #[error(transparent)]
    Env(#[from] EnvError),

    /// The episode task panicked or was cancelled.
    #[error("remote execution failed: {0}")]
    RemoteExecution(String),

    /// The episode did not finish before the deadline.
    #[error("episode timed out after {timeout_ms}ms")]
    GatewayTimeout {
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },
}
