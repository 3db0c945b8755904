//! Error types for the data sources.
//!
//! Every upstream failure mode (transport, HTTP status, body decoding,
//! service-reported errors) collapses into [`UpstreamError`]. Nothing here is
//! retried; callers see the first failure.

/// Errors that can occur while fetching from an external data provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The request could not be sent or the body could not be read.
    #[error("{provider} request failed: {message}")]
    Request {
        /// Which provider was being queried.
        provider: &'static str,
        /// Transport error description.
        message: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("{provider} returned {status}: {body}")]
    Status {
        /// Which provider was being queried.
        provider: &'static str,
        /// The HTTP status code.
        status: u16,
        /// The (possibly truncated) response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("{provider} response parse failed: {message}")]
    Malformed {
        /// Which provider was being queried.
        provider: &'static str,
        /// Decoder error description.
        message: String,
    },

    /// The provider answered 2xx but reported an error in the body.
    #[error("{provider} reported error {code}: {message}")]
    Service {
        /// Which provider was being queried.
        provider: &'static str,
        /// Provider error code.
        code: i64,
        /// Provider error message.
        message: String,
    },
}
