//! Error types for the API layer.
//!
//! [`ApiError`] is the outermost error boundary. Every failure beneath it
//! becomes HTTP 500 with a `{"error": <message>}` body via the
//! [`IntoResponse`](axum::response::IntoResponse) implementation; no partial
//! payload is ever returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use firemit_dispatch::DispatchError;

/// Errors that can occur while serving an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The episode run failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "request failed");

        let body = serde_json::json!({ "error": message });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_500_with_message() {
        let err = ApiError::from(DispatchError::GatewayTimeout { timeout_ms: 250 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "episode timed out after 250ms"})
        );
    }

    #[test]
    fn remote_failure_message_is_passed_through() {
        let err = ApiError::from(DispatchError::RemoteExecution(String::from(
            "episode task panicked",
        )));
        assert_eq!(err.to_string(), "remote execution failed: episode task panicked");
    }
}
