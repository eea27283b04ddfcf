use thiserror::Error;

/// Errors returned by a [`crate::CompletionClient`].
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered 2xx but the body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
