//! Unified server error type.
//!
//! Every fallible handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`]. All error bodies share the chat reply
//! shape `{"reply": "..."}` so the chat page can print them as-is.
//!
//! Internal errors are logged with full detail; the caller only ever sees
//! the fixed internal-error reply.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medassist_core::CompletionError;
use thiserror::Error;
use tracing::error;

use crate::schemas::chat::ChatResponse;

pub const UNAUTHORIZED_REPLY: &str = "Unauthorized — No Clerk token provided.";
pub const FORBIDDEN_REPLY: &str = "Invalid or expired Clerk token.";
pub const INTERNAL_ERROR_REPLY: &str = "Internal server error";

/// All errors that can occur in the medassist-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No `Authorization` header, or one not of the form `Bearer <token>`.
    #[error("missing or malformed bearer token")]
    Unauthorized,

    /// The identity provider did not accept the token.
    #[error("token rejected by identity provider")]
    Forbidden,

    /// The completion provider call failed.
    #[error("completion provider error: {0}")]
    Upstream(#[from] CompletionError),

    /// The request body could not be read as a chat request.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The chat page template failed to render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, reply) = match &self {
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_REPLY),
            ServerError::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_REPLY),

            ServerError::Upstream(e) => {
                error!(error = %e, "completion provider error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_REPLY)
            }
            ServerError::MalformedBody(m) => {
                error!(message = %m, "unreadable chat request body");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_REPLY)
            }
            ServerError::Template(e) => {
                error!(error = ?e, "chat page render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_REPLY)
            }
        };
        (status, Json(ChatResponse::new(reply))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
