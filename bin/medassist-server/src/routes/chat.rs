//! The chat API: one question in, one model reply out.
//!
//! No history is kept between requests; every call builds a fresh two-turn
//! prompt from the configured system directive and the user's message.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::middleware;
use axum::routing::post;
use axum::{Json, Router};
use medassist_core::build_prompt;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::middleware::auth;
use crate::schemas::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// Reply for a missing or blank message. Not an error.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a valid medical question.";

#[derive(OpenApi)]
#[openapi(paths(api_chat), components(schemas(ChatRequest, ChatResponse)))]
pub struct ChatApi;

/// Routes nested under `/api`, behind the bearer-token gate when configured.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(api_chat))
        .route_layer(middleware::from_fn_with_state(state, auth::require_session))
}

/// Answer a medical question (`POST /api/chat`).
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply, or guidance when the message is blank", body = ChatResponse),
        (status = 401, description = "Missing or malformed bearer token", body = ChatResponse),
        (status = 403, description = "Invalid or expired session token", body = ChatResponse),
        (status = 500, description = "Completion provider failure", body = ChatResponse),
    ),
    security((), ("bearer" = []))
)]
pub async fn api_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = body.map_err(|e| ServerError::MalformedBody(e.body_text()))?;

    let Some(question) = req.question() else {
        debug!("blank chat message; asking for a question");
        return Ok(Json(ChatResponse::new(EMPTY_MESSAGE_REPLY)));
    };

    let turns = build_prompt(state.config.system_prompt, question);
    let reply = state.completion.complete(&turns).await?;

    info!(reply = %reply, "AI reply");
    Ok(Json(ChatResponse::new(reply)))
}
