//! Browser-facing routes: the root redirect and the chat page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::error::ServerError;
use crate::state::AppState;

pub const CHAT_PAGE_PATH: &str = "/chat";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route(CHAT_PAGE_PATH, get(chat_page))
}

/// `GET /` – always a 302 to the chat page.
pub async fn home() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, CHAT_PAGE_PATH)])
}

/// `GET /chat` – the chat UI, with the publishable identity key if any.
pub async fn chat_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let html = state
        .pages
        .chat(state.config.publishable_key.as_deref(), state.config.auth_enabled())?;
    Ok(Html(html))
}
