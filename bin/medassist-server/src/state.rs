//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use medassist_core::{CompletionClient, TokenVerifier};

use crate::config::Config;
use crate::pages::Pages;

/// State shared across all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Hosted chat-completion provider.
    pub completion: Arc<dyn CompletionClient>,
    /// Bearer-token gate for `/api/chat`; `None` leaves the endpoint open.
    pub verifier: Option<Arc<dyn TokenVerifier>>,
    /// Compiled page templates.
    pub pages: Arc<Pages>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("auth_gate", &self.verifier.is_some())
            .finish_non_exhaustive()
    }
}
