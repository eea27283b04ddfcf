//! medassist-core – the outbound half of the MedAssist backend.
//!
//! - [`prompt`] turns a user's question into the two-turn instruction
//!   sequence sent to the model.
//! - [`completion`] calls a hosted OpenAI-compatible chat-completion API and
//!   pulls the generated text out of the response envelope.
//! - [`auth`] checks a bearer token against the identity provider's
//!   "current user" endpoint.
//!
//! Nothing here knows about the HTTP server; the server crate holds the
//! clients behind the [`CompletionClient`] and [`TokenVerifier`] traits.

pub mod auth;
pub mod completion;
pub mod error;
pub mod prompt;

pub use auth::{ClerkVerifier, TokenVerifier};
pub use completion::{CompletionClient, OpenAiClient, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
pub use error::CompletionError;
pub use prompt::{build_prompt, PromptTurn, Role, SystemPrompt};
