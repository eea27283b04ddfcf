//! Hosted chat-completion client.
//!
//! [`OpenAiClient`] speaks the OpenAI `POST /chat/completions` protocol. One
//! attempt per call: no retry, no backoff, and no timeout beyond whatever
//! reqwest applies by default.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CompletionError;
use crate::prompt::PromptTurn;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Produces the model's reply for an instruction sequence.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, turns: &[PromptTurn]) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [PromptTurn],
}

/// Client for any OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .user_agent(concat!("medassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, turns: &[PromptTurn]) -> Result<String, CompletionError> {
        let body = ChatCompletionBody { model: &self.model, messages: turns };

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status { status: status.as_u16(), body: text });
        }

        let envelope: Value = serde_json::from_str(&text)?;
        debug!(model = %self.model, "completion envelope received");
        Ok(reply_text(&envelope))
    }
}

/// The generated text at `choices[0].message.content`, if it is a string.
pub fn message_content(envelope: &Value) -> Option<&str> {
    envelope
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

/// [`message_content`], or the JSON rendering of the whole envelope when the
/// provider's response shape drifted.
pub fn reply_text(envelope: &Value) -> String {
    match message_content(envelope) {
        Some(content) => content.to_owned(),
        None => envelope.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
