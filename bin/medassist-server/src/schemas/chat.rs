use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's question. Missing, empty and whitespace-only values get a
    /// guidance reply instead of a completion.
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The trimmed message, or `None` when there is nothing to ask.
    pub fn question(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Response body for `POST /api/chat`, on success and on failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Model output, guidance text, or a fixed error message.
    pub reply: String,
}

impl ChatResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(json: &str) -> ChatRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn question_is_trimmed() {
        assert_eq!(request(r#"{"message": "  sore throat \n"}"#).question(), Some("sore throat"));
    }

    #[test]
    fn blank_or_missing_message_has_no_question() {
        assert_eq!(request(r#"{}"#).question(), None);
        assert_eq!(request(r#"{"message": null}"#).question(), None);
        assert_eq!(request(r#"{"message": ""}"#).question(), None);
        assert_eq!(request(r#"{"message": " \t "}"#).question(), None);
    }

    #[test]
    fn non_string_message_is_rejected() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"message": 42}"#).is_err());
    }
}
