//! Prompt construction.
//!
//! Every request is answered from exactly two turns: a fixed system
//! directive followed by the user's question, unchanged.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Author of a [`PromptTurn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of the instruction sequence sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: Role,
    pub content: String,
}

impl PromptTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

const STANDARD_DIRECTIVE: &str = "You are MedAssist, a trusted medical assistant chatbot. \
     Provide medical information in simple language. \
     This is not a medical diagnosis. Recommend doctor visits when needed.";

const SIGNED_IN_DIRECTIVE: &str = "You are MedAssist, a secure medical assistant available to signed-in users. \
     Explain health questions clearly and in simple language. \
     You do not diagnose conditions or prescribe treatment, and your answers are not a medical diagnosis. \
     Always recommend consulting a qualified doctor, and urge emergency care for severe or sudden symptoms.";

/// Which fixed system directive opens the prompt.
///
/// Parsed from configuration as `standard` or `signed-in`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SystemPrompt {
    /// Persona used when the chat endpoint is open to anyone.
    #[default]
    Standard,
    /// Persona used behind the identity-provider gate.
    SignedIn,
}

impl SystemPrompt {
    pub fn directive(self) -> &'static str {
        match self {
            SystemPrompt::Standard => STANDARD_DIRECTIVE,
            SystemPrompt::SignedIn => SIGNED_IN_DIRECTIVE,
        }
    }
}

/// Build `[system, user]` for an already-trimmed, non-empty message.
pub fn build_prompt(system: SystemPrompt, message: &str) -> [PromptTurn; 2] {
    [PromptTurn::system(system.directive()), PromptTurn::user(message)]
}

// ── Tests ──────────────────────────────────────────────────────────────────────
