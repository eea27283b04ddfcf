//! Server configuration, loaded from environment variables at startup.

use medassist_core::{SystemPrompt, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};

/// Identity-provider settings. Present only when `CLERK_FRONTEND_API` is set,
/// which is also what turns the bearer-token gate on.
#[derive(Clone)]
pub struct ClerkConfig {
    /// Frontend API host used to reach the "current user" endpoint.
    pub frontend_api: String,
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for ClerkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkConfig")
            .field("frontend_api", &self.frontend_api)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Runtime configuration for medassist-server.
///
/// Every field has a default so the server starts without any environment
/// variables set; a missing API key only shows up when the provider rejects
/// the first completion call.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:5001"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Write logs to a daily-rotated file in this directory instead of stdout.
    pub log_dir: Option<String>,

    /// Comma-separated CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,

    /// System directive placed before every user message.
    pub system_prompt: SystemPrompt,

    pub clerk: Option<ClerkConfig>,

    /// Non-secret key handed to the chat page for the browser SDK.
    pub publishable_key: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("log_dir", &self.log_dir)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_swagger", &self.enable_swagger)
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("clerk", &self.clerk)
            .field("publishable_key", &self.publishable_key)
            .finish()
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        let clerk = get("CLERK_FRONTEND_API").map(|frontend_api| ClerkConfig {
            frontend_api,
            secret_key: get("CLERK_SECRET_KEY"),
        });

        let default_prompt = if clerk.is_some() {
            SystemPrompt::SignedIn
        } else {
            SystemPrompt::Standard
        };

        Self {
            bind_address: or("MEDASSIST_BIND", "0.0.0.0:5001"),
            log_level: or("MEDASSIST_LOG", "info"),
            log_json: get("MEDASSIST_LOG_JSON").map(|v| is_truthy(&v)).unwrap_or(false),
            log_dir: get("MEDASSIST_LOG_DIR"),
            cors_allowed_origins: get("MEDASSIST_CORS_ORIGINS"),
            enable_swagger: get("MEDASSIST_ENABLE_SWAGGER").map(|v| is_truthy(&v)).unwrap_or(true),
            openai_api_key: or("OPENAI_API_KEY", ""),
            openai_base_url: or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: or("OPENAI_MODEL", DEFAULT_MODEL),
            system_prompt: get("MEDASSIST_SYSTEM_PROMPT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default_prompt),
            clerk,
            publishable_key: get("CLERK_PUBLISHABLE_KEY"),
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.clerk.is_some()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_address, "0.0.0.0:5001");
        assert_eq!(cfg.model, "gpt-3.5-turbo");
        assert_eq!(cfg.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.openai_api_key, "");
        assert_eq!(cfg.system_prompt, SystemPrompt::Standard);
        assert!(!cfg.auth_enabled());
        assert!(!cfg.log_json);
        assert!(cfg.enable_swagger);
        assert!(cfg.publishable_key.is_none());
    }

    #[test]
    fn frontend_api_turns_on_auth_and_signed_in_prompt() {
        let cfg = config(&[
            ("CLERK_FRONTEND_API", "clerk.example.com"),
            ("CLERK_SECRET_KEY", "sk_test_123"),
            ("CLERK_PUBLISHABLE_KEY", "pk_test_456"),
        ]);
        assert!(cfg.auth_enabled());
        let clerk = cfg.clerk.as_ref().unwrap();
        assert_eq!(clerk.frontend_api, "clerk.example.com");
        assert_eq!(clerk.secret_key.as_deref(), Some("sk_test_123"));
        assert_eq!(cfg.publishable_key.as_deref(), Some("pk_test_456"));
        assert_eq!(cfg.system_prompt, SystemPrompt::SignedIn);
    }

    #[test]
    fn explicit_prompt_overrides_default() {
        let cfg = config(&[
            ("CLERK_FRONTEND_API", "clerk.example.com"),
            ("MEDASSIST_SYSTEM_PROMPT", "standard"),
        ]);
        assert_eq!(cfg.system_prompt, SystemPrompt::Standard);
    }

    #[test]
    fn unparseable_values_fall_back() {
        let cfg = config(&[
            ("MEDASSIST_SYSTEM_PROMPT", "pirate"),
            ("MEDASSIST_LOG_JSON", "yes please"),
            ("MEDASSIST_ENABLE_SWAGGER", "false"),
        ]);
        assert_eq!(cfg.system_prompt, SystemPrompt::Standard);
        assert!(!cfg.log_json);
        assert!(!cfg.enable_swagger);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("CLERK_FRONTEND_API", "  "), ("OPENAI_MODEL", "")]);
        assert!(!cfg.auth_enabled());
        assert_eq!(cfg.model, "gpt-3.5-turbo");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = config(&[
            ("OPENAI_API_KEY", "sk-live-secret"),
            ("CLERK_FRONTEND_API", "clerk.example.com"),
            ("CLERK_SECRET_KEY", "sk_test_hidden"),
        ]);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-live-secret"));
        assert!(!rendered.contains("sk_test_hidden"));
        assert!(rendered.contains("<redacted>"));
    }
}
