//! Server-rendered HTML pages.

use minijinja::{context, Environment};

const CHAT_TEMPLATE: &str = "chat.html";

/// Template environment, compiled once at startup.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CHAT_TEMPLATE, include_str!("../templates/chat.html"))?;
        Ok(Self { env })
    }

    /// Render the chat page. `publishable_key` is the identity provider's
    /// client-side key; it is safe to embed in HTML.
    pub fn chat(
        &self,
        publishable_key: Option<&str>,
        auth_enabled: bool,
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template(CHAT_TEMPLATE)?
            .render(context! { publishable_key, auth_enabled })
    }
}
