//! Bearer-token verification against the identity provider.
//!
//! Verification fails closed: a rejected token, an unexpected status and a
//! network error all come back as `false`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Decides whether a bearer token belongs to a live session.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}

/// Verifies Clerk session tokens through the frontend API's `/v1/me`.
#[derive(Debug, Clone)]
pub struct ClerkVerifier {
    client: Client,
    me_url: String,
}

impl ClerkVerifier {
    /// `frontend_api` is the Clerk frontend API host (e.g.
    /// `clerk.example.com`). A value that already carries a scheme is used
    /// verbatim.
    pub fn new(frontend_api: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("medassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client, me_url: me_url(frontend_api) }
    }

    pub fn me_url(&self) -> &str {
        &self.me_url
    }
}

fn me_url(frontend_api: &str) -> String {
    let base = frontend_api.trim().trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{base}/v1/me")
    } else {
        format!("https://{base}/v1/me")
    }
}

#[async_trait]
impl TokenVerifier for ClerkVerifier {
    async fn verify(&self, token: &str) -> bool {
        match self.client.get(&self.me_url).bearer_auth(token).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                debug!(status = resp.status().as_u16(), "identity provider rejected token");
                false
            }
            Err(e) => {
                warn!(error = %e, url = %self.me_url, "token verification request failed");
                false
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(me_url("clerk.example.com"), "https://clerk.example.com/v1/me");
        assert_eq!(me_url(" clerk.example.com/ "), "https://clerk.example.com/v1/me");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(me_url("http://127.0.0.1:4000"), "http://127.0.0.1:4000/v1/me");
    }

    #[tokio::test]
    async fn success_status_is_valid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .and(header("authorization", "Bearer good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "user_1" })))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = ClerkVerifier::new(&server.uri());
        assert!(verifier.verify("good-token").await);
    }

    #[tokio::test]
    async fn rejected_token_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = ClerkVerifier::new(&server.uri());
        assert!(!verifier.verify("expired").await);
    }

    #[tokio::test]
    async fn provider_outage_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let verifier = ClerkVerifier::new(&server.uri());
        assert!(!verifier.verify("any").await);
    }

    #[tokio::test]
    async fn unreachable_provider_fails_closed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let verifier = ClerkVerifier::new(&format!("http://{addr}"));
        assert!(!verifier.verify("any").await);
    }
}
