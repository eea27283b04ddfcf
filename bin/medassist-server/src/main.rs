//! medassist-server – entry point.
//!
//! Startup order:
//! 1. Load `.env` (if present) and parse configuration from the environment.
//! 2. Initialise structured tracing (JSON or pretty, stdout or rolling file).
//! 3. Build the completion client and, when configured, the token verifier.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod pages;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use medassist_core::{ClerkVerifier, CompletionClient, OpenAiClient, TokenVerifier};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::pages::Pages;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let dotenv = dotenvy::dotenv();
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let _log_guard = init_tracing(&cfg);

    info!(version = env!("CARGO_PKG_VERSION"), "medassist-server starting");
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to read .env; continuing with process environment"),
    }

    // ── 3. Providers ───────────────────────────────────────────────────────────
    if cfg.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail at the provider");
    }
    let openai = OpenAiClient::new(&cfg.openai_api_key, &cfg.openai_base_url, &cfg.model);
    info!(model = %openai.model(), base_url = %cfg.openai_base_url, "completion client ready");
    let completion: Arc<dyn CompletionClient> = Arc::new(openai);

    let verifier: Option<Arc<dyn TokenVerifier>> = match &cfg.clerk {
        Some(clerk) => {
            if clerk.secret_key.is_none() {
                warn!("CLERK_FRONTEND_API is set without CLERK_SECRET_KEY");
            }
            let verifier = ClerkVerifier::new(&clerk.frontend_api);
            info!(endpoint = %verifier.me_url(), "bearer-token gate enabled for /api/chat");
            Some(Arc::new(verifier))
        }
        None => {
            info!("bearer-token gate disabled; /api/chat is open");
            None
        }
    };
    info!(system_prompt = %cfg.system_prompt, "prompt policy selected");

    // ── 4. Shared application state ────────────────────────────────────────────
    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        completion,
        verifier,
        pages: Arc::new(Pages::new()?),
    });

    // ── 5. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(Arc::clone(&state));
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("medassist-server stopped");
    Ok(())
}

/// Install the global subscriber. The returned guard flushes buffered log
/// lines on drop and must live until the end of `main`.
fn init_tracing(cfg: &Config) -> WorkerGuard {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = log_filter(rust_log.as_deref(), &cfg.log_level);

    let (writer, guard) = match &cfg.log_dir {
        Some(dir) => {
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "medassist.log"))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(cfg.log_dir.is_none())
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    guard
}

/// A valid `RUST_LOG` wins; otherwise `MEDASSIST_LOG`, warning loudly and
/// falling back to `info` if that is not a valid filter expression.
fn log_filter(rust_log: Option<&str>, configured: &str) -> EnvFilter {
    if let Some(f) = rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.parse::<EnvFilter>().ok())
    {
        return f;
    }

    match configured.parse::<EnvFilter>() {
        Ok(f) => f,
        Err(e) => {
            eprintln!(
                "WARN: MEDASSIST_LOG='{}' is not a valid tracing filter ({}); \
                 falling back to 'info'",
                configured, e
            );
            EnvFilter::new("info")
        }
    }
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e)    => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c   => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn configured_filter_used_without_rust_log() {
        assert_eq!(log_filter(None, "debug").to_string(), "debug");
        assert_eq!(log_filter(Some("  "), "debug").to_string(), "debug");
    }

    #[test]
    fn valid_rust_log_wins() {
        assert_eq!(log_filter(Some("warn"), "debug").to_string(), "warn");
    }

    #[test]
    fn invalid_rust_log_is_ignored() {
        assert_eq!(log_filter(Some("medassist=loud"), "debug").to_string(), "debug");
    }

    #[test]
    fn invalid_configured_filter_falls_back_to_info() {
        assert_eq!(log_filter(None, "medassist=loud").to_string(), "info");
    }
}
