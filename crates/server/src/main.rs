//! color-advisor-server, entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON in production, pretty in dev).
//! 3. Build the model provider and the advisor.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

#[macro_use]
extern crate tracing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use color_advisor_core::{Advisor, AdvisorBuilder, RetryPolicy};
use color_advisor_gemini_model::{GeminiConfigBuilder, GeminiProvider};
use color_advisor_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use color_advisor_server::auth::TokenVerifier;
use color_advisor_server::store::MemorySeasonStore;
use color_advisor_server::{AppState, Config, ProviderKind, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: COLOR_ADVISOR_LOG='{}' is not a valid tracing filter \
                     ({}); falling back to 'info'",
                    cfg.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);
    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "color-advisor-server starting");
    debug!("configuration: {cfg:?}");

    let advisor = build_advisor(&cfg).await?;
    info!(provider = %cfg.provider, "advisor ready");

    if cfg.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set, verifying tokens with the demo secret");
    }
    let state = Arc::new(AppState {
        advisor,
        store: Arc::new(MemorySeasonStore::new()),
        verifier: TokenVerifier::new(&cfg.jwt_secret),
    });

    let app = routes::build(state);
    let addr: SocketAddr = cfg
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address '{}'", cfg.bind_address))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("color-advisor-server stopped");
    Ok(())
}

async fn build_advisor(cfg: &Config) -> anyhow::Result<Advisor> {
    let api_key = cfg.api_key.clone().with_context(|| {
        format!("{} environment variable is not set", cfg.provider.api_key_var())
    })?;

    let builder = match cfg.provider {
        ProviderKind::Gemini => {
            let mut config = GeminiConfigBuilder::with_api_key(api_key);
            if let Some(model) = &cfg.model {
                config = config.with_model(model);
            }
            if let Some(base_url) = &cfg.base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(timeout) = cfg.timeout {
                config = config.with_timeout(timeout);
            }
            let config = config.build();
            info!(model = config.model(), "using Gemini");
            AdvisorBuilder::with_model_provider(GeminiProvider::new(config))
        }
        ProviderKind::OpenAI => {
            let mut config = OpenAIConfigBuilder::with_api_key(api_key);
            if let Some(model) = &cfg.model {
                config = config.with_model(model);
            }
            if let Some(base_url) = &cfg.base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(timeout) = cfg.timeout {
                config = config.with_timeout(timeout);
            }
            let config = config.build();
            info!(model = config.model(), "using an OpenAI-compatible endpoint");
            AdvisorBuilder::with_model_provider(OpenAIProvider::new(config))
        }
    };

    let mut builder = builder.with_retry_policy(RetryPolicy::new(
        cfg.retry_attempts,
        cfg.retry_delay,
    ));
    if let Some(path) = &cfg.persona_file {
        let persona = tokio::fs::read_to_string(path).await.with_context(|| {
            format!("failed to read persona from {}", path.display())
        })?;
        info!(path = %path.display(), "loaded persona");
        builder = builder.with_persona(persona);
    }
    Ok(builder.build())
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
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
