//! PRDCASE HTTP Server
//!
//! Provides a REST API turning product requirement documents into test
//! suites.

use anyhow::Result;
use prdcase_server::api::{self, rest::AppState};
use prdcase_server::config::ServerConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!(
        "Loaded configuration: {}:{}, provider={}, model={}, rate limit {}/{}s",
        config.host,
        config.port,
        config.llm.provider_kind(),
        config.llm.model(),
        config.rate_limit.max_requests,
        config.rate_limit.window_secs
    );

    let state = AppState::from_config(&config);
    spawn_rate_limit_purge(&state, Duration::from_secs(config.rate_limit.window_secs.max(60)));

    let app = api::create_router(state, config.body_limit());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/api/health", addr);
    info!("  Generate API: POST http://{}/api/generate", addr);
    info!("  CSV export: POST http://{}/api/generate/csv", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let fallback = format!(
        "prdcase_server={level},prdcase_llm={level},prdcase_parser={level},tower_http=debug",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Periodically forget clients whose window has expired
fn spawn_rate_limit_purge(state: &AppState, every: Duration) {
    let limiter = state.rate_limiter.clone();
    if !limiter.is_enabled() {
        return;
    }
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            limiter.purge_expired();
        }
    });
}
