use std::net::SocketAddr;

use anyhow::Context;
use cakebot::config::{self, Config};
use cakebot::github::OctocrabClient;
use cakebot::server::{AppState, build_router};
use cakebot::sync::BulkSync;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let token = match config::github_token() {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Missing GitHub credentials");
            std::process::exit(1);
        }
    };
    let client = OctocrabClient::from_token(token).context("building GitHub client")?;

    let report = BulkSync::new(client.clone(), &config.github_org, config.sync_options())
        .run()
        .await;
    if !report.is_clean() {
        tracing::warn!(failures = report.failures(), "Bulk sync finished with failures");
    }

    if config.port == 0 {
        tracing::info!("No port configured; exiting after bulk sync");
        return Ok(());
    }

    let app = build_router(AppState::new(client, config.webhook_secret_bytes()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
