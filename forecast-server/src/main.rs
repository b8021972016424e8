//! Binary crate for the forecast proxy server.
//!
//! This crate focuses on:
//! - Loading process configuration
//! - Wiring the HTTP routes
//! - Translating resolver errors into the JSON error envelope

use anyhow::Context;
use forecast_core::{Config, ForecastResolver};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    if config.api_key.as_deref().unwrap_or_default().is_empty() {
        warn!("CWA_API_KEY is not set; forecast requests will fail until it is configured");
    }

    let resolver = ForecastResolver::new(&config);
    let app = routes::router(resolver);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr = %addr, environment = %config.environment, "forecast proxy listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
