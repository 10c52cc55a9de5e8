// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use driver_trend::application::trend_service::TrendService;
use driver_trend::infrastructure::config::{load_influx_config, load_trend_config};
use driver_trend::infrastructure::influx_repository::InfluxRepository;
use driver_trend::presentation::app_state::AppState;
use driver_trend::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let influx_config = load_influx_config()?;
    let trend_config = load_trend_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InfluxRepository::new(influx_config.influx));

    // Create services (application layer)
    let trend_service = TrendService::new(
        repository,
        trend_config.trend.clone(),
        trend_config.chart_settings(),
    );

    // Create application state
    let state = Arc::new(AppState { trend_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = trend_config.server.bind.parse()?;
    tracing::info!("Starting driver-trend service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
