// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::bootstrap_service::ChartBootstrapService;
use crate::application::work_service::WorkService;
use crate::infrastructure::config::{build_catalog, load_dashboard_config};
use crate::infrastructure::http_source::HttpPerformanceSource;
use crate::infrastructure::work_client::HttpWorkPublisher;
use crate::presentation::app_state::AppState;
use crate::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let timeout = config.backend.timeout();

    // Create adapters (infrastructure layer)
    let source = Arc::new(HttpPerformanceSource::new(config.backend.base_url.clone(), timeout)?);
    let publisher = Arc::new(HttpWorkPublisher::new(&config.backend.base_url, timeout)?);

    // Create services (application layer)
    let bootstrap_service = ChartBootstrapService::new(source, build_catalog(&config.charts))
        .with_fetch_timeout(timeout);
    let work_service = WorkService::new(publisher);

    let state = Arc::new(AppState {
        bootstrap_service,
        work_service,
    });

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        backend = %config.backend.base_url,
        "Starting performance-charts service on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
