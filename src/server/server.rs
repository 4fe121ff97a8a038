use std::io::ErrorKind;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::{error, info};

use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::ScrapeState;
use crate::scrape::coordinator::ScrapeCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub scrape_state: ScrapeState,
}

impl AppState {
    pub fn new(coordinator: Arc<ScrapeCoordinator>) -> Self {
        Self {
            scrape_state: ScrapeState::new(coordinator),
        }
    }
}

pub fn router(settings_config: &SettingsConfig, coordinator: Arc<ScrapeCoordinator>) -> Router {
    let state = AppState::new(coordinator);
    Router::new()
        .merge(state.scrape_state.router(&settings_config.metrics))
        .with_state(state)
}

/// Bind the listener and serve scrapes until Ctrl-C.
///
/// A bind failure is logged and not retried; the call then waits for Ctrl-C
/// so the process stays alive without serving.
pub async fn start(settings_config: &SettingsConfig, coordinator: Arc<ScrapeCoordinator>) -> Result<()> {
    let metrics = get_metrics().await;
    let app = router(settings_config, coordinator);
    let bind_addr = settings_config.server.bind_addr();

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == ErrorKind::AddrInUse {
                error!("cannot listen on {}: port is already in use", bind_addr);
            } else {
                error!("cannot listen on {}: {}", bind_addr, e);
            }
            metrics.up.set(0);
            shutdown_signal().await;
            return Ok(());
        }
    };

    info!("listening on {}{}", bind_addr, settings_config.metrics.path);
    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);
    info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
