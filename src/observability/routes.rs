use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::{extract::State, response::IntoResponse, response::Response, Router};
use http::{header::CONTENT_TYPE, StatusCode};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::settings::MetricsConfig;
use crate::metrics::render::{encode_text, gather_samples};
use crate::observability::metrics::get_metrics;
use crate::scrape::coordinator::ScrapeCoordinator;
use crate::server::server::AppState;

static TEXT_FORMAT: &str = "text/plain; version=0.0.4";

#[derive(Clone)]
pub struct ScrapeState {
    pub coordinator: Arc<ScrapeCoordinator>,
    // one scrape in flight at a time
    gate: Arc<Mutex<()>>,
}

impl ScrapeState {
    pub fn new(coordinator: Arc<ScrapeCoordinator>) -> Self {
        Self {
            coordinator,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn router(&self, metrics_config: &MetricsConfig) -> Router<AppState> {
        info!("served path: {}", metrics_config.path);
        Router::new().route(metrics_config.path.as_str(), get(scrape))
    }

    /// Run a full scrape and render device samples followed by the
    /// exporter's own metrics.
    pub async fn render(&self) -> Result<String> {
        let _gate = self.gate.lock().await;
        let report = self.coordinator.collect().await;

        let metrics = get_metrics().await;
        metrics
            .token_expires_in
            .set(self.coordinator.authenticator().time_remaining().await);

        let mut families = gather_samples(&report.samples, self.coordinator.descriptors())?;
        families.extend(metrics.registry.gather());
        encode_text(&families)
    }
}

async fn scrape(State(state): State<AppState>) -> Response {
    match state.scrape_state.render().await {
        Ok(body) => (StatusCode::OK, [(CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!("failed to render scrape: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render metrics").into_response()
        }
    }
}
