use prometheus::{Gauge, HistogramOpts, HistogramVec, Histogram, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::utils::constants::SELF_METRICS_PREFIX;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the exporter's own `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()
    })
    .await
}

/// Operational metrics of the exporter itself. Device samples are rendered
/// separately per scrape and never live in this registry.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Resource fetch metrics
    pub resource_fetch_requests: IntCounterVec,
    pub resource_fetch_failures: IntCounterVec,
    pub resource_fetch_duration: HistogramVec,
    pub resource_samples: IntGaugeVec,

    // Token metrics
    pub token_refreshes: IntCounterVec,
    pub token_expires_in: IntGauge,
    pub token_last_refresh: Gauge,

    // Scrape metrics
    pub scrapes: IntCounter,
    pub scrape_duration: Histogram,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        Arc::new(Self::build())
    }

    fn build() -> Self {
        let registry = Registry::new_custom(Some(SELF_METRICS_PREFIX.into()), None)
            .unwrap_or_default();

        let metrics = Self {
            // Resources
            resource_fetch_requests: IntCounterVec::new(Opts::new("resource_fetch_requests_total", "Total fetch attempts by resource class"), &["resource"]).unwrap(),
            resource_fetch_failures: IntCounterVec::new(Opts::new("resource_fetch_failures_total", "Fetch failures by resource class and reason"), &["resource", "reason"]).unwrap(),
            resource_fetch_duration: HistogramVec::new(HistogramOpts::new("resource_fetch_duration_seconds", "Fetch duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]), &["resource"]).unwrap(),
            resource_samples: IntGaugeVec::new(Opts::new("resource_samples", "Samples produced by resource class in the last scrape"), &["resource"]).unwrap(),

            // Token
            token_refreshes: IntCounterVec::new(Opts::new("token_refresh_total", "Token exchange attempts by outcome"), &["outcome"]).unwrap(),
            token_expires_in: IntGauge::new("token_expires_in_seconds", "Seconds until the access token expires, negative when overdue").unwrap(),
            token_last_refresh: Gauge::new("token_last_refresh_timestamp_seconds", "Unix time of the last successful token exchange").unwrap(),

            // Scrape
            scrapes: IntCounter::new("scrapes_total", "Total scrape cycles").unwrap(),
            scrape_duration: Histogram::with_opts(HistogramOpts::new("scrape_duration_seconds", "Scrape cycle duration seconds").buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0])).unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),
            up: IntGauge::new("up", "1 if the exporter is serving").unwrap(),

            registry,
        };

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.resource_fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.resource_fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.resource_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.resource_samples.clone())).unwrap();
        reg.register(Box::new(metrics.token_refreshes.clone())).unwrap();
        reg.register(Box::new(metrics.token_expires_in.clone())).unwrap();
        reg.register(Box::new(metrics.token_last_refresh.clone())).unwrap();
        reg.register(Box::new(metrics.scrapes.clone())).unwrap();
        reg.register(Box::new(metrics.scrape_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
