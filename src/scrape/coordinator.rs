use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::auth::authenticator::{Authenticator, RefreshOutcome};
use crate::central::client::CentralClient;
use crate::metrics::descriptors::DescriptorTable;
use crate::metrics::sample::MetricSample;
use crate::observability::metrics::get_metrics;
use crate::resources::access_points::AccessPoints;
use crate::resources::fetcher::{fetch_class, FetchContext, FetchOutcome};
use crate::resources::mobility_controllers::MobilityControllers;
use crate::resources::sites::Sites;
use crate::resources::switches::Switches;
use crate::resources::top_clients::TopClients;
use crate::resources::ResourceClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Collecting,
}

/// Result of one scrape. Samples are ordered by resource class, then by the
/// order records appeared in each upstream response.
#[derive(Debug)]
pub struct ScrapeReport {
    pub refresh: RefreshOutcome,
    pub samples: Vec<MetricSample>,
    pub succeeded: Vec<ResourceClass>,
    pub failed: Vec<(ResourceClass, &'static str)>,
}

impl ScrapeReport {
    fn new(refresh: RefreshOutcome) -> Self {
        Self { refresh, samples: Vec::new(), succeeded: Vec::new(), failed: Vec::new() }
    }

    fn absorb(&mut self, outcome: FetchOutcome) {
        match outcome.result {
            Ok(mut samples) => {
                self.succeeded.push(outcome.class);
                self.samples.append(&mut samples);
            }
            Err(err) => self.failed.push((outcome.class, err.reason())),
        }
    }
}

/// Resets the phase even if the scrape future is dropped mid-way.
struct CollectingGuard<'a>(&'a AtomicBool);

impl<'a> CollectingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for CollectingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives one scrape: token check, then every resource class concurrently.
#[derive(Debug)]
pub struct ScrapeCoordinator {
    authenticator: Authenticator,
    client: CentralClient,
    descriptors: Arc<DescriptorTable>,
    collecting: AtomicBool,
}

impl ScrapeCoordinator {
    pub fn new(authenticator: Authenticator, client: CentralClient, descriptors: Arc<DescriptorTable>) -> Self {
        Self { authenticator, client, descriptors, collecting: AtomicBool::new(false) }
    }

    pub fn descriptors(&self) -> &DescriptorTable {
        &self.descriptors
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn phase(&self) -> Phase {
        if self.collecting.load(Ordering::SeqCst) {
            Phase::Collecting
        } else {
            Phase::Idle
        }
    }

    /// Run one scrape. A refresh failure or a failing resource class never
    /// aborts the scrape; whatever succeeded is returned.
    pub async fn collect(&self) -> ScrapeReport {
        let _guard = CollectingGuard::enter(&self.collecting);
        let metrics = get_metrics().await;
        let start = Instant::now();
        metrics.scrapes.inc();

        let refresh = self.authenticator.refresh_if_needed().await;
        let access_token = self.authenticator.access_token().await;
        debug!("scrape started, token refresh outcome: {:?}", refresh);

        let ctx = FetchContext {
            client: &self.client,
            access_token: &access_token,
            descriptors: &self.descriptors,
        };

        let (aps, mcs, switches, sites, clients) = tokio::join!(
            fetch_class::<AccessPoints>(ctx),
            fetch_class::<MobilityControllers>(ctx),
            fetch_class::<Switches>(ctx),
            fetch_class::<Sites>(ctx),
            fetch_class::<TopClients>(ctx),
        );

        let mut report = ScrapeReport::new(refresh);
        for outcome in [aps, mcs, switches, sites, clients] {
            report.absorb(outcome);
        }

        metrics.scrape_duration.observe(start.elapsed().as_secs_f64());
        info!(
            "scrape finished: {} samples, {} of {} resources failed",
            report.samples.len(),
            report.failed.len(),
            ResourceClass::ALL.len()
        );
        report
    }
}
