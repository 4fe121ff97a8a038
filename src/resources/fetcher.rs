use tokio::time::Instant;
use tracing::{info, warn};

use crate::central::client::CentralClient;
use crate::central::error::FetchError;
use crate::metrics::descriptors::DescriptorTable;
use crate::metrics::sample::{MetricSample, SampleSink};
use crate::observability::metrics::get_metrics;
use crate::resources::{DeviceClass, ResourceClass};

/// What one resource class contributed to a scrape.
#[derive(Debug)]
pub struct FetchOutcome {
    pub class: ResourceClass,
    pub result: Result<Vec<MetricSample>, FetchError>,
}

/// Everything a fetch needs for one scrape. The access token is a copy taken
/// after the refresh step, so no lock is held across upstream calls.
#[derive(Clone, Copy)]
pub struct FetchContext<'a> {
    pub client: &'a CentralClient,
    pub access_token: &'a str,
    pub descriptors: &'a DescriptorTable,
}

/// Map a decoded envelope into samples.
pub fn map_envelope<C: DeviceClass>(envelope: C::Envelope, descriptors: &DescriptorTable) -> Vec<MetricSample> {
    let mut sink = SampleSink::new(descriptors);
    C::emit(envelope, &mut sink);
    sink.into_samples()
}

/// Fetch, decode and map one device class. Failures are logged and counted
/// here and never propagate beyond this class.
pub async fn fetch_class<C: DeviceClass>(ctx: FetchContext<'_>) -> FetchOutcome {
    let class = C::CLASS;
    let resource = class.as_str();
    let metrics = get_metrics().await;
    let start = Instant::now();
    metrics.resource_fetch_requests.with_label_values(&[resource]).inc();

    let result = ctx
        .client
        .get_json::<C::Envelope>(&C::ENDPOINT, ctx.access_token)
        .await
        .map(|envelope| map_envelope::<C>(envelope, ctx.descriptors));

    metrics
        .resource_fetch_duration
        .with_label_values(&[resource])
        .observe(start.elapsed().as_secs_f64());

    match &result {
        Ok(samples) => {
            info!("resource '{}' produced {} samples", resource, samples.len());
            metrics.resource_samples.with_label_values(&[resource]).set(samples.len() as i64);
        }
        Err(err) => {
            warn!("resource '{}' skipped for this scrape: {}", resource, err);
            metrics.resource_fetch_failures.with_label_values(&[resource, err.reason()]).inc();
            metrics.resource_samples.with_label_values(&[resource]).set(0);
        }
    }

    FetchOutcome { class, result }
}
