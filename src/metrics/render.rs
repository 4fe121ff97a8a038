use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

use crate::metrics::descriptors::{DescriptorId, DescriptorTable};
use crate::metrics::sample::MetricSample;

/// Turn one scrape's samples into metric families.
///
/// A fresh registry is used per call, so nothing reported in an earlier
/// scrape survives into this one. Descriptors without samples are omitted.
/// Samples whose label arity does not match their descriptor are skipped.
/// When several samples share a descriptor and label values, the first one
/// is rendered and the rest are skipped with a warning.
pub fn gather_samples(samples: &[MetricSample], table: &DescriptorTable) -> Result<Vec<MetricFamily>> {
    let registry = Registry::new();
    let mut gauges: HashMap<DescriptorId, GaugeVec> = HashMap::new();
    let mut rendered: HashSet<(DescriptorId, &[String])> = HashSet::new();

    for sample in samples {
        let descriptor = table.get(sample.descriptor);
        let gauge = match gauges.entry(sample.descriptor) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let gauge = GaugeVec::new(Opts::new(descriptor.name, descriptor.help), descriptor.labels)
                    .with_context(|| format!("invalid descriptor '{}'", descriptor.name))?;
                registry
                    .register(Box::new(gauge.clone()))
                    .with_context(|| format!("cannot register '{}'", descriptor.name))?;
                entry.insert(gauge)
            }
        };

        if rendered.contains(&(sample.descriptor, sample.labels.as_slice())) {
            warn!(
                "skipping duplicate sample for '{}' with labels {:?}, value {}",
                descriptor.name, sample.labels, sample.value
            );
            continue;
        }

        let values: Vec<&str> = sample.labels.iter().map(String::as_str).collect();
        match gauge.get_metric_with_label_values(&values) {
            Ok(metric) => {
                metric.set(sample.value);
                rendered.insert((sample.descriptor, sample.labels.as_slice()));
            }
            Err(e) => warn!("skipping sample for '{}': {}", descriptor.name, e),
        }
    }

    Ok(registry.gather())
}

/// Encode metric families in the text exposition format.
pub fn encode_text(families: &[MetricFamily]) -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(families, &mut buffer).context("failed to encode metrics")?;
    String::from_utf8(buffer).context("encoded metrics are not utf-8")
}
