use tracing::warn;

use crate::metrics::descriptors::{DescriptorId, DescriptorTable};

/// One gauge value with its label values, valid for a single scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub descriptor: DescriptorId,
    pub value: f64,
    pub labels: Vec<String>,
}

impl MetricSample {
    pub fn new(descriptor: DescriptorId, value: f64, labels: Vec<String>) -> Self {
        Self { descriptor, value, labels }
    }
}

/// Collects the samples produced while mapping one resource class, checking
/// each against the label schema of its descriptor.
#[derive(Debug)]
pub struct SampleSink<'a> {
    table: &'a DescriptorTable,
    samples: Vec<MetricSample>,
}

impl<'a> SampleSink<'a> {
    pub fn new(table: &'a DescriptorTable) -> Self {
        Self { table, samples: Vec::new() }
    }

    pub fn emit(&mut self, descriptor: DescriptorId, value: f64, labels: Vec<String>) {
        let expected = self.table.get(descriptor);
        if expected.labels.len() != labels.len() {
            warn!(
                "dropping sample for '{}': expected {} label values, got {}",
                expected.name,
                expected.labels.len(),
                labels.len()
            );
            return;
        }
        self.samples.push(MetricSample::new(descriptor, value, labels));
    }

    /// Emit one sample per `(descriptor, value)` pair, all sharing `labels`.
    pub fn emit_all(&mut self, labels: &[String], values: &[(DescriptorId, f64)]) {
        for &(descriptor, value) in values {
            self.emit(descriptor, value, labels.to_vec());
        }
    }

    pub fn into_samples(self) -> Vec<MetricSample> {
        self.samples
    }
}
