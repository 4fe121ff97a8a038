use serde::Deserialize;

use crate::central::client::Endpoint;
use crate::metrics::descriptors::DescriptorId;
use crate::metrics::sample::SampleSink;
use crate::resources::{nullable, DeviceClass, ResourceClass};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct McEnvelope {
    #[serde(deserialize_with = "nullable")]
    pub count: u64,
    #[serde(rename = "mcs", deserialize_with = "nullable")]
    pub mobility_controllers: Vec<MobilityController>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MobilityController {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub group_name: String,
    #[serde(deserialize_with = "nullable")]
    pub mode: String,
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub site: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub firmware_version: String,
    #[serde(deserialize_with = "nullable")]
    pub serial: String,
    #[serde(rename = "macaddr", deserialize_with = "nullable")]
    pub mac_address: String,
    #[serde(deserialize_with = "nullable")]
    pub role: String,
    #[serde(deserialize_with = "nullable")]
    pub reboot_reason: String,

    #[serde(deserialize_with = "nullable")]
    pub cpu_utilization: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_free: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_total: f64,
    #[serde(deserialize_with = "nullable")]
    pub uptime: f64,
}

pub struct MobilityControllers;

impl DeviceClass for MobilityControllers {
    const CLASS: ResourceClass = ResourceClass::MobilityControllers;
    const ENDPOINT: Endpoint = Endpoint {
        path: "monitoring/v1/mobility_controllers",
        query: &[("calculate_total", "false")],
    };

    type Envelope = McEnvelope;

    fn emit(envelope: McEnvelope, sink: &mut SampleSink<'_>) {
        for mc in envelope.mobility_controllers {
            let labels = vec![mc.name, mc.group_name, mc.mode, mc.model, mc.site, mc.status, mc.firmware_version];
            sink.emit_all(
                &labels,
                &[
                    (DescriptorId::McCpuUtilization, mc.cpu_utilization),
                    (DescriptorId::McMemFree, mc.mem_free),
                    (DescriptorId::McMemTotal, mc.mem_total),
                    (DescriptorId::McUptime, mc.uptime),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{McEnvelope, MobilityControllers};
    use crate::metrics::descriptors::{DescriptorId, DescriptorTable};
    use crate::resources::fetcher::map_envelope;
    use serde_json::json;

    #[test]
    fn four_samples_per_controller() {
        let table = DescriptorTable::new();
        let envelope: McEnvelope = serde_json::from_value(json!({
            "count": 2,
            "mcs": [
                {"name": "mc-1", "group_name": "core", "mode": "gateway", "model": "A7010", "site": "dc",
                 "status": "Up", "firmware_version": "8.10.0.2", "cpu_utilization": 12, "mem_free": 1024,
                 "mem_total": 4096, "uptime": 3600, "labels": ["x"]},
                {"name": "mc-2"}
            ]
        }))
        .unwrap();
        assert_eq!(envelope.count, 2);

        let samples = map_envelope::<MobilityControllers>(envelope, &table);

        assert_eq!(samples.len(), 2 * 4);
        assert_eq!(samples[0].labels, vec!["mc-1", "core", "gateway", "A7010", "dc", "Up", "8.10.0.2"]);
        assert_eq!(samples[2].descriptor, DescriptorId::McMemTotal);
        assert_eq!(samples[2].value, 4096.0);
        assert_eq!(samples[7].labels[0], "mc-2");
    }
}
