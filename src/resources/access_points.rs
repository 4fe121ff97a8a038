use serde::Deserialize;

use crate::central::client::Endpoint;
use crate::metrics::descriptors::DescriptorId;
use crate::metrics::sample::SampleSink;
use crate::resources::{nullable, DeviceClass, ResourceClass};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApEnvelope {
    #[serde(deserialize_with = "nullable")]
    pub aps: Vec<AccessPoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccessPoint {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub group_name: String,
    #[serde(deserialize_with = "nullable")]
    pub site: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub firmware_version: String,
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub serial: String,
    #[serde(rename = "macaddr", deserialize_with = "nullable")]
    pub mac_address: String,
    #[serde(deserialize_with = "nullable")]
    pub ip_address: String,

    #[serde(deserialize_with = "nullable")]
    pub client_count: f64,
    #[serde(deserialize_with = "nullable")]
    pub cpu_utilization: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_free: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_total: f64,
    #[serde(deserialize_with = "nullable")]
    pub uptime: f64,

    // informational only
    #[serde(deserialize_with = "nullable")]
    pub sleep_status: bool,
    #[serde(deserialize_with = "nullable")]
    pub swarm_master: bool,

    #[serde(deserialize_with = "nullable")]
    pub radios: Vec<Radio>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Radio {
    #[serde(deserialize_with = "nullable")]
    pub band: i64,
    #[serde(deserialize_with = "nullable")]
    pub channel: String,
    #[serde(deserialize_with = "nullable")]
    pub index: i64,
    #[serde(rename = "macaddr", deserialize_with = "nullable")]
    pub mac_address: String,
    #[serde(deserialize_with = "nullable")]
    pub radio_name: String,
    #[serde(deserialize_with = "nullable")]
    pub radio_type: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub tx_power: f64,
    #[serde(deserialize_with = "nullable")]
    pub utilization: f64,
}

pub struct AccessPoints;

impl DeviceClass for AccessPoints {
    const CLASS: ResourceClass = ResourceClass::AccessPoints;
    const ENDPOINT: Endpoint = Endpoint {
        path: "monitoring/v2/aps",
        query: &[
            ("calculate_total", "true"),
            ("calculate_client_count", "true"),
            ("calculate_ssid_count", "true"),
            ("show_resource_details", "true"),
        ],
    };

    type Envelope = ApEnvelope;

    fn emit(envelope: ApEnvelope, sink: &mut SampleSink<'_>) {
        for ap in envelope.aps {
            let labels = vec![
                ap.name.to_owned(),
                ap.group_name,
                ap.site,
                ap.status,
                ap.firmware_version,
                ap.model,
            ];
            sink.emit_all(
                &labels,
                &[
                    (DescriptorId::ApClientCount, ap.client_count),
                    (DescriptorId::ApCpuUtilization, ap.cpu_utilization),
                    (DescriptorId::ApMemFree, ap.mem_free),
                    (DescriptorId::ApMemTotal, ap.mem_total),
                    (DescriptorId::ApUptime, ap.uptime),
                ],
            );

            for radio in ap.radios {
                let radio_labels = vec![radio.band.to_string(), radio.channel, radio.radio_name, ap.name.to_owned()];
                sink.emit_all(
                    &radio_labels,
                    &[
                        (DescriptorId::ApRadioTxPower, radio.tx_power),
                        (DescriptorId::ApRadioUtilization, radio.utilization),
                    ],
                );
            }
        }
    }
}
