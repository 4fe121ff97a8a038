use serde::Deserialize;

use crate::central::client::Endpoint;
use crate::metrics::descriptors::DescriptorId;
use crate::metrics::sample::SampleSink;
use crate::resources::{nullable, DeviceClass, ResourceClass};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SwitchEnvelope {
    #[serde(deserialize_with = "nullable")]
    pub count: u64,
    #[serde(deserialize_with = "nullable")]
    pub switches: Vec<Switch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Switch {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub stack_member_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub group_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub group_name: String,
    #[serde(deserialize_with = "nullable")]
    pub site: String,
    #[serde(deserialize_with = "nullable")]
    pub site_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub switch_role: i64,
    #[serde(deserialize_with = "nullable")]
    pub switch_type: String,
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
    pub stack_id: String,

    #[serde(deserialize_with = "nullable")]
    pub client_count: f64,
    #[serde(deserialize_with = "nullable")]
    pub cpu_utilization: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_free: f64,
    #[serde(deserialize_with = "nullable")]
    pub mem_total: f64,
    #[serde(deserialize_with = "nullable")]
    pub usage: f64,
    #[serde(deserialize_with = "nullable")]
    pub uptime: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_power: f64,
    #[serde(deserialize_with = "nullable")]
    pub power_consumption: f64,
}

pub struct Switches;

impl DeviceClass for Switches {
    const CLASS: ResourceClass = ResourceClass::Switches;
    const ENDPOINT: Endpoint = Endpoint {
        path: "monitoring/v1/switches",
        query: &[("show_resource_details", "true"), ("calculate_client_count", "true")],
    };

    type Envelope = SwitchEnvelope;

    fn emit(envelope: SwitchEnvelope, sink: &mut SampleSink<'_>) {
        for switch in envelope.switches {
            let labels = vec![
                switch.name,
                switch.stack_member_id.to_string(),
                switch.group_id.to_string(),
                switch.group_name,
                switch.site,
                switch.site_id.to_string(),
                switch.switch_role.to_string(),
                switch.switch_type,
                switch.status,
                switch.firmware_version,
                switch.model,
            ];
            sink.emit_all(
                &labels,
                &[
                    (DescriptorId::SwitchClientCount, switch.client_count),
                    (DescriptorId::SwitchCpuUtilization, switch.cpu_utilization),
                    (DescriptorId::SwitchMemFree, switch.mem_free),
                    (DescriptorId::SwitchMemTotal, switch.mem_total),
                    (DescriptorId::SwitchUsage, switch.usage),
                    (DescriptorId::SwitchUptime, switch.uptime),
                ],
            );
        }
    }
}
