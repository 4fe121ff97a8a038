use serde::Deserialize;

use crate::central::client::Endpoint;
use crate::metrics::descriptors::DescriptorId;
use crate::metrics::sample::SampleSink;
use crate::resources::{nullable, DeviceClass, ResourceClass};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteEnvelope {
    #[serde(rename = "items", deserialize_with = "nullable")]
    pub sites: Vec<Site>,
}

/// Branch health summary of one site.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Site {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    #[serde(deserialize_with = "nullable")]
    pub connected_count: f64,
    #[serde(deserialize_with = "nullable")]
    pub failed_count: f64,
    #[serde(deserialize_with = "nullable")]
    pub device_down: f64,
    #[serde(deserialize_with = "nullable")]
    pub device_up: f64,
    #[serde(rename = "device_high_ch_2_4ghz", deserialize_with = "nullable")]
    pub device_high_ch_24: f64,
    #[serde(rename = "device_high_ch_5ghz", deserialize_with = "nullable")]
    pub device_high_ch_5: f64,
    #[serde(deserialize_with = "nullable")]
    pub device_high_cpu: f64,
    #[serde(deserialize_with = "nullable")]
    pub device_high_mem: f64,
    #[serde(rename = "device_high_noise_2_4ghz", deserialize_with = "nullable")]
    pub device_high_noise_24: f64,
    #[serde(rename = "device_high_noise_5ghz", deserialize_with = "nullable")]
    pub device_high_noise_5: f64,
    #[serde(deserialize_with = "nullable")]
    pub wired_cpu_high: f64,
    #[serde(deserialize_with = "nullable")]
    pub wired_device_status_down: f64,
    #[serde(deserialize_with = "nullable")]
    pub wired_device_status_up: f64,
    #[serde(deserialize_with = "nullable")]
    pub wired_mem_high: f64,
    #[serde(deserialize_with = "nullable")]
    pub wlan_cpu_high: f64,
    #[serde(deserialize_with = "nullable")]
    pub wlan_device_status_down: f64,
    #[serde(deserialize_with = "nullable")]
    pub wlan_device_status_up: f64,
    #[serde(deserialize_with = "nullable")]
    pub wlan_mem_high: f64,

    // informational only
    #[serde(deserialize_with = "nullable")]
    pub score: f64,
    #[serde(deserialize_with = "nullable")]
    pub potential_issue: bool,
    #[serde(deserialize_with = "nullable")]
    pub lat: f64,
    #[serde(deserialize_with = "nullable")]
    pub long: f64,
}

pub struct Sites;

impl DeviceClass for Sites {
    const CLASS: ResourceClass = ResourceClass::Sites;
    const ENDPOINT: Endpoint = Endpoint {
        path: "branchhealth/v1/site",
        query: &[("limit", "100"), ("column", "device_total"), ("order", "desc")],
    };

    type Envelope = SiteEnvelope;

    fn emit(envelope: SiteEnvelope, sink: &mut SampleSink<'_>) {
        for site in envelope.sites {
            let labels = vec![site.name, site.id];
            sink.emit_all(
                &labels,
                &[
                    (DescriptorId::SiteConnectedCount, site.connected_count),
                    (DescriptorId::SiteDeviceDown, site.device_down),
                    (DescriptorId::SiteDeviceHighCh24, site.device_high_ch_24),
                    (DescriptorId::SiteDeviceHighCh5, site.device_high_ch_5),
                    (DescriptorId::SiteDeviceHighCpu, site.device_high_cpu),
                    (DescriptorId::SiteDeviceHighMem, site.device_high_mem),
                    (DescriptorId::SiteDeviceHighNoise24, site.device_high_noise_24),
                    (DescriptorId::SiteDeviceHighNoise5, site.device_high_noise_5),
                    (DescriptorId::SiteDeviceUp, site.device_up),
                    (DescriptorId::SiteWiredCpuHigh, site.wired_cpu_high),
                    (DescriptorId::SiteWiredDeviceStatusDown, site.wired_device_status_down),
                    (DescriptorId::SiteWiredDeviceStatusUp, site.wired_device_status_up),
                    (DescriptorId::SiteWiredMemHigh, site.wired_mem_high),
                    (DescriptorId::SiteWlanCpuHigh, site.wlan_cpu_high),
                    (DescriptorId::SiteWlanDeviceStatusDown, site.wlan_device_status_down),
                    (DescriptorId::SiteWlanDeviceStatusUp, site.wlan_device_status_up),
                    (DescriptorId::SiteWlanMemHigh, site.wlan_mem_high),
                ],
            );
        }
    }
}
