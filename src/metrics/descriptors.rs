//! Static metric descriptors for every device quantity the exporter publishes.
//!
//! The table is built once at startup and shared by reference; every sample
//! produced for a descriptor must carry its label values in the order of
//! [`MetricDescriptor::labels`].

const AP_LABELS: &[&str] = &["name", "groupName", "site", "status", "firmwareVersion", "model"];
const AP_RADIO_LABELS: &[&str] = &["band", "channel", "radioName", "apName"];
const CLIENT_LABELS: &[&str] = &["name", "mac"];
const MC_LABELS: &[&str] = &["name", "groupName", "mode", "model", "site", "status", "firmwareVersion"];
const SITE_LABELS: &[&str] = &["name", "id"];
const SWITCH_LABELS: &[&str] = &[
    "name",
    "stackMemberId",
    "groupId",
    "groupName",
    "site",
    "siteId",
    "switchRole",
    "switchType",
    "status",
    "firmwareVersion",
    "model",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorId {
    ApClientCount,
    ApCpuUtilization,
    ApMemFree,
    ApMemTotal,
    ApUptime,
    ApRadioTxPower,
    ApRadioUtilization,
    ClientRxDataBytes,
    ClientTxDataBytes,
    McCpuUtilization,
    McMemFree,
    McMemTotal,
    McUptime,
    SiteConnectedCount,
    SiteDeviceDown,
    SiteDeviceHighCh24,
    SiteDeviceHighCh5,
    SiteDeviceHighCpu,
    SiteDeviceHighMem,
    SiteDeviceHighNoise24,
    SiteDeviceHighNoise5,
    SiteDeviceUp,
    SiteWiredCpuHigh,
    SiteWiredDeviceStatusDown,
    SiteWiredDeviceStatusUp,
    SiteWiredMemHigh,
    SiteWlanCpuHigh,
    SiteWlanDeviceStatusDown,
    SiteWlanDeviceStatusUp,
    SiteWlanMemHigh,
    SwitchClientCount,
    SwitchCpuUtilization,
    SwitchMemFree,
    SwitchMemTotal,
    SwitchUsage,
    SwitchUptime,
}

impl DescriptorId {
    /// Every descriptor, in declaration order.
    pub const ALL: [DescriptorId; 36] = [
        DescriptorId::ApClientCount,
        DescriptorId::ApCpuUtilization,
        DescriptorId::ApMemFree,
        DescriptorId::ApMemTotal,
        DescriptorId::ApUptime,
        DescriptorId::ApRadioTxPower,
        DescriptorId::ApRadioUtilization,
        DescriptorId::ClientRxDataBytes,
        DescriptorId::ClientTxDataBytes,
        DescriptorId::McCpuUtilization,
        DescriptorId::McMemFree,
        DescriptorId::McMemTotal,
        DescriptorId::McUptime,
        DescriptorId::SiteConnectedCount,
        DescriptorId::SiteDeviceDown,
        DescriptorId::SiteDeviceHighCh24,
        DescriptorId::SiteDeviceHighCh5,
        DescriptorId::SiteDeviceHighCpu,
        DescriptorId::SiteDeviceHighMem,
        DescriptorId::SiteDeviceHighNoise24,
        DescriptorId::SiteDeviceHighNoise5,
        DescriptorId::SiteDeviceUp,
        DescriptorId::SiteWiredCpuHigh,
        DescriptorId::SiteWiredDeviceStatusDown,
        DescriptorId::SiteWiredDeviceStatusUp,
        DescriptorId::SiteWiredMemHigh,
        DescriptorId::SiteWlanCpuHigh,
        DescriptorId::SiteWlanDeviceStatusDown,
        DescriptorId::SiteWlanDeviceStatusUp,
        DescriptorId::SiteWlanMemHigh,
        DescriptorId::SwitchClientCount,
        DescriptorId::SwitchCpuUtilization,
        DescriptorId::SwitchMemFree,
        DescriptorId::SwitchMemTotal,
        DescriptorId::SwitchUsage,
        DescriptorId::SwitchUptime,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn describe(self) -> (&'static str, &'static str, &'static [&'static str]) {
        use DescriptorId::*;
        match self {
            ApClientCount => ("aruba_ap_client_count", "Number of clients connected to access point", AP_LABELS),
            ApCpuUtilization => ("aruba_ap_cpu_utilization", "CPU utilization of the access point in percentage", AP_LABELS),
            ApMemFree => ("aruba_ap_mem_free", "Amount of free memory of access point", AP_LABELS),
            ApMemTotal => ("aruba_ap_mem_total", "Total amount of memory of access point", AP_LABELS),
            ApUptime => ("aruba_ap_uptime", "Uptime of the access point in seconds", AP_LABELS),

            ApRadioTxPower => ("aruba_ap_radio_tx_power", "Radio tx power", AP_RADIO_LABELS),
            ApRadioUtilization => ("aruba_ap_radio_utilization", "Radio utilization in percentage", AP_RADIO_LABELS),

            ClientRxDataBytes => ("aruba_client_rx_data_bytes", "Volume of data received", CLIENT_LABELS),
            ClientTxDataBytes => ("aruba_client_tx_data_bytes", "Volume of data transmitted", CLIENT_LABELS),

            McCpuUtilization => ("aruba_mc_cpu_utilization", "CPU utilization of the mobility controller in percentage", MC_LABELS),
            McMemFree => ("aruba_mc_mem_free", "Amount of free memory of mobility controller", MC_LABELS),
            McMemTotal => ("aruba_mc_mem_total", "Total amount of memory of mobility controller", MC_LABELS),
            McUptime => ("aruba_mc_uptime", "Uptime of the mobility controller in seconds", MC_LABELS),

            SiteConnectedCount => ("aruba_site_connected_count", "Number of connected devices", SITE_LABELS),
            SiteDeviceDown => ("aruba_site_device_down", "Number of down devices", SITE_LABELS),
            SiteDeviceHighCh24 => ("aruba_site_device_high_ch_2_4ghz", "Number of devices with high 2.4ghz channel utilization", SITE_LABELS),
            SiteDeviceHighCh5 => ("aruba_site_device_high_ch_5ghz", "Number of devices with high 5ghz channel utilization", SITE_LABELS),
            SiteDeviceHighCpu => ("aruba_site_device_high_cpu", "Number of devices with high cpu utilization", SITE_LABELS),
            SiteDeviceHighMem => ("aruba_site_device_high_mem", "Number of devices with high mem utilization", SITE_LABELS),
            SiteDeviceHighNoise24 => ("aruba_site_device_high_noise_2_4ghz", "Number of devices with high 2.4ghz noise", SITE_LABELS),
            SiteDeviceHighNoise5 => ("aruba_site_device_high_noise_5ghz", "Number of devices with high 5ghz noise", SITE_LABELS),
            SiteDeviceUp => ("aruba_site_device_up", "Number of up devices", SITE_LABELS),
            SiteWiredCpuHigh => ("aruba_site_wired_cpu_high", "Number of wired devices with high cpu usage", SITE_LABELS),
            SiteWiredDeviceStatusDown => ("aruba_site_wired_device_status_down", "Number of down wired devices", SITE_LABELS),
            SiteWiredDeviceStatusUp => ("aruba_site_wired_device_status_up", "Number of up wired devices", SITE_LABELS),
            SiteWiredMemHigh => ("aruba_site_wired_mem_high", "Number of wired devices with high memory usage", SITE_LABELS),
            SiteWlanCpuHigh => ("aruba_site_wlan_cpu_high", "Number of wireless devices with high cpu usage", SITE_LABELS),
            SiteWlanDeviceStatusDown => ("aruba_site_wlan_device_status_down", "Number of down wireless devices", SITE_LABELS),
            SiteWlanDeviceStatusUp => ("aruba_site_wlan_device_status_up", "Number of up wireless devices", SITE_LABELS),
            SiteWlanMemHigh => ("aruba_site_wlan_mem_high", "Number of wireless devices with high memory usage", SITE_LABELS),

            SwitchClientCount => ("aruba_switch_client_count", "Number of clients connected to switch", SWITCH_LABELS),
            SwitchCpuUtilization => ("aruba_switch_cpu_utilization", "Current switch cpu utilization percentage", SWITCH_LABELS),
            SwitchMemFree => ("aruba_switch_mem_free", "Switch free memory", SWITCH_LABELS),
            SwitchMemTotal => ("aruba_switch_mem_total", "Switch total memory", SWITCH_LABELS),
            SwitchUsage => ("aruba_switch_usage", "Switch usage", SWITCH_LABELS),
            SwitchUptime => ("aruba_switch_uptime", "Switch uptime", SWITCH_LABELS),
        }
    }
}

/// Name, help text and positional label schema of one measured quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub id: DescriptorId,
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

/// Immutable descriptor table, indexed by [`DescriptorId`].
#[derive(Debug, Clone)]
pub struct DescriptorTable {
    descriptors: Vec<MetricDescriptor>,
}

impl DescriptorTable {
    pub fn new() -> Self {
        let descriptors = DescriptorId::ALL
            .iter()
            .map(|&id| {
                let (name, help, labels) = id.describe();
                MetricDescriptor { id, name, help, labels }
            })
            .collect();
        Self { descriptors }
    }

    pub fn get(&self, id: DescriptorId) -> &MetricDescriptor {
        &self.descriptors[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for DescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}
