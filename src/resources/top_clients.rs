use serde::Deserialize;

use crate::central::client::Endpoint;
use crate::metrics::descriptors::DescriptorId;
use crate::metrics::sample::SampleSink;
use crate::resources::{nullable, DeviceClass, ResourceClass};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopClientsEnvelope {
    #[serde(deserialize_with = "nullable")]
    pub clients: Vec<Client>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "macaddr", deserialize_with = "nullable")]
    pub mac_address: String,
    #[serde(deserialize_with = "nullable")]
    pub rx_data_bytes: f64,
    #[serde(deserialize_with = "nullable")]
    pub tx_data_bytes: f64,
}

/// Top 100 clients by bandwidth usage.
pub struct TopClients;

impl DeviceClass for TopClients {
    const CLASS: ResourceClass = ResourceClass::TopClients;
    const ENDPOINT: Endpoint = Endpoint {
        path: "monitoring/v1/clients/bandwidth_usage/topn",
        query: &[("count", "100")],
    };

    type Envelope = TopClientsEnvelope;

    fn emit(envelope: TopClientsEnvelope, sink: &mut SampleSink<'_>) {
        for client in envelope.clients {
            let labels = vec![client.name, client.mac_address];
            sink.emit_all(
                &labels,
                &[
                    (DescriptorId::ClientRxDataBytes, client.rx_data_bytes),
                    (DescriptorId::ClientTxDataBytes, client.tx_data_bytes),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TopClients, TopClientsEnvelope};
    use crate::metrics::descriptors::DescriptorTable;
    use crate::resources::fetcher::map_envelope;
    use serde_json::json;

    #[test]
    fn two_samples_per_client() {
        let table = DescriptorTable::new();
        let envelope: TopClientsEnvelope = serde_json::from_value(json!({
            "clients": [
                {"name": "laptop", "macaddr": "aa:bb:cc:dd:ee:ff", "rx_data_bytes": 123456789012u64, "tx_data_bytes": 42},
                {"name": "phone", "macaddr": "11:22:33:44:55:66"}
            ]
        }))
        .unwrap();

        let samples = map_envelope::<TopClients>(envelope, &table);

        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].labels, vec!["laptop", "aa:bb:cc:dd:ee:ff"]);
        assert_eq!(samples[0].value, 123456789012.0);
        assert_eq!(samples[1].value, 42.0);
        assert_eq!(samples[3].labels, vec!["phone", "11:22:33:44:55:66"]);
    }
}
