//! Device classes polled on every scrape.
//!
//! Each class is a [`DeviceClass`]: an upstream endpoint, the shape of its
//! JSON envelope and the mapping from decoded records to metric samples. The
//! fetch/decode/emit control flow is shared in [`fetcher`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::central::client::Endpoint;
use crate::metrics::sample::SampleSink;

pub mod access_points;
pub mod fetcher;
pub mod mobility_controllers;
pub mod sites;
pub mod switches;
pub mod top_clients;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceClass {
    AccessPoints,
    MobilityControllers,
    Switches,
    Sites,
    TopClients,
}

impl ResourceClass {
    pub const ALL: [ResourceClass; 5] = [
        ResourceClass::AccessPoints,
        ResourceClass::MobilityControllers,
        ResourceClass::Switches,
        ResourceClass::Sites,
        ResourceClass::TopClients,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceClass::AccessPoints => "access_points",
            ResourceClass::MobilityControllers => "mobility_controllers",
            ResourceClass::Switches => "switches",
            ResourceClass::Sites => "sites",
            ResourceClass::TopClients => "top_clients",
        }
    }
}

impl std::fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait DeviceClass {
    const CLASS: ResourceClass;
    const ENDPOINT: Endpoint;

    /// Decoded response body.
    type Envelope: DeserializeOwned;

    /// Expand every record of the envelope into samples.
    fn emit(envelope: Self::Envelope, sink: &mut SampleSink<'_>);
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
