//! Outbound calls to the Aruba Central API gateway.

pub mod client;
pub mod error;
