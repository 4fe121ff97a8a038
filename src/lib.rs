//! # Aruba Central Exporter Library
//!
//! Polls the Aruba Central REST API on every Prometheus scrape and exposes
//! device state (access points, mobility controllers, switches, sites and
//! top clients) as labeled gauges.
//!
//! Modules:
//! - `config` — service configuration, loading and validation
//! - `auth` — OAuth2 token state, expiry countdown and refresh
//! - `central` — HTTP client for the Central API gateway
//! - `resources` — per device class endpoint, envelope and sample mapping
//! - `metrics` — static metric descriptors and per-scrape rendering
//! - `scrape` — one scrape cycle across all device classes

pub mod auth;
pub mod central;
pub mod config;
pub mod metrics;
pub mod observability;
pub mod resources;
pub mod scrape;
pub mod server;
pub mod tests;
pub mod utils;

pub use crate::config::central::ServiceConfig;
