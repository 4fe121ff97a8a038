// src/tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::Arc;

use httpmock::Method::GET;
use httpmock::MockServer;
use reqwest::Client;

use crate::auth::authenticator::Authenticator;
use crate::auth::token_state::{TokenState, TokenStore};
use crate::central::client::CentralClient;
use crate::config::central::Credentials;
use crate::metrics::descriptors::DescriptorTable;
use crate::scrape::coordinator::ScrapeCoordinator;

pub const AP_PATH: &str = "/monitoring/v2/aps";
pub const MC_PATH: &str = "/monitoring/v1/mobility_controllers";
pub const SWITCH_PATH: &str = "/monitoring/v1/switches";
pub const SITE_PATH: &str = "/branchhealth/v1/site";
pub const CLIENTS_PATH: &str = "/monitoring/v1/clients/bandwidth_usage/topn";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn token_store(expires_in: i64) -> TokenStore {
    TokenStore::new(TokenState::new("access-0".into(), "refresh-0".into(), expires_in))
}

/// Coordinator whose token exchange goes to `auth_base_url` and whose
/// resource fetches go to `resources_base_url`.
pub fn coordinator(auth_base_url: &str, resources_base_url: &str, store: TokenStore) -> Arc<ScrapeCoordinator> {
    let credentials = Credentials { client_id: "client-id".into(), client_secret: "client-secret".into() };
    let auth_client = CentralClient::new(build_reqwest_client(), auth_base_url, false);
    let authenticator = Authenticator::new(auth_client, credentials, store, 60);
    let client = CentralClient::new(build_reqwest_client(), resources_base_url, false);
    Arc::new(ScrapeCoordinator::new(authenticator, client, Arc::new(DescriptorTable::new())))
}

pub async fn mock_resource(server: &MockServer, path: &str, body: serde_json::Value) {
    server
        .mock_async(|when, then| {
            when.method(GET).path(path).header("authorization", "Bearer access-0");
            then.status(200).json_body(body);
        })
        .await;
}

/// One record of every device class.
pub async fn mock_all_resources(server: &MockServer) {
    mock_resource(
        server,
        AP_PATH,
        json!({"aps": [{
            "name": "ap-1", "group_name": "campus", "site": "hq", "status": "Up",
            "firmware_version": "10.4.0.1", "model": "AP-515", "client_count": 3,
            "cpu_utilization": 5, "mem_free": 100, "mem_total": 200, "uptime": 60,
            "radios": [
                {"band": 0, "channel": "6", "radio_name": "Radio 2.4 GHz", "tx_power": 12, "utilization": 20},
                {"band": 1, "channel": "44", "radio_name": "Radio 5 GHz", "tx_power": 18, "utilization": 4}
            ]
        }]}),
    )
    .await;
    mock_resource(server, MC_PATH, json!({"count": 1, "mcs": [{"name": "mc-1", "cpu_utilization": 10}]})).await;
    mock_resource(server, SWITCH_PATH, json!({"count": 1, "switches": [{"name": "sw-1", "mem_free": 7}]})).await;
    mock_resource(server, SITE_PATH, json!({"items": [{"name": "hq", "id": "1", "device_up": 12}]})).await;
    mock_resource(
        server,
        CLIENTS_PATH,
        json!({"clients": [{"name": "laptop", "macaddr": "aa:bb", "rx_data_bytes": 10, "tx_data_bytes": 20}]}),
    )
    .await;
}

/// Non-comment lines of a text exposition whose metric name starts with `prefix`.
pub fn series_lines<'a>(body: &'a str, prefix: &str) -> Vec<&'a str> {
    body.lines()
        .filter(|line| !line.starts_with('#') && line.starts_with(prefix))
        .collect()
}
