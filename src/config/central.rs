use serde::Deserialize;

use crate::config::settings::SettingsConfig;

/// ================================
/// Full exporter configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub central: CentralConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// ================================
/// Aruba Central API gateway
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CentralConfig {
    /// API gateway base url, e.g. https://apigw-prod2.central.arubanetworks.com/
    pub base_url: String,
    pub credentials: Credentials,
    pub tokens: InitialTokens,
}

/// OAuth2 application credentials, immutable for the process lifetime
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Token pair the exporter starts with
#[derive(Clone, Deserialize)]
pub struct InitialTokens {
    #[serde(default)]
    pub access_token: String,
    pub refresh_token: String,
    /// seconds until `access_token` expires; 0 forces a refresh on the first scrape
    #[serde(default)]
    pub expires_in: i64,
}

impl std::fmt::Debug for InitialTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitialTokens")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
