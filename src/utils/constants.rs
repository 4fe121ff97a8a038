//! Shared constants

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60;
pub const DEFAULT_CONFIG_PATH: &str = "exporter_config.yaml";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: &str = "9100";

// Namespace of the exporter's own operational metrics
pub const SELF_METRICS_PREFIX: &str = "aruba_exporter";

// Token exchange
pub const TOKEN_EXCHANGE_PATH: &str = "oauth2/token";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";
