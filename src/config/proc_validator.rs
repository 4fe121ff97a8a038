//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks the API gateway url, OAuth2 credentials and initial tokens
//! - Checks listener, metrics path and logging settings

use reqwest::Url;
use tracing::error;

use crate::config::central::{CentralConfig, ServiceConfig};
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;

const MAX_SAFETY_MARGIN_SECS: u64 = 60 * 60 * 24;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_central(&cfg.central, &mut errors);
    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        return Ok(());
    }

    for e in &errors {
        error!(" - {}", e);
    }
    get_metrics().await.config_validation_errors.inc();
    Err(errors)
}

/// CENTRAL VALIDATION
fn validate_central(central: &CentralConfig, errors: &mut Vec<String>) {
    match Url::parse(&central.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "central.base_url '{}' must use http or https, got '{}'",
            central.base_url,
            url.scheme()
        )),
        Err(e) => errors.push(format!(
            "central.base_url '{}' is not a valid url: {}",
            central.base_url, e
        )),
    }

    if central.credentials.client_id.trim().is_empty() {
        errors.push("central.credentials.client_id must not be empty".to_string());
    }
    if central.credentials.client_secret.trim().is_empty() {
        errors.push("central.credentials.client_secret must not be empty".to_string());
    }
    if central.tokens.refresh_token.trim().is_empty() {
        errors.push("central.tokens.refresh_token must not be empty".to_string());
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if let Some(s) = settings.safety_margin_seconds {
        if s > MAX_SAFETY_MARGIN_SECS {
            errors.push(format!(
                "settings.safety_margin_seconds ({}) is unreasonably large",
                s
            ));
        }
    }

    if settings.server.host.is_empty() {
        errors.push(format!(
            "settings.server.host '{}' must be valid",
            settings.server.host
        ));
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be an integer in range 0-65535",
            settings.server.port
        ));
    }

    // metrics endpoint start with '/'
    let metrics = &settings.metrics;
    if !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }

    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }
}
