use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::ServiceConfig;
use crate::config::settings::{LogFormat, LoggingConfig};


#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}

/// Resolve the effective logging config: CLI level > config level > `info`.
pub fn resolve(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let configured = service_config.settings.logging.as_ref();
    let level = arg_log_level
        .map(|level| level.as_str().to_string())
        .or_else(|| configured.map(|config| config.level.to_lowercase()))
        .unwrap_or_else(|| "info".to_owned());
    let format = configured
        .map(|config| config.format.to_owned())
        .unwrap_or(LogFormat::Compact);

    LoggingConfig::new(level, format)
}

pub fn run(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(service_config, arg_log_level));
}


/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flattens fields for CRI log parsers
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::{resolve, LogLevel};
    use crate::config::central::{CentralConfig, Credentials, InitialTokens, ServiceConfig};
    use crate::config::settings::{LogFormat, LoggingConfig, SettingsConfig};

    fn config_with(logging: Option<LoggingConfig>) -> ServiceConfig {
        ServiceConfig {
            central: CentralConfig {
                base_url: "http://localhost".into(),
                credentials: Credentials { client_id: "id".into(), client_secret: "secret".into() },
                tokens: InitialTokens { access_token: String::new(), refresh_token: "r".into(), expires_in: 0 },
            },
            settings: SettingsConfig { logging, ..Default::default() },
        }
    }

    #[test]
    fn cli_level_wins_over_config() {
        let cfg = config_with(Some(LoggingConfig::new("warn".into(), LogFormat::Json)));
        let resolved = resolve(&cfg, Some(LogLevel::DEBUG));
        assert_eq!(resolved.level, "debug");
        assert_eq!(resolved.format, LogFormat::Json);
    }

    #[test]
    fn falls_back_to_config_then_info() {
        let cfg = config_with(Some(LoggingConfig::new("WARN".into(), LogFormat::Compact)));
        assert_eq!(resolve(&cfg, None).level, "warn");

        let cfg = config_with(None);
        let resolved = resolve(&cfg, None);
        assert_eq!(resolved.level, "info");
        assert_eq!(resolved.format, LogFormat::Compact);
    }
}
