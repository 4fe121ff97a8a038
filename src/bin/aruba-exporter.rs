use std::sync::Arc;

use anyhow::Result;
use aruba_central_exporter::auth::authenticator::Authenticator;
use aruba_central_exporter::auth::countdown::start_expiry_countdown;
use aruba_central_exporter::auth::token_state::{TokenState, TokenStore};
use aruba_central_exporter::central::client::CentralClient;
use aruba_central_exporter::metrics::descriptors::DescriptorTable;
use aruba_central_exporter::scrape::coordinator::ScrapeCoordinator;
use aruba_central_exporter::server;
use aruba_central_exporter::utils::config_loader;
use aruba_central_exporter::utils::constants::{DEFAULT_CONFIG_PATH, DEFAULT_SAFETY_MARGIN_SECS};
use aruba_central_exporter::utils::logging;
use aruba_central_exporter::utils::logging::LogLevel;
use clap::Parser;
use reqwest::Client;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'f', long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Log status and headers of every upstream response
    #[arg(short, long)]
    verbose: bool,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level.to_owned());

    // -------------------------------
    // 2. Token state and its countdown
    // -------------------------------

    let central = &service_config.central;
    let store = TokenStore::new(TokenState::from(&central.tokens));
    let countdown = start_expiry_countdown(store.clone());

    // -------------------------------
    // 3. Central client, authenticator, scrape coordinator
    // -------------------------------

    let client = CentralClient::new(Client::new(), &central.base_url, args.verbose);
    let safety_margin_seconds = service_config
        .settings
        .safety_margin_seconds
        .unwrap_or(DEFAULT_SAFETY_MARGIN_SECS);
    let authenticator = Authenticator::new(
        client.clone(),
        central.credentials.clone(),
        store,
        safety_margin_seconds,
    );
    let coordinator = Arc::new(ScrapeCoordinator::new(
        authenticator,
        client,
        Arc::new(DescriptorTable::new()),
    ));

    // -------------------------------
    // 4. Serve scrapes
    // -------------------------------

    info!("Exporter starting...");
    server::server::start(&service_config.settings, coordinator).await?;

    countdown.abort();
    Ok(())
}
