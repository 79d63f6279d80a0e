//! # ventlink — air unit command-line client
//!
//! Composition root that wires the LAN adapter into the orchestrator and
//! runs one command.
//!
//! ## Responsibilities
//! - Parse CLI arguments and load configuration (file, env vars)
//! - Initialise tracing
//! - Seed the host cache from the stored preference
//! - Construct the connector, discovery probe and orchestrator
//! - Run the command and print the resulting snapshot as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;
mod notifier;
mod preferences;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ventlink_adapter_lan::{LanConnector, UdpDiscovery};
use ventlink_app::host_cache::HostCache;
use ventlink_app::orchestrator::Orchestrator;
use ventlink_app::services::discovery_service::DiscoveryService;
use ventlink_app::services::preference_service::PreferenceService;
use ventlink_app::state_repository::StateRepository;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::notifier::ConsoleNotifier;
use crate::preferences::FilePreferenceStore;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(host) = cli.host.clone() {
        config.device.host = Some(host);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(cli.command, config).await
}

async fn run(command: Command, config: Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cache = HostCache::new();
    let store = FilePreferenceStore::new(config.preferences.path.clone());
    tracing::debug!(path = %store.path().display(), "using preference file");
    let preferences = PreferenceService::new(store, cache.clone());

    let discovery = UdpDiscovery::new(config.discovery.clone());

    let outcome = match command {
        Command::SetIp { address } => {
            preferences.set_ip_address(&address).await?;
            let value = serde_json::json!({ "ip_address": address.trim() });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Discover => {
            return match discovery.scan().await? {
                Some(host) => {
                    let value = serde_json::json!({ "host": host.to_string() });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("No air unit answered the discovery query.");
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        command => {
            preferences.load().await;
            let connector = LanConnector::new(config.register_map()?.clone(), config.connection);
            let resolver = DiscoveryService::new(discovery, cache, config.device.host);
            let mut orchestrator =
                Orchestrator::new(connector, resolver, StateRepository::new(), ConsoleNotifier)
                    .with_port(config.device.port);
            orchestrator.start();

            let pending = match command {
                Command::Mode { mode } => orchestrator.set_mode(mode),
                Command::Boost { state } => orchestrator.set_boost(state.is_on()),
                Command::Bypass { state } => orchestrator.set_bypass(state.is_on()),
                Command::NightCooling { state } => orchestrator.set_night_cooling(state.is_on()),
                Command::FanStep { percent } => orchestrator.set_manual_fan_step(percent),
                _ => orchestrator.fetch(),
            };
            let outcome = pending.outcome().await;
            orchestrator.stop().await;
            outcome
        }
    };

    match outcome {
        Some(Ok(state)) => {
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(ExitCode::SUCCESS)
        }
        // The notifier has already reported the failure.
        Some(Err(_)) => Ok(ExitCode::FAILURE),
        None => {
            tracing::warn!("operation superseded");
            Ok(ExitCode::FAILURE)
        }
    }
}
