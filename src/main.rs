// Standard library
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use clap::Parser;
use tokio::signal::ctrl_c;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project modules
mod collector;
mod functions;
mod providers;
mod reporting;
mod settings;

// Project imports
use crate::functions::run;
use crate::reporting::types::Reporter;
use crate::settings::types::ConfigManager;

/// How long a once-mode run waits after its cycle so the exporter can flush
/// to the local listener before the process exits.
const ONCE_FLUSH_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "dnsmetrics", version)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run one collection cycle immediately, then exit
    #[arg(long)]
    once: bool,

    /// Enable debugging output
    #[arg(short, long)]
    debug: bool,
}

/// Main entry point for the DNS metrics poller.
///
/// This application periodically polls the management APIs of hosted DNS
/// providers (DynECT, NS1), extracts per-zone operational metrics, and pushes
/// them as tagged gauges to a statsd backend.
///
/// Features:
/// - Zone type, serial, and record count gauges per zone
/// - Secondary-sync health for replicated zones
/// - Queries-per-second, from the tabular report or the instant endpoint
/// - One-shot mode that prints the emitted samples locally
#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    let args = Args::parse();

    // Configuration errors are the only fatal errors in the process.
    let config: Arc<ConfigManager> = Arc::new(
        ConfigManager::new(args.config.clone()).expect("Failed to initialize configuration"),
    );

    // setup logging.
    let log_level: String = if args.debug {
        "debug".to_string()
    } else {
        config.get_log_level().await
    };

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(log_level)
        .add_directive("hyper_util=error".parse().unwrap())
        .add_directive("reqwest=error".parse().unwrap())
        .add_directive("hyper=error".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();

    info!("Settings have been loaded.");

    // In once mode the emission sink is an ephemeral local listener, so the
    // samples of the single cycle are observable before the process exits.
    let statsd_address: String = if args.once {
        match reporting::spawn_debug_listener().await {
            Ok(address) => address.to_string(),
            Err(e) => {
                error!("Error creating StatsD listener: {}", e);
                return;
            }
        }
    } else {
        config.get_settings().await.statsd_address.clone()
    };

    if let Err(e) = reporting::install_recorder(&statsd_address) {
        error!(
            "Can't create a StatsD reporter using address {}: {}",
            statsd_address, e
        );
        return;
    }

    let reporter = Reporter::new();

    if args.once {
        collector::run_cycle(&config, &reporter).await;
        tokio::time::sleep(ONCE_FLUSH_GRACE).await;
        return;
    }

    // Create a broadcast channel for shutdown signal
    let (shutdown_tx, _) = broadcast::channel(1);
    let shutdown_tx_clone = shutdown_tx.clone();

    // Handle Ctrl+C
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, initiating graceful shutdown...");
        let _ = shutdown_tx_clone.send(());
    });

    // Run the main application loop with shutdown signal
    if let Err(e) = run(config, reporter, shutdown_tx.subscribe()).await {
        error!("Application error: {}", e);
    }

    info!("Shutdown complete.");
}
