// Standard library
use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{debug, info};

// Project imports
use crate::collector;
use crate::reporting::types::Reporter;
use crate::settings::types::ConfigManager;

/// Main application loop driving periodic collection cycles.
///
/// Runs one cycle immediately, then one per configured interval until a
/// shutdown signal arrives. Every cycle is stateless and independent; cycle
/// failures are absorbed inside the collector.
pub async fn run(
    config: Arc<ConfigManager>,
    reporter: Reporter,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let check_interval: u64 = config.get_check_interval().await;
    info!("Collecting DNS metrics every {} seconds", check_interval);

    collector::run_cycle(&config, &reporter).await;

    loop {
        tokio::select! {
            // Handle shutdown signal
            Ok(_) = shutdown_rx.recv() => {
                info!("Received shutdown signal, stopping collection...");
                break;
            }

            // Wait for the next collection cycle
            _ = tokio::time::sleep(Duration::from_secs(check_interval)) => {
                debug!("Starting collection cycle");
                collector::run_cycle(&config, &reporter).await;
            }
        }
    }

    Ok(())
}

/// Current unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
