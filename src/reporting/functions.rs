// Standard library
use std::net::SocketAddr;

// 3rd party crates
use metrics_exporter_dogstatsd::DogStatsDBuilder;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

// Current module imports
use super::constants::LISTENER_BUF_SIZE;
use super::errors::ReportingError;

/// Installs the dogstatsd exporter as the global metrics recorder, pushing
/// samples to `address` over UDP.
pub fn install_recorder(address: &str) -> Result<(), ReportingError> {
    DogStatsDBuilder::default()
        .with_remote_address(address)
        .map_err(|e| ReportingError::Exporter(e.to_string()))?
        .install()
        .map_err(|e| ReportingError::Exporter(e.to_string()))?;

    Ok(())
}

/// Converts a condition into a 0/1 gauge value.
pub fn bool_to_gauge(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Binds an ephemeral local UDP listener and spawns a background task that
/// logs every statsd line arriving on it until the process exits.
///
/// Used in once mode so the emitted samples are observable: the exporter is
/// pointed at the returned address instead of the real backend. This is a
/// debugging affordance, not a delivery guarantee.
pub async fn spawn_debug_listener() -> Result<SocketAddr, ReportingError> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let address = socket.local_addr()?;

    tokio::spawn(async move {
        let mut buf = [0u8; LISTENER_BUF_SIZE];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((n, _)) => {
                    for line in String::from_utf8_lossy(&buf[..n]).lines() {
                        info!("StatsD message: {}", line);
                    }
                }
                Err(e) => {
                    warn!("Error reading from the StatsD listener: {}", e);
                    return;
                }
            }
        }
    });

    debug!("StatsD listener is ready on {}", address);
    Ok(address)
}
