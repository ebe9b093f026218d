// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::providers::dynect::DynConfig;
use crate::providers::ns1::Ns1Config;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Providers to poll, in order. Any subset of {"dyn", "ns1"}.
    #[serde(default)]
    pub providers: Vec<String>,

    /// Seconds between collection cycles.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// Address of the statsd/dogstatsd backend.
    #[serde(default = "default_statsd_address")]
    pub statsd_address: String,

    /// Tag wire format for the metrics backend. Only "datadog" is supported.
    #[serde(default)]
    pub tag_format: Option<String>,

    #[serde(default)]
    pub log: Log,

    #[serde(rename = "dyn", default)]
    pub dynect: Option<DynConfig>,

    #[serde(default)]
    pub ns1: Option<Ns1Config>,
}

fn default_check_interval() -> u64 {
    300 // 5 minutes
}

fn default_statsd_address() -> String {
    "localhost:8125".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Manages the application settings, allowing for loading configurations.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub _config_path: PathBuf,
}

/// Settings that have passed validation.
pub struct ValidatedSettings(pub(super) Settings);
