// 3rd party crates
use reqwest::Client;
use serde::Deserialize;

/// Client for the NS1 API. The API key rides as a default header on every
/// request; there is no login handshake.
#[derive(Debug, Clone)]
pub struct Ns1 {
    pub config: Ns1Config,
    pub(super) client: Client,
}

/// Credentials for the NS1 API.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Ns1Config {
    #[serde(default)]
    pub api_key: String,
}

/// One entry of the zone listing.
#[derive(Debug, Deserialize, Clone)]
pub struct Ns1ZoneSummary {
    pub zone: String,
    #[serde(default)]
    pub ttl: u64,
}

/// Full detail for a single zone, including secondary-sync health.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Ns1Zone {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub primary: Ns1PrimaryBlock,
    #[serde(default)]
    pub secondary: Ns1SecondaryBlock,
    #[serde(default)]
    pub records: Vec<Ns1Record>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Ns1PrimaryBlock {
    #[serde(default)]
    pub enabled: bool,
}

/// Secondary-sync health block. `status` starts as "pending" until the first
/// transfer, switches to "ok" after a successful pull, and reads "warning"
/// when polling the master fails.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Ns1SecondaryBlock {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_xfr: i64,
    #[serde(default)]
    pub expired: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Ns1Record {
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
}

/// Response of the per-zone instantaneous QPS endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct Ns1InstantQps {
    pub qps: f64,
}
