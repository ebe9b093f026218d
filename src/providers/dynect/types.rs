// 3rd party crates
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the DynECT REST API.
#[derive(Debug, Clone)]
pub struct Dynect {
    pub config: DynConfig,
    pub(super) client: Client,
}

/// Credentials for the DynECT API. All three fields are required by the
/// login handshake.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DynConfig {
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of the session login request.
#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub customer_name: &'a str,
    pub user_name: &'a str,
    pub password: &'a str,
}

/// Response from the session login call.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginData {
    pub token: String,
}

/// Response from the zone listing call. Each entry is a zone URI in the
/// `/REST/Zone/<name>/` convention.
#[derive(Debug, Deserialize)]
pub(super) struct ZonesResponse {
    pub data: Vec<String>,
}

/// Response from the per-zone detail call.
#[derive(Debug, Deserialize)]
pub(super) struct ZoneResponse {
    pub data: ZoneData,
}

/// Details of a single zone.
#[derive(Debug, Deserialize, Clone)]
pub struct ZoneData {
    #[serde(default)]
    pub zone_type: String,
    #[serde(default)]
    pub serial: u64,
}

/// Response from the all-records call. Each entry is a record URI; only the
/// count is reported.
#[derive(Debug, Deserialize)]
pub(super) struct AllRecordsResponse {
    pub data: Vec<String>,
}

/// Body of the QPS report request.
#[derive(Debug, Serialize)]
pub(super) struct QpsReportRequest {
    pub start_ts: i64,
    pub end_ts: i64,
    pub breakdown: &'static str,
}

/// Response from the QPS report call; the report itself is a CSV payload.
#[derive(Debug, Deserialize)]
pub(super) struct QpsReportResponse {
    pub data: QpsReportData,
}

#[derive(Debug, Deserialize)]
pub(super) struct QpsReportData {
    pub csv: String,
}
