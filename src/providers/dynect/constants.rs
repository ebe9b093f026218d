/// Base URL for the DynECT REST API.
pub const DYNECT_API_BASE: &str = "https://api.dynect.net/REST";

/// Tag value and config key for this provider.
pub const PROVIDER_NAME: &str = "dyn";

/// Path prefix wrapping zone names in zone-list responses.
pub const ZONE_URI_PREFIX: &str = "/REST/Zone/";

/// Width of one QPS accounting interval in the tabular report.
pub const QPS_BUCKET_INTERVAL_SECS: f64 = 300.0;

/// How far back the QPS report request reaches. Two full buckets plus the
/// in-progress one, enough for the second-last-bucket selection.
pub const QPS_WINDOW_SECS: u64 = 15 * 60;
