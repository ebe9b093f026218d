/// Base URL for the NS1 API.
pub const NS1_API_BASE: &str = "https://api.nsone.net/v1";

/// Tag value and config key for this provider.
pub const PROVIDER_NAME: &str = "ns1";

/// Header carrying the API key on every request.
pub const NS1_AUTH_HEADER: &str = "X-NSONE-Key";
