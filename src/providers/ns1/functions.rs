// 3rd party crates
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;

// Project imports
use crate::providers::errors::ProviderError;
use crate::reporting::functions::bool_to_gauge;
use crate::reporting::types::Reporter;

// Current module imports
use super::constants::{NS1_API_BASE, NS1_AUTH_HEADER};
use super::types::{Ns1, Ns1InstantQps, Ns1Zone, Ns1ZoneSummary};

/// Creates a reqwest client carrying the API key on every request.
pub(super) fn create_reqwest_client(api_key: &str) -> Result<Client, ProviderError> {
    let mut headers: HeaderMap = HeaderMap::new();

    let mut key_value: HeaderValue =
        HeaderValue::from_str(api_key).map_err(ProviderError::InvalidHeaderValue)?;
    key_value.set_sensitive(true);
    headers.insert(NS1_AUTH_HEADER, key_value);

    let client: Client = Client::builder()
        .default_headers(headers)
        .build()
        .map_err(ProviderError::HttpClient)?;

    Ok(client)
}

/// Fetches the zone listing.
///
/// A non-success status degrades to an empty list: the provider may be
/// transiently degraded and a best-effort cycle beats a failed one. Transport
/// failures and undecodable bodies are still errors.
pub(super) async fn get_zones(ns1: &Ns1) -> Result<Vec<Ns1ZoneSummary>, ProviderError> {
    let what = "the zone list";
    let url = format!("{}/zones", NS1_API_BASE);
    let response = ns1
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| ProviderError::retrieval(what, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::retrieval(what, e))?;

    zones_from_response(status, &body)
}

/// Decodes the zone-listing response body for a given HTTP status.
pub(super) fn zones_from_response(
    status: StatusCode,
    body: &str,
) -> Result<Vec<Ns1ZoneSummary>, ProviderError> {
    if !status.is_success() {
        debug!("NS1 zone listing returned HTTP {}", status);
        return Ok(Vec::new());
    }

    serde_json::from_str(body).map_err(|e| {
        ProviderError::retrieval("the zone list", format!("cannot decode response: {}", e))
    })
}

/// Fetches full details for one zone, or `None` on a non-success status.
pub(super) async fn get_zone_details(
    ns1: &Ns1,
    zone: &str,
) -> Result<Option<Ns1Zone>, ProviderError> {
    let what = format!("zone {}", zone);
    let url = format!("{}/zones/{}", NS1_API_BASE, urlencoding::encode(zone));
    let response = ns1
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| ProviderError::retrieval(&what, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::retrieval(&what, e))?;

    details_from_response(zone, status, &body)
}

/// Decodes the zone-detail response body for a given HTTP status.
pub(super) fn details_from_response(
    zone: &str,
    status: StatusCode,
    body: &str,
) -> Result<Option<Ns1Zone>, ProviderError> {
    if !status.is_success() {
        debug!(zone = %zone, "NS1 zone detail returned HTTP {}", status);
        return Ok(None);
    }

    serde_json::from_str(body).map(Some).map_err(|e| {
        ProviderError::retrieval(
            format!("zone {}", zone),
            format!("cannot decode response: {}", e),
        )
    })
}

/// Fetches the instantaneous QPS for one zone, or `None` on a non-success
/// status. Absence means "no QPS for this zone this cycle", never zero.
pub(super) async fn get_instant_qps(ns1: &Ns1, zone: &str) -> Result<Option<f64>, ProviderError> {
    let what = format!("QPS for zone {}", zone);
    let url = format!("{}/stats/qps/{}", NS1_API_BASE, urlencoding::encode(zone));
    let response = ns1
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| ProviderError::retrieval(&what, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::retrieval(&what, e))?;

    qps_from_response(zone, status, &body)
}

/// Decodes the instant-QPS response body for a given HTTP status.
pub(super) fn qps_from_response(
    zone: &str,
    status: StatusCode,
    body: &str,
) -> Result<Option<f64>, ProviderError> {
    if !status.is_success() {
        debug!(zone = %zone, "NS1 instant QPS returned HTTP {}", status);
        return Ok(None);
    }

    serde_json::from_str::<Ns1InstantQps>(body)
        .map(|q| Some(q.qps))
        .map_err(|e| {
            ProviderError::retrieval(
                format!("QPS for zone {}", zone),
                format!("cannot decode response: {}", e),
            )
        })
}

/// Emits the zone type, record count, and secondary-sync health gauges.
pub(super) fn report_zone_state(zone: &Ns1Zone, now_unix: i64, reporter: &Reporter) {
    reporter.gauge("zone.type.primary", bool_to_gauge(zone.primary.enabled));
    reporter.gauge("zone.record_count", zone.records.len() as f64);

    if zone.secondary.enabled {
        reporter.gauge("zone.type.secondary", 1.0);
        reporter.gauge(
            "zone.secondary.is_ok",
            bool_to_gauge(zone.secondary.status == "ok"),
        );
        reporter.gauge(
            "zone.secondary.sec_since_last_xfr",
            (now_unix - zone.secondary.last_xfr) as f64,
        );
        reporter.gauge(
            "zone.secondary.is_expired",
            bool_to_gauge(zone.secondary.expired),
        );
    } else {
        reporter.gauge("zone.type.secondary", 0.0);
    }
}
