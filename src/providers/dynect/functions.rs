// 3rd party crates
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

// Project imports
use crate::functions::unix_now;
use crate::providers::errors::ProviderError;
use crate::reporting::functions::bool_to_gauge;
use crate::reporting::types::Reporter;

// Current module imports
use super::constants::{DYNECT_API_BASE, QPS_WINDOW_SECS, ZONE_URI_PREFIX};
use super::qps::{parse_qps_csv, select_second_last_bucket, QpsSnapshot};
use super::types::{
    AllRecordsResponse, DynConfig, Dynect, LoginRequest, LoginResponse, QpsReportRequest,
    QpsReportResponse, ZoneData, ZoneResponse, ZonesResponse,
};

/// Creates a reqwest client with the appropriate headers for the DynECT API.
pub(super) fn create_reqwest_client() -> Result<Client, ProviderError> {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let client: Client = Client::builder()
        .default_headers(headers)
        .build()
        .map_err(ProviderError::HttpClient)?;

    Ok(client)
}

/// Performs the session login handshake and returns the session token.
///
/// Sessions are cycle-scoped; every collection cycle logs in again.
pub(super) async fn login(dynect: &Dynect) -> Result<String, ProviderError> {
    let config: &DynConfig = &dynect.config;
    if config.customer.is_empty() || config.username.is_empty() || config.password.is_empty() {
        return Err(ProviderError::Auth(
            "customer, username, and password fields are required".to_string(),
        ));
    }

    let url = format!("{}/Session/", DYNECT_API_BASE);
    let response = dynect
        .client
        .post(&url)
        .json(&LoginRequest {
            customer_name: &config.customer,
            user_name: &config.username,
            password: &config.password,
        })
        .send()
        .await
        .map_err(|e| ProviderError::Auth(format!("login request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Auth(format!(
            "login rejected with HTTP {}",
            status
        )));
    }

    let body: LoginResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::Auth(format!("login response cannot be decoded: {}", e)))?;

    Ok(body.data.token)
}

/// Sends an authenticated GET request and decodes the JSON response.
async fn api_get<T: DeserializeOwned>(
    dynect: &Dynect,
    token: &str,
    endpoint: &str,
    what: &str,
) -> Result<T, ProviderError> {
    let url = format!("{}/{}", DYNECT_API_BASE, endpoint);
    let response = dynect
        .client
        .get(&url)
        .header("Auth-Token", token)
        .send()
        .await
        .map_err(|e| ProviderError::retrieval(what, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::retrieval(what, format!("HTTP {}", status)));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::retrieval(what, format!("cannot decode response: {}", e)))
}

/// Fetches the list of zone URIs for the account.
pub(super) async fn get_zones(dynect: &Dynect, token: &str) -> Result<Vec<String>, ProviderError> {
    let response: ZonesResponse = api_get(dynect, token, "Zone/", "the zone list").await?;
    Ok(response.data)
}

/// Fetches type and serial for a single zone.
pub(super) async fn get_zone_details(
    dynect: &Dynect,
    token: &str,
    zone: &str,
) -> Result<ZoneData, ProviderError> {
    let endpoint = format!("Zone/{}/", urlencoding::encode(zone));
    let response: ZoneResponse =
        api_get(dynect, token, &endpoint, &format!("zone {}", zone)).await?;
    Ok(response.data)
}

/// Fetches the number of records in a zone.
pub(super) async fn get_zone_records(
    dynect: &Dynect,
    token: &str,
    zone: &str,
) -> Result<usize, ProviderError> {
    let endpoint = format!("AllRecord/{}/", urlencoding::encode(zone));
    let response: AllRecordsResponse =
        api_get(dynect, token, &endpoint, &format!("records for zone {}", zone)).await?;
    Ok(response.data.len())
}

/// Fetches the tabular QPS report for the recent window and reduces it to the
/// per-zone snapshot of the second-most-recent bucket.
pub(super) async fn get_qps_snapshot(
    dynect: &Dynect,
    token: &str,
) -> Result<QpsSnapshot, ProviderError> {
    let now = unix_now();
    let url = format!("{}/QPSReport/", DYNECT_API_BASE);
    let what = "the QPS report";

    let response = dynect
        .client
        .post(&url)
        .header("Auth-Token", token)
        .json(&QpsReportRequest {
            start_ts: now - QPS_WINDOW_SECS as i64,
            end_ts: now,
            breakdown: "zones",
        })
        .send()
        .await
        .map_err(|e| ProviderError::retrieval(what, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::retrieval(what, format!("HTTP {}", status)));
    }

    let report: QpsReportResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::retrieval(what, format!("cannot decode response: {}", e)))?;

    let buckets = parse_qps_csv(&report.data.csv)?;
    Ok(select_second_last_bucket(&buckets)?)
}

/// Strips the `/REST/Zone/<name>/` envelope from a zone URI.
pub(super) fn unwrap_zone_name(uri: &str) -> String {
    uri.strip_prefix(ZONE_URI_PREFIX)
        .unwrap_or(uri)
        .trim_end_matches('/')
        .to_string()
}

/// Emits the zone type and serial gauges.
pub(super) fn report_zone_state(zone: &ZoneData, reporter: &Reporter) {
    reporter.gauge("zone.type.primary", bool_to_gauge(zone.zone_type == "Primary"));
    reporter.gauge(
        "zone.type.secondary",
        bool_to_gauge(zone.zone_type == "Secondary"),
    );
    reporter.gauge("zone.serial", zone.serial as f64);
}

/// Emits every gauge available for one zone, absorbing per-fetch failures.
///
/// A failed fetch is logged and its gauges omitted; it never affects the
/// other metrics of this zone or the collection of sibling zones.
pub(super) fn report_zone_metrics(
    zone: &str,
    reporter: &Reporter,
    details: Result<ZoneData, ProviderError>,
    record_count: Result<usize, ProviderError>,
    qps: Option<f64>,
) {
    match details {
        Ok(data) => report_zone_state(&data, reporter),
        Err(e) => info!(zone = %zone, "Error fetching zone details: {}", e),
    }

    match record_count {
        Ok(count) => reporter.gauge("zone.record_count", count as f64),
        Err(e) => info!(zone = %zone, "Error fetching list of records: {}", e),
    }

    match qps {
        Some(rate) => reporter.gauge("zone.qps", rate),
        None => debug!(zone = %zone, "No Dyn QPS data for zone"),
    }
}

#[cfg(test)]
mod tests {
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    use super::*;

    #[test]
    fn unwraps_zone_uri_envelope() {
        assert_eq!(unwrap_zone_name("/REST/Zone/example.com/"), "example.com");
        assert_eq!(unwrap_zone_name("example.com"), "example.com");
        assert_eq!(unwrap_zone_name("/REST/Zone/sub.example.org"), "sub.example.org");
    }

    #[test]
    fn zone_state_gauges_for_primary_zone() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let reporter = Reporter::new().with_tags("example.com", "dyn");
            let data = ZoneData {
                zone_type: "Primary".to_string(),
                serial: 2024010101,
            };
            report_zone_state(&data, &reporter);
        });

        let samples = snapshotter.snapshot().into_vec();
        assert_eq!(samples.len(), 3);
        for (key, _, _, value) in &samples {
            let key = key.key();
            let gauge = match value {
                DebugValue::Gauge(v) => v.into_inner(),
                other => panic!("expected a gauge, got {:?}", other),
            };
            match key.name() {
                "dnsmetrics.zone.type.primary" => assert_eq!(gauge, 1.0),
                "dnsmetrics.zone.type.secondary" => assert_eq!(gauge, 0.0),
                "dnsmetrics.zone.serial" => assert_eq!(gauge, 2024010101.0),
                other => panic!("unexpected gauge {}", other),
            }
        }
    }

    #[test]
    fn failing_zone_emits_nothing_while_siblings_emit_full_set() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let base = Reporter::new();
            for zone in ["one.example", "two.example", "three.example"] {
                let reporter = base.with_tags(zone, "dyn");
                if zone == "two.example" {
                    report_zone_metrics(
                        zone,
                        &reporter,
                        Err(ProviderError::retrieval("zone two.example", "timed out")),
                        Err(ProviderError::retrieval("records for zone two.example", "timed out")),
                        None,
                    );
                } else {
                    report_zone_metrics(
                        zone,
                        &reporter,
                        Ok(ZoneData {
                            zone_type: "Primary".to_string(),
                            serial: 7,
                        }),
                        Ok(12),
                        Some(1.5),
                    );
                }
            }
        });

        let samples = snapshotter.snapshot().into_vec();
        // 5 gauges each for the two healthy zones, none for the failed one.
        assert_eq!(samples.len(), 10);
        for (key, _, _, _) in &samples {
            let zone_label = key
                .key()
                .labels()
                .find(|l| l.key() == "zone")
                .map(|l| l.value().to_string())
                .unwrap();
            assert_ne!(zone_label, "two.example");
        }
    }
}
