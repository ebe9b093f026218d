// Standard library
use std::collections::HashMap;

// 3rd party crates
use async_trait::async_trait;
use tracing::{debug, info};

// Project imports
use crate::providers::errors::ProviderError;
use crate::providers::traits::DnsProvider;
use crate::reporting::types::Reporter;

// Current module imports
use super::constants::PROVIDER_NAME;
use super::functions::{
    create_reqwest_client, get_qps_snapshot, get_zone_details, get_zone_records, get_zones, login,
    report_zone_metrics, unwrap_zone_name,
};
use super::types::{DynConfig, Dynect};

impl Dynect {
    pub fn new(config: DynConfig) -> Result<Self, ProviderError> {
        let client = create_reqwest_client()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl DnsProvider for Dynect {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn collect_metrics(&self, reporter: &Reporter) -> Result<(), ProviderError> {
        let token = login(self).await?;

        let zones = get_zones(self, &token).await?;

        // The QPS report covers the whole account; fetch it once per cycle.
        // A failure here only costs the zone.qps gauges.
        let qps_for_zone = match get_qps_snapshot(self, &token).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                info!("Error fetching QPS report: {}", e);
                HashMap::new()
            }
        };

        for zone_uri in zones {
            let zone = unwrap_zone_name(&zone_uri);
            debug!(zone = %zone, "Dyn provider is processing zone");

            let tagged = reporter.with_tags(&zone, PROVIDER_NAME);
            let details = get_zone_details(self, &token, &zone).await;
            let record_count = get_zone_records(self, &token, &zone).await;
            let qps = qps_for_zone.get(&zone).copied();

            report_zone_metrics(&zone, &tagged, details, record_count, qps);
        }

        Ok(())
    }
}
