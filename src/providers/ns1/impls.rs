// 3rd party crates
use async_trait::async_trait;
use tracing::{debug, info};

// Project imports
use crate::functions::unix_now;
use crate::providers::errors::ProviderError;
use crate::providers::traits::DnsProvider;
use crate::reporting::types::Reporter;

// Current module imports
use super::constants::PROVIDER_NAME;
use super::functions::{
    create_reqwest_client, get_instant_qps, get_zone_details, get_zones, report_zone_state,
};
use super::types::{Ns1, Ns1Config};

impl Ns1 {
    pub fn new(config: Ns1Config) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::Auth("NS1 API key is not set".to_string()));
        }
        let client = create_reqwest_client(&config.api_key)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl DnsProvider for Ns1 {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn collect_metrics(&self, reporter: &Reporter) -> Result<(), ProviderError> {
        let zones = get_zones(self).await?;

        for summary in zones {
            let zone = summary.zone;
            debug!(zone = %zone, "NS1 provider is processing zone");

            let tagged = reporter.with_tags(&zone, PROVIDER_NAME);

            match get_zone_details(self, &zone).await {
                Ok(Some(details)) => report_zone_state(&details, unix_now(), &tagged),
                Ok(None) => debug!(zone = %zone, "No zone details available"),
                Err(e) => info!(zone = %zone, "Error fetching zone details: {}", e),
            }

            match get_instant_qps(self, &zone).await {
                Ok(Some(qps)) => tagged.gauge("zone.qps", qps),
                Ok(None) => {}
                Err(e) => debug!(zone = %zone, "Error fetching instant QPS: {}", e),
            }
        }

        Ok(())
    }
}
