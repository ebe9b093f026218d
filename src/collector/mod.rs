// 3rd party crates
use tracing::{debug, info};

// Project imports
use crate::providers::dynect::constants::PROVIDER_NAME as DYN_PROVIDER;
use crate::providers::dynect::Dynect;
use crate::providers::ns1::constants::PROVIDER_NAME as NS1_PROVIDER;
use crate::providers::ns1::Ns1;
use crate::providers::{DnsProvider, ProviderError};
use crate::reporting::types::Reporter;
use crate::settings::types::ConfigManager;

/// Runs one full collection cycle across all enabled providers.
///
/// Providers are invoked sequentially in configured order. A provider-level
/// failure (construction, authentication, zone listing) is logged and never
/// stops the remaining providers; nothing from a cycle outlives the cycle.
pub async fn run_cycle(config: &ConfigManager, reporter: &Reporter) {
    let (providers, dyn_config, ns1_config) = {
        let settings = config.get_settings().await;
        (
            settings.providers.clone(),
            settings.dynect.clone(),
            settings.ns1.clone(),
        )
    };

    for provider in &providers {
        match provider.as_str() {
            name if name == DYN_PROVIDER => {
                // Validation guarantees the section exists for enabled providers.
                let provider_config = dyn_config.clone().unwrap_or_default();
                collect(name, Dynect::new(provider_config), reporter).await;
            }
            name if name == NS1_PROVIDER => {
                let provider_config = ns1_config.clone().unwrap_or_default();
                collect(name, Ns1::new(provider_config), reporter).await;
            }
            name => debug!("Skipping unknown provider '{}'", name),
        }
    }
}

/// Drives one provider's cycle, absorbing its failure.
async fn collect<P: DnsProvider>(
    name: &str,
    provider: Result<P, ProviderError>,
    reporter: &Reporter,
) {
    let provider = match provider {
        Ok(provider) => provider,
        Err(e) => {
            info!("{} provider metrics collection was unsuccessful: {}", name, e);
            return;
        }
    };

    if let Err(e) = provider.collect_metrics(reporter).await {
        info!("{} provider metrics collection was unsuccessful: {}", name, e);
    } else {
        debug!("{} provider metrics collection completed", name);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct StubProvider<'a> {
        calls: &'a AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl DnsProvider for StubProvider<'_> {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn collect_metrics(&self, _reporter: &Reporter) -> Result<(), ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ProviderError::Auth("credentials rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn a_failing_provider_does_not_stop_the_cycle() {
        let reporter = Reporter::new();
        let calls = AtomicUsize::new(0);

        collect(
            "first",
            Ok(StubProvider {
                calls: &calls,
                fail: true,
            }),
            &reporter,
        )
        .await;
        collect(
            "second",
            Ok(StubProvider {
                calls: &calls,
                fail: false,
            }),
            &reporter,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn a_provider_that_fails_to_construct_is_skipped() {
        let reporter = Reporter::new();
        let calls = AtomicUsize::new(0);

        collect::<StubProvider<'_>>(
            "broken",
            Err(ProviderError::Auth("API key is not set".to_string())),
            &reporter,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
