// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::providers::errors::ProviderError;
use crate::reporting::types::Reporter;

/// Core trait that all DNS hosting providers must implement.
///
/// A provider owns its own credentials and HTTP client configuration and
/// knows how to turn one polling cycle into a set of tagged gauges written
/// through the [`Reporter`] handle.
///
/// # Error semantics
///
/// `collect_metrics` returns an error only for provider-level failures:
/// rejected or missing credentials, or an unretrievable zone list. Those
/// abort the provider's cycle. Failures scoped to a single zone or a single
/// metric are absorbed inside the implementation: logged, the corresponding
/// gauge omitted, and collection continues with the next zone.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// The provider's name, used as the `provider` tag on every gauge.
    fn name(&self) -> &'static str;

    /// Runs one full collection cycle for this provider.
    ///
    /// Authenticates, lists zones, and for each zone emits the available
    /// gauges through a reporter cloned with `{zone, provider}` tags.
    async fn collect_metrics(&self, reporter: &Reporter) -> Result<(), ProviderError>;
}
