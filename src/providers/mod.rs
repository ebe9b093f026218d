pub mod dynect;
pub mod errors;
pub mod ns1;
pub mod traits;

pub use errors::ProviderError;
pub use traits::DnsProvider;
