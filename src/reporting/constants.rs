/// Prefix applied to every gauge name.
pub const METRIC_PREFIX: &str = "dnsmetrics";

/// Buffer size for datagrams drained by the once-mode listener.
pub const LISTENER_BUF_SIZE: usize = 2048;
