// 3rd party crates
use metrics::Label;

// Current module imports
use super::constants::METRIC_PREFIX;

/// Handle for emitting tagged gauges through the global metrics recorder.
///
/// The handle itself holds no connection state, only the label set applied to
/// every gauge it emits, so it is cheap to clone and safe to share. Samples
/// are fire-and-forget; delivery is the installed exporter's concern.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    labels: Vec<Label>,
}

impl Reporter {
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Returns a child handle carrying the `zone` and `provider` tags in
    /// addition to this handle's labels.
    pub fn with_tags(&self, zone: &str, provider: &str) -> Self {
        let mut labels = self.labels.clone();
        labels.push(Label::new("zone".to_string(), zone.to_string()));
        labels.push(Label::new("provider".to_string(), provider.to_string()));
        Self { labels }
    }

    /// Emits one gauge sample under the shared metric prefix.
    pub fn gauge(&self, name: &str, value: f64) {
        let key = format!("{}.{}", METRIC_PREFIX, name);
        metrics::gauge!(key, self.labels.clone()).set(value);
    }
}

#[cfg(test)]
mod tests {
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    use super::*;

    #[test]
    fn gauges_carry_prefix_and_tags() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let reporter = Reporter::new().with_tags("example.com", "dyn");
            reporter.gauge("zone.qps", 2.5);
        });

        let samples = snapshotter.snapshot().into_vec();
        assert_eq!(samples.len(), 1);

        let (key, _, _, value) = &samples[0];
        let key = key.key();
        assert_eq!(key.name(), "dnsmetrics.zone.qps");

        let labels: Vec<(String, String)> = key
            .labels()
            .map(|l| (l.key().to_string(), l.value().to_string()))
            .collect();
        assert!(labels.contains(&("zone".to_string(), "example.com".to_string())));
        assert!(labels.contains(&("provider".to_string(), "dyn".to_string())));

        match value {
            DebugValue::Gauge(v) => assert_eq!(v.into_inner(), 2.5),
            other => panic!("expected a gauge, got {:?}", other),
        }
    }

    #[test]
    fn with_tags_does_not_mutate_the_parent() {
        let base = Reporter::new();
        let _tagged = base.with_tags("example.com", "ns1");

        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, || {
            base.gauge("zone.qps", 1.0);
        });

        let samples = snapshotter.snapshot().into_vec();
        assert_eq!(samples[0].0.key().labels().count(), 0);
    }
}
