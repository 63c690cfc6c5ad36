//! Labeled gauge families on top of the prometheus-client registry.

use std::sync::atomic::AtomicU64;

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

use crate::metrics::values::Observation;

/// Floating point gauge.
pub type FloatGauge = Gauge<f64, AtomicU64>;

type LabelSet = Vec<(String, String)>;

/// Content type of the exposition served on the metrics path.
pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// A gauge family with a fixed list of label names.
#[derive(Debug, Clone)]
pub struct GaugeVec {
    label_names: &'static [&'static str],
    family: Family<LabelSet, FloatGauge>,
}

impl GaugeVec {
    /// Create the family and register it under `name` (the registry adds
    /// its prefix).
    pub fn register(
        registry: &mut Registry,
        name: &str,
        help: &str,
        label_names: &'static [&'static str],
    ) -> Self {
        let family = Family::<LabelSet, FloatGauge>::default();
        registry.register(name, help, family.clone());
        Self {
            label_names,
            family,
        }
    }

    /// Set the series identified by `values`, given in label name order.
    pub fn set(&self, values: &[&str], value: f64) {
        debug_assert_eq!(values.len(), self.label_names.len());
        let labels: LabelSet = self
            .label_names
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.family.get_or_create(&labels).set(value);
    }

    /// Set the series if the value is present.
    pub fn observe(&self, values: &[&str], value: impl Observation) {
        if let Some(value) = value.observation() {
            self.set(values, value);
        }
    }

    /// Drop every series of the family.
    pub fn reset(&self) {
        self.family.clear();
    }
}

/// Render the registry in the OpenMetrics text format.
pub fn render(registry: &Registry) -> Result<String, std::fmt::Error> {
    let mut buffer = String::new();
    encode(&mut buffer, registry)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_value;

    #[test]
    fn test_set_and_render() {
        let mut registry = Registry::with_prefix("nsxt");
        let gauge = GaugeVec::register(
            &mut registry,
            "pool_status",
            "Pool status",
            &["name", "status"],
        );
        gauge.set(&["web", "UP"], 1.0);

        let text = render(&registry).unwrap();
        assert!(text.contains("# TYPE nsxt_pool_status gauge"));
        assert_eq!(
            sample_value(&text, r#"nsxt_pool_status{name="web",status="UP"}"#),
            Some(1.0)
        );
    }

    #[test]
    fn test_observe_skips_absent() {
        let mut registry = Registry::with_prefix("nsxt");
        let gauge = GaugeVec::register(&mut registry, "pool_member_min", "Min", &["name"]);
        gauge.observe(&["a"], None::<i64>);
        gauge.observe(&["b"], Some(3_i64));

        let text = render(&registry).unwrap();
        assert_eq!(sample_value(&text, r#"nsxt_pool_member_min{name="a"}"#), None);
        assert_eq!(sample_value(&text, r#"nsxt_pool_member_min{name="b"}"#), Some(3.0));
    }

    #[test]
    fn test_reset_drops_series() {
        let mut registry = Registry::with_prefix("nsxt");
        let gauge = GaugeVec::register(&mut registry, "tier0_info", "Info", &["id"]);
        gauge.set(&["t0"], 1.0);
        gauge.reset();

        let text = render(&registry).unwrap();
        assert_eq!(sample_value(&text, r#"nsxt_tier0_info{id="t0"}"#), None);
        assert!(text.contains("# TYPE nsxt_tier0_info gauge"));
    }
}
