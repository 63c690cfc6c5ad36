use nsxt_client::model::ClusterStatus;
use prometheus_client::registry::Registry;

use super::values::{STATUS_STABLE, status_label, status_value};
use crate::registry::GaugeVec;

#[derive(Debug, Clone)]
pub struct ClusterMetrics {
    control_status: GaugeVec,
    mgmt_status: GaugeVec,
}

impl ClusterMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        Self {
            control_status: GaugeVec::register(
                registry,
                "cluster_control_status",
                "Status of the control cluster, 1 is STABLE",
                &["status"],
            ),
            mgmt_status: GaugeVec::register(
                registry,
                "cluster_mgmt_status",
                "Status of the management cluster, 1 is STABLE",
                &["status"],
            ),
        }
    }

    pub fn populate(&self, cluster: &ClusterStatus) {
        let control = cluster.control_cluster_status.status.as_deref();
        self.control_status
            .set(&[status_label(control)], status_value(control, STATUS_STABLE));

        let mgmt = cluster.mgmt_cluster_status.status.as_deref();
        self.mgmt_status
            .set(&[status_label(mgmt)], status_value(mgmt, STATUS_STABLE));
    }

    pub fn reset(&self) {
        self.control_status.reset();
        self.mgmt_status.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::render;
    use crate::testing::sample_value;

    #[test]
    fn test_status_values() {
        let mut registry = Registry::with_prefix("nsxt");
        let metrics = ClusterMetrics::register(&mut registry);
        let cluster: ClusterStatus = serde_json::from_value(serde_json::json!({
            "control_cluster_status": { "status": "STABLE" },
            "mgmt_cluster_status": { "status": "DEGRADED" }
        }))
        .unwrap();
        metrics.populate(&cluster);

        let text = render(&registry).unwrap();
        assert_eq!(
            sample_value(&text, r#"nsxt_cluster_control_status{status="STABLE"}"#),
            Some(1.0)
        );
        assert_eq!(
            sample_value(&text, r#"nsxt_cluster_mgmt_status{status="DEGRADED"}"#),
            Some(0.0)
        );
    }

    #[test]
    fn test_absent_status_is_unknown() {
        let mut registry = Registry::with_prefix("nsxt");
        let metrics = ClusterMetrics::register(&mut registry);
        metrics.populate(&ClusterStatus::default());

        let text = render(&registry).unwrap();
        assert_eq!(
            sample_value(&text, r#"nsxt_cluster_control_status{status="UNKNOWN"}"#),
            Some(0.0)
        );
        assert_eq!(sample_value(&text, r#"nsxt_cluster_mgmt_status{status="UNKNOWN"}"#), Some(0.0));
    }
}
