use nsxt_client::model::{LbServiceStatisticsCounter, RuntimeAlarm};
use prometheus_client::registry::Registry;

use super::values::{STATUS_UP, bool_value, display_name, status_label, status_value};
use crate::join::LbInfo;
use crate::registry::GaugeVec;

const LABELS: &[&str] = &["name", "id"];

/// Layer 4 or layer 7 session gauges of a load balancer.
#[derive(Debug, Clone)]
struct SessionMetrics {
    rate: GaugeVec,
    current: GaugeVec,
    total: GaugeVec,
    max: GaugeVec,
}

impl SessionMetrics {
    fn register(registry: &mut Registry, layer: &str) -> Self {
        let family = |registry: &mut Registry, stat: &str, help: &str| {
            GaugeVec::register(
                registry,
                &format!("load_balancer_session_{}_{}", layer, stat),
                &format!("{} {} sessions on load balancer", help, layer.to_uppercase()),
                LABELS,
            )
        };
        Self {
            rate: family(registry, "rate", "Rate per second of"),
            current: family(registry, "current", "Current"),
            total: family(registry, "total", "Total"),
            max: family(registry, "max", "Maximum concurrent"),
        }
    }

    fn record(
        &self,
        labels: &[&str],
        rate: Option<f64>,
        current: Option<i64>,
        total: Option<i64>,
        max: Option<i64>,
    ) {
        self.rate.observe(labels, rate);
        self.current.observe(labels, current);
        self.total.observe(labels, total);
        self.max.observe(labels, max);
    }

    fn reset(&self) {
        self.rate.reset();
        self.current.reset();
        self.total.reset();
        self.max.reset();
    }
}

/// Emit an alarm presence sample when both alarm labels are known.
pub(super) fn record_alarm(family: &GaugeVec, labels: [&str; 2], alarm: Option<&RuntimeAlarm>) {
    if let Some(RuntimeAlarm {
        error_id: Some(error_id),
        message: Some(message),
    }) = alarm
    {
        family.set(&[labels[0], labels[1], error_id.as_str(), message.as_str()], 1.0);
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancerMetrics {
    enable: GaugeVec,
    status: GaugeVec,
    info: GaugeVec,
    cpu: GaugeVec,
    mem: GaugeVec,
    error: GaugeVec,
    alarm: GaugeVec,
    virtual_server: GaugeVec,
    session_l4: SessionMetrics,
    session_l7: SessionMetrics,
}

impl LoadBalancerMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        Self {
            enable: GaugeVec::register(
                registry,
                "load_balancer_enable",
                "Whether the load balancer is enabled",
                LABELS,
            ),
            status: GaugeVec::register(
                registry,
                "load_balancer_status",
                "Status of the load balancer, 1 is UP",
                &["name", "id", "status"],
            ),
            info: GaugeVec::register(
                registry,
                "load_balancer_info",
                "Load balancer settings as labels, value is always 1",
                &["name", "id", "size"],
            ),
            cpu: GaugeVec::register(registry, "load_balancer_cpu", "CPU usage in percent", LABELS),
            mem: GaugeVec::register(
                registry,
                "load_balancer_mem",
                "Memory usage in percent",
                LABELS,
            ),
            error: GaugeVec::register(
                registry,
                "load_balancer_error",
                "Error reported by the load balancer, value is always 1",
                &["name", "id", "message"],
            ),
            alarm: GaugeVec::register(
                registry,
                "load_balancer_alarm",
                "Alarm firing on the load balancer, value is always 1",
                &["name", "id", "error_id", "message"],
            ),
            virtual_server: GaugeVec::register(
                registry,
                "load_balancer_virtual_server",
                "Number of virtual servers attached to the load balancer",
                LABELS,
            ),
            session_l4: SessionMetrics::register(registry, "l4"),
            session_l7: SessionMetrics::register(registry, "l7"),
        }
    }

    pub fn populate(&self, info: &LbInfo) {
        let id = info.config.id.as_str();
        let name = display_name(info.config.display_name.as_deref(), id);
        let labels = [name, id];

        self.enable.set(&labels, bool_value(info.config.enabled));

        let status = info.status.service_status.as_deref();
        self.status
            .set(&[name, id, status_label(status)], status_value(status, STATUS_UP));

        if let Some(size) = info.config.size.as_deref() {
            self.info.set(&[name, id, size], 1.0);
        }

        self.cpu.observe(&labels, info.status.cpu_usage);
        self.mem.observe(&labels, info.status.memory_usage);

        if let Some(message) = info.status.error_message.as_deref() {
            self.error.set(&[name, id, message], 1.0);
        }
        record_alarm(&self.alarm, labels, info.status.alarm.as_ref());

        self.virtual_server
            .set(&labels, info.status.virtual_servers.len() as f64);

        if let Some(LbServiceStatisticsCounter {
            l4_current_session_rate,
            l4_current_sessions,
            l4_max_sessions,
            l4_total_sessions,
            l7_current_session_rate,
            l7_current_sessions,
            l7_max_sessions,
            l7_total_sessions,
        }) = &info.stats.statistics
        {
            self.session_l4.record(
                &labels,
                *l4_current_session_rate,
                *l4_current_sessions,
                *l4_total_sessions,
                *l4_max_sessions,
            );
            self.session_l7.record(
                &labels,
                *l7_current_session_rate,
                *l7_current_sessions,
                *l7_total_sessions,
                *l7_max_sessions,
            );
        }
    }

    pub fn reset(&self) {
        self.enable.reset();
        self.status.reset();
        self.info.reset();
        self.cpu.reset();
        self.mem.reset();
        self.error.reset();
        self.alarm.reset();
        self.virtual_server.reset();
        self.session_l4.reset();
        self.session_l7.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::render;
    use crate::testing::sample_value;
    use serde_json::json;

    fn lb_info(
        config: serde_json::Value,
        status: serde_json::Value,
        stats: serde_json::Value,
    ) -> LbInfo {
        LbInfo {
            config: serde_json::from_value(config).unwrap(),
            status: serde_json::from_value(status).unwrap(),
            stats: serde_json::from_value(stats).unwrap(),
            virtual_servers: Vec::new(),
            pools: Vec::new(),
        }
    }

    #[test]
    fn test_populated_load_balancer() {
        let mut registry = Registry::with_prefix("nsxt");
        let metrics = LoadBalancerMetrics::register(&mut registry);
        let info = lb_info(
            json!({ "id": "lb1", "display_name": "web-lb", "enabled": true, "size": "SMALL" }),
            json!({
                "service_status": "UP",
                "cpu_usage": 12,
                "error_message": "backend flapping",
                "alarm": { "error_id": "E1", "message": "pool down" },
                "virtual_servers": [{}, {}, {}]
            }),
            json!({ "statistics": { "l4_current_sessions": 5, "l7_current_session_rate": 1.5 } }),
        );
        metrics.populate(&info);

        let text = render(&registry).unwrap();
        let labels = r#"name="web-lb",id="lb1""#;
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_enable{{{labels}}}")),
            Some(1.0)
        );
        assert_eq!(
            sample_value(&text, &format!(r#"nsxt_load_balancer_status{{{labels},status="UP"}}"#)),
            Some(1.0)
        );
        assert_eq!(
            sample_value(&text, &format!(r#"nsxt_load_balancer_info{{{labels},size="SMALL"}}"#)),
            Some(1.0)
        );
        assert_eq!(sample_value(&text, &format!("nsxt_load_balancer_cpu{{{labels}}}")), Some(12.0));
        assert_eq!(sample_value(&text, &format!("nsxt_load_balancer_mem{{{labels}}}")), None);
        assert_eq!(
            sample_value(
                &text,
                &format!(r#"nsxt_load_balancer_error{{{labels},message="backend flapping"}}"#),
            ),
            Some(1.0)
        );
        assert_eq!(
            sample_value(
                &text,
                &format!(
                    r#"nsxt_load_balancer_alarm{{{labels},error_id="E1",message="pool down"}}"#
                ),
            ),
            Some(1.0)
        );
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_virtual_server{{{labels}}}")),
            Some(3.0)
        );
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_session_l4_current{{{labels}}}")),
            Some(5.0)
        );
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_session_l7_rate{{{labels}}}")),
            Some(1.5)
        );
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_session_l4_total{{{labels}}}")),
            None
        );
    }

    #[test]
    fn test_sparse_load_balancer() {
        let mut registry = Registry::with_prefix("nsxt");
        let metrics = LoadBalancerMetrics::register(&mut registry);
        let info = lb_info(
            json!({ "id": "lb2" }),
            json!({ "alarm": { "message": "no id" } }),
            json!({}),
        );
        metrics.populate(&info);

        let text = render(&registry).unwrap();
        let labels = r#"name="lb2",id="lb2""#;
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_enable{{{labels}}}")),
            Some(0.0)
        );
        assert_eq!(
            sample_value(
                &text,
                &format!(r#"nsxt_load_balancer_status{{{labels},status="UNKNOWN"}}"#),
            ),
            Some(0.0)
        );
        assert_eq!(
            sample_value(&text, &format!("nsxt_load_balancer_virtual_server{{{labels}}}")),
            Some(0.0)
        );
        assert!(!text.contains("nsxt_load_balancer_info{"));
        assert!(!text.contains("nsxt_load_balancer_alarm{"));
        assert!(!text.contains("nsxt_load_balancer_error{"));
    }
}
