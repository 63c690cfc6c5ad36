use prometheus_client::registry::Registry;

use super::load_balancer::record_alarm;
use super::throughput::{ResourceKind, ThroughputMetrics};
use super::values::{STATUS_UP, bool_value, display_name, status_label, status_value};
use crate::join::{VsInfo, path_to_id};
use crate::registry::GaugeVec;

const LABELS: &[&str] = &["name", "id"];

#[derive(Debug, Clone)]
pub struct VirtualServerMetrics {
    enable: GaugeVec,
    status: GaugeVec,
    info: GaugeVec,
    alarm: GaugeVec,
    source_ip: GaugeVec,
    throughput: ThroughputMetrics,
}

impl VirtualServerMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        Self {
            enable: GaugeVec::register(
                registry,
                "virtual_server_enable",
                "Whether the virtual server is enabled",
                LABELS,
            ),
            status: GaugeVec::register(
                registry,
                "virtual_server_status",
                "Status of the virtual server, 1 is UP",
                &["name", "id", "status"],
            ),
            info: GaugeVec::register(
                registry,
                "virtual_server_info",
                "Virtual server settings as labels, value is always 1",
                &["name", "id", "ip", "pool_id", "lb_id"],
            ),
            alarm: GaugeVec::register(
                registry,
                "virtual_server_alarm",
                "Alarm firing on the virtual server, value is always 1",
                &["name", "id", "error_id", "message"],
            ),
            source_ip: GaugeVec::register(
                registry,
                "virtual_server_source_ip",
                "Number of source IP persistence entries",
                LABELS,
            ),
            throughput: ThroughputMetrics::register(registry, ResourceKind::VirtualServer),
        }
    }

    pub fn populate(&self, info: &VsInfo) {
        let id = info.config.id.as_str();
        let name = display_name(info.config.display_name.as_deref(), id);
        let labels = [name, id];

        self.enable.set(&labels, bool_value(info.config.enabled));

        let status = info.status.status.as_deref();
        self.status
            .set(&[name, id, status_label(status)], status_value(status, STATUS_UP));

        if let (Some(ip), Some(pool), Some(lb)) = (
            info.config.ip_address.as_deref(),
            info.config.pool_path.as_deref(),
            info.config.lb_service_path.as_deref(),
        ) {
            self.info
                .set(&[name, id, ip, path_to_id(pool), path_to_id(lb)], 1.0);
        }

        record_alarm(&self.alarm, labels, info.status.alarm.as_ref());

        if let Some(counter) = &info.stats.statistics {
            self.source_ip
                .observe(&labels, counter.source_ip_persistence_entry_size);
            self.throughput.record(&labels, counter);
        }
    }

    pub fn reset(&self) {
        self.enable.reset();
        self.status.reset();
        self.info.reset();
        self.alarm.reset();
        self.source_ip.reset();
        self.throughput.reset();
    }
}
