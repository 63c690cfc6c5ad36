use prometheus_client::registry::Registry;

use super::load_balancer::record_alarm;
use super::throughput::{ResourceKind, ThroughputMetrics};
use super::values::{STATUS_UP, display_name, status_label, status_value};
use crate::join::{MemberInfo, PoolInfo};
use crate::registry::GaugeVec;

const LABELS: &[&str] = &["name", "id"];

/// Pool member gauges, labeled with the owning pool.
#[derive(Debug, Clone)]
struct MemberMetrics {
    status: GaugeVec,
    failure: GaugeVec,
    throughput: ThroughputMetrics,
}

impl MemberMetrics {
    fn register(registry: &mut Registry) -> Self {
        Self {
            status: GaugeVec::register(
                registry,
                "pool_member_status",
                "Status of the pool member, 1 is UP",
                &["name", "id", "ip", "port", "status"],
            ),
            failure: GaugeVec::register(
                registry,
                "pool_member_failure",
                "Failure cause of the pool member, value is always 1",
                &["name", "id", "ip", "port", "cause"],
            ),
            throughput: ThroughputMetrics::register(registry, ResourceKind::PoolMember),
        }
    }

    fn populate(&self, pool: [&str; 2], member: &MemberInfo) {
        let ip = member.status.ip_address.as_deref().unwrap_or("");
        let port = member.status.port.as_deref().unwrap_or("");
        let labels = [pool[0], pool[1], ip, port];

        let status = member.status.status.as_deref();
        self.status.set(
            &[pool[0], pool[1], ip, port, status_label(status)],
            status_value(status, STATUS_UP),
        );

        if let Some(cause) = member.status.failure_cause.as_deref() {
            self.failure.set(&[pool[0], pool[1], ip, port, cause], 1.0);
        }

        if let Some(counter) = &member.stats.statistics {
            self.throughput.record(&labels, counter);
        }
    }

    fn reset(&self) {
        self.status.reset();
        self.failure.reset();
        self.throughput.reset();
    }
}

#[derive(Debug, Clone)]
pub struct PoolMetrics {
    status: GaugeVec,
    info: GaugeVec,
    alarm: GaugeVec,
    member: GaugeVec,
    member_min: GaugeVec,
    throughput: ThroughputMetrics,
    members: MemberMetrics,
}

impl PoolMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        Self {
            status: GaugeVec::register(
                registry,
                "pool_status",
                "Status of the pool, 1 is UP",
                &["name", "id", "status"],
            ),
            info: GaugeVec::register(
                registry,
                "pool_info",
                "Pool settings as labels, value is always 1",
                &["name", "id", "port", "algorithm"],
            ),
            alarm: GaugeVec::register(
                registry,
                "pool_alarm",
                "Alarm firing on the pool, value is always 1",
                &["name", "id", "error_id", "message"],
            ),
            member: GaugeVec::register(
                registry,
                "pool_member",
                "Number of members in the pool",
                LABELS,
            ),
            member_min: GaugeVec::register(
                registry,
                "pool_member_min",
                "Minimum number of active members for the pool to be up",
                LABELS,
            ),
            throughput: ThroughputMetrics::register(registry, ResourceKind::Pool),
            members: MemberMetrics::register(registry),
        }
    }

    pub fn populate(&self, info: &PoolInfo) {
        let id = info.config.id.as_str();
        let name = display_name(info.config.display_name.as_deref(), id);
        let labels = [name, id];

        let status = info.status.status.as_deref();
        self.status
            .set(&[name, id, status_label(status)], status_value(status, STATUS_UP));

        let port = info.config.member_group.as_ref().and_then(|g| g.port);
        if let (Some(port), Some(algorithm)) = (port, info.config.algorithm.as_deref()) {
            let port = port.to_string();
            self.info.set(&[name, id, port.as_str(), algorithm], 1.0);
        }

        record_alarm(&self.alarm, labels, info.status.alarm.as_ref());

        self.member.set(&labels, info.status.members.len() as f64);
        self.member_min.observe(&labels, info.config.min_active_members);

        if let Some(counter) = &info.stats.statistics {
            self.throughput.record(&labels, counter);
        }

        for member in &info.members {
            self.members.populate(labels, member);
        }
    }

    pub fn reset(&self) {
        self.status.reset();
        self.info.reset();
        self.alarm.reset();
        self.member.reset();
        self.member_min.reset();
        self.throughput.reset();
        self.members.reset();
    }
}
