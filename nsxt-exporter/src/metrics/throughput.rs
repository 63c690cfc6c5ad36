//! Traffic counters shared by virtual servers, pools and pool members.

use nsxt_client::model::LbStatisticsCounter;
use prometheus_client::registry::Registry;

use crate::registry::GaugeVec;

/// Resources that report [`LbStatisticsCounter`] traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    VirtualServer,
    Pool,
    PoolMember,
}

impl ResourceKind {
    /// Metric name stem.
    pub fn object(&self) -> &'static str {
        match self {
            ResourceKind::VirtualServer => "virtual_server",
            ResourceKind::Pool => "pool",
            ResourceKind::PoolMember => "pool_member",
        }
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::VirtualServer | ResourceKind::Pool => &["name", "id"],
            ResourceKind::PoolMember => &["name", "id", "ip", "port"],
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ResourceKind::VirtualServer => "virtual server",
            ResourceKind::Pool => "pool",
            ResourceKind::PoolMember => "pool member",
        }
    }
}

/// A counter and its per-second rate.
#[derive(Debug, Clone)]
struct RatePair {
    current: GaugeVec,
    rate: GaugeVec,
}

impl RatePair {
    fn register(registry: &mut Registry, kind: ResourceKind, stem: &str, what: &str) -> Self {
        let labels = kind.label_names();
        Self {
            current: GaugeVec::register(
                registry,
                &format!("{}_{}", kind.object(), stem),
                &format!("Number of {} on {}", what, kind.describe()),
                labels,
            ),
            rate: GaugeVec::register(
                registry,
                &format!("{}_{}_rate", kind.object(), stem),
                &format!("Rate of {} per second on {}", what, kind.describe()),
                labels,
            ),
        }
    }

    fn reset(&self) {
        self.current.reset();
        self.rate.reset();
    }
}

/// Request, packet, byte and session gauges for one [`ResourceKind`].
#[derive(Debug, Clone)]
pub struct ThroughputMetrics {
    http_request: RatePair,
    in_packet: RatePair,
    out_packet: RatePair,
    in_byte: RatePair,
    out_byte: RatePair,
    session: RatePair,
    session_total: GaugeVec,
    session_max: GaugeVec,
}

impl ThroughputMetrics {
    pub fn register(registry: &mut Registry, kind: ResourceKind) -> Self {
        Self {
            http_request: RatePair::register(registry, kind, "http_request", "HTTP requests"),
            in_packet: RatePair::register(registry, kind, "in_packet", "received packets"),
            out_packet: RatePair::register(registry, kind, "out_packet", "sent packets"),
            in_byte: RatePair::register(registry, kind, "in_byte", "received bytes"),
            out_byte: RatePair::register(registry, kind, "out_byte", "sent bytes"),
            session: RatePair::register(registry, kind, "session", "current sessions"),
            session_total: GaugeVec::register(
                registry,
                &format!("{}_session_total", kind.object()),
                &format!("Total sessions handled by {}", kind.describe()),
                kind.label_names(),
            ),
            session_max: GaugeVec::register(
                registry,
                &format!("{}_session_max", kind.object()),
                &format!("Maximum concurrent sessions on {}", kind.describe()),
                kind.label_names(),
            ),
        }
    }

    /// Record the counters present in `counter`.
    pub fn record(&self, labels: &[&str], counter: &LbStatisticsCounter) {
        self.http_request.current.observe(labels, counter.http_requests);
        self.http_request.rate.observe(labels, counter.http_request_rate);
        self.in_packet.current.observe(labels, counter.packets_in);
        self.in_packet.rate.observe(labels, counter.packets_in_rate);
        self.out_packet.current.observe(labels, counter.packets_out);
        self.out_packet.rate.observe(labels, counter.packets_out_rate);
        self.in_byte.current.observe(labels, counter.bytes_in);
        self.in_byte.rate.observe(labels, counter.bytes_in_rate);
        self.out_byte.current.observe(labels, counter.bytes_out);
        self.out_byte.rate.observe(labels, counter.bytes_out_rate);
        self.session.current.observe(labels, counter.current_sessions);
        self.session.rate.observe(labels, counter.current_session_rate);
        self.session_total.observe(labels, counter.total_sessions);
        self.session_max.observe(labels, counter.max_sessions);
    }

    pub fn reset(&self) {
        self.http_request.reset();
        self.in_packet.reset();
        self.out_packet.reset();
        self.in_byte.reset();
        self.out_byte.reset();
        self.session.reset();
        self.session_total.reset();
        self.session_max.reset();
    }
}
