//! Metric families and the mapping from joined records to samples.
//!
//! Every family is registered once at startup. A scrape cycle clears a
//! family right before repopulating it, so resources that disappeared
//! upstream stop being exported.

pub mod cluster;
pub mod load_balancer;
pub mod node;
pub mod pool;
pub mod throughput;
pub mod tier;
pub mod values;
pub mod virtual_server;

use std::time::Duration;

use nsxt_client::GatewayKind;
use prometheus_client::registry::Registry;

pub use cluster::ClusterMetrics;
pub use load_balancer::LoadBalancerMetrics;
pub use node::NodeMetrics;
pub use pool::PoolMetrics;
pub use throughput::{ResourceKind, ThroughputMetrics};
pub use tier::TierMetrics;
pub use virtual_server::VirtualServerMetrics;

use crate::registry::FloatGauge;

/// Every family exported by the scraper.
#[derive(Debug, Clone)]
pub struct NsxtMetrics {
    scrape_error: FloatGauge,
    scrape_duration: FloatGauge,
    pub cluster: ClusterMetrics,
    pub node: NodeMetrics,
    pub load_balancer: LoadBalancerMetrics,
    pub virtual_server: VirtualServerMetrics,
    pub pool: PoolMetrics,
    pub tier0: TierMetrics,
    pub tier1: TierMetrics,
}

impl NsxtMetrics {
    /// Register every family on `registry`.
    pub fn register(registry: &mut Registry) -> Self {
        let scrape_error = FloatGauge::default();
        registry.register(
            "scrape_error",
            "1 if the last scrape cycle failed, 0 otherwise",
            scrape_error.clone(),
        );

        let scrape_duration = FloatGauge::default();
        registry.register(
            "scrape_duration_seconds",
            "Duration of the last successful scrape cycle",
            scrape_duration.clone(),
        );

        Self {
            scrape_error,
            scrape_duration,
            cluster: ClusterMetrics::register(registry),
            node: NodeMetrics::register(registry),
            load_balancer: LoadBalancerMetrics::register(registry),
            virtual_server: VirtualServerMetrics::register(registry),
            pool: PoolMetrics::register(registry),
            tier0: TierMetrics::register(registry, GatewayKind::Tier0),
            tier1: TierMetrics::register(registry, GatewayKind::Tier1),
        }
    }

    pub fn tier(&self, kind: GatewayKind) -> &TierMetrics {
        match kind {
            GatewayKind::Tier0 => &self.tier0,
            GatewayKind::Tier1 => &self.tier1,
        }
    }

    pub fn record_success(&self, duration: Duration) {
        self.scrape_error.set(0.0);
        self.scrape_duration.set(duration.as_secs_f64());
    }

    pub fn record_failure(&self) {
        self.scrape_error.set(1.0);
    }
}
