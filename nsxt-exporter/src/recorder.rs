//! One scrape cycle: fetch, join, filter and map every resource family.
//!
//! Stages run in a fixed order (cluster, nodes, load balancers, tier-1,
//! tier-0) and the first error abandons the rest of the cycle. A stage
//! fetches everything it needs before clearing and repopulating its
//! families, so a failed stage leaves the previous samples in place.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nsxt_client::model::{Gateway, LbService};
use nsxt_client::{GatewayKind, NsxtApi};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::filter::Filters;
use crate::join::{fetch_load_balancer, fetch_node, fetch_tier};
use crate::metrics::NsxtMetrics;
use crate::pagination::walk_pages;

/// Runs scrape cycles against one manager.
pub struct Recorder {
    api: Arc<dyn NsxtApi>,
    metrics: NsxtMetrics,
    filters: Filters,
}

impl Recorder {
    pub fn new(api: Arc<dyn NsxtApi>, metrics: NsxtMetrics, filters: Filters) -> Self {
        Self {
            api,
            metrics,
            filters,
        }
    }

    /// Run one cycle and update the scrape error and duration gauges.
    ///
    /// Returns the cycle duration on success.
    pub async fn record(&self) -> Result<Duration> {
        let started = Instant::now();
        match self.collect().await {
            Ok(()) => {
                let elapsed = started.elapsed();
                self.metrics.record_success(elapsed);
                Ok(elapsed)
            }
            Err(e) => {
                self.metrics.record_failure();
                Err(e)
            }
        }
    }

    async fn collect(&self) -> Result<()> {
        let node_ids = self.record_cluster().await?;
        self.record_nodes(&node_ids).await?;
        self.record_load_balancers().await?;
        self.record_gateways(GatewayKind::Tier1).await?;
        self.record_gateways(GatewayKind::Tier0).await?;
        Ok(())
    }

    async fn record_cluster(&self) -> Result<Vec<String>> {
        let cluster = self.api.cluster_status().await?;
        let node_ids = cluster.node_ids();
        debug!(nodes = node_ids.len(), "Fetched cluster status");

        self.metrics.cluster.reset();
        self.metrics.cluster.populate(&cluster);
        Ok(node_ids)
    }

    async fn record_nodes(&self, node_ids: &[String]) -> Result<()> {
        let mut nodes = Vec::with_capacity(node_ids.len());
        for node_id in node_ids {
            nodes.push(fetch_node(self.api.as_ref(), node_id).await?);
        }

        self.metrics.node.reset();
        let mut first_error = None;
        for node in &nodes {
            if let Err(e) = self.metrics.node.populate(node) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(ScrapeError::Certificate(e)),
            None => Ok(()),
        }
    }

    async fn record_load_balancers(&self) -> Result<()> {
        let api = self.api.as_ref();
        let allowlist = &self.filters.load_balancer;
        let services = walk_pages(
            |cursor| api.list_lb_services(cursor),
            |lb: &LbService| allowlist.includes(lb.display_name.as_deref(), &lb.id),
        )
        .await?;
        debug!(load_balancers = services.len(), "Listed load balancers");

        let mut infos = Vec::with_capacity(services.len());
        for service in &services {
            infos.push(fetch_load_balancer(api, &service.id, &self.filters.virtual_server).await?);
        }

        self.metrics.load_balancer.reset();
        self.metrics.virtual_server.reset();
        self.metrics.pool.reset();
        for info in &infos {
            self.metrics.load_balancer.populate(info);
            for vs in &info.virtual_servers {
                self.metrics.virtual_server.populate(vs);
            }
            for pool in &info.pools {
                self.metrics.pool.populate(pool);
            }
        }
        Ok(())
    }

    async fn record_gateways(&self, kind: GatewayKind) -> Result<()> {
        let api = self.api.as_ref();
        let allowlist = self.filters.gateways(kind);
        let gateways = walk_pages(
            |cursor| api.list_gateways(kind, cursor),
            |gw: &Gateway| allowlist.includes(gw.display_name.as_deref(), &gw.id),
        )
        .await?;
        debug!(kind = %kind, gateways = gateways.len(), "Listed gateways");

        let mut infos = Vec::with_capacity(gateways.len());
        for gateway in gateways {
            infos.push(fetch_tier(api, kind, gateway).await?);
        }

        let metrics = self.metrics.tier(kind);
        metrics.reset();
        for info in &infos {
            if info.state.state.is_none() {
                warn!(
                    kind = %kind,
                    gateway = %info.config.id,
                    "Gateway state without realization state"
                );
            }
            metrics.populate(info);
        }
        Ok(())
    }
}
