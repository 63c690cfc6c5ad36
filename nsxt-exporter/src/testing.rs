//! Test helpers: an in-memory NSX-T manager and exposition parsing.

use std::collections::HashMap;

use async_trait::async_trait;
use nsxt_client::model::{
    ClusterNodeConfig, ClusterNodeStatus, ClusterStatus, Gateway, GatewayKind, GatewayState,
    LbPool, LbService, LbServiceStatistics, LbServiceStatus, LbVirtualServer, ListResult,
    NodeInterfaceProperties, NodeInterfaceStatistics,
};
use nsxt_client::{ApiError, NsxtApi, Result};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::json;

const MANAGER_PEM: &str = include_str!("../testdata/manager.pem");
const EDGE_NODES: &str =
    "/infra/sites/default/enforcement-points/default/edge-clusters/ec/edge-nodes";

/// Value of the sample `series` (metric name plus label block, exactly
/// as rendered) in an exposition text.
pub fn sample_value(text: &str, series: &str) -> Option<f64> {
    text.lines().find_map(|line| {
        let value = line.strip_prefix(series)?.strip_prefix(' ')?;
        value.split_whitespace().next()?.parse().ok()
    })
}

fn doc<T: DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("fixture document")
}

#[derive(Debug, Default)]
struct Inventory {
    cluster: ClusterStatus,
    node_configs: HashMap<String, ClusterNodeConfig>,
    node_statuses: HashMap<String, ClusterNodeStatus>,
    interfaces: HashMap<String, Vec<NodeInterfaceProperties>>,
    interface_stats: HashMap<(String, String), NodeInterfaceStatistics>,
    lb_services: Vec<LbService>,
    lb_statuses: HashMap<String, ListResult<LbServiceStatus>>,
    lb_statistics: HashMap<String, ListResult<LbServiceStatistics>>,
    virtual_servers: HashMap<String, LbVirtualServer>,
    pools: HashMap<String, LbPool>,
    gateways: HashMap<GatewayKind, Vec<Gateway>>,
    gateway_states: HashMap<(GatewayKind, String), GatewayState>,
}

/// In-memory [`NsxtApi`].
///
/// Load balancers are listed one per page. Every call is logged by
/// operation name, and [`FakeNsxt::fail_on`] makes one operation fail.
#[derive(Debug, Default)]
pub struct FakeNsxt {
    inventory: Mutex<Inventory>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<Option<&'static str>>,
}

impl FakeNsxt {
    /// A two-node cluster with two load balancers and three gateways.
    ///
    /// `lb1` ("web-lb") has virtual server `vs1` and pool `pool1` with
    /// members `10.0.1.1:8080` and `10.0.1.2:8080`; `lb2` ("db-lb") is
    /// empty. `node-1` serves a valid certificate, `node-2` is offline.
    pub fn sample() -> Self {
        let mut inv = Inventory {
            cluster: doc(json!({
                "control_cluster_status": { "status": "STABLE" },
                "mgmt_cluster_status": {
                    "status": "STABLE",
                    "online_nodes": [{ "uuid": "node-1" }],
                    "offline_nodes": [{ "uuid": "node-2" }]
                }
            })),
            ..Inventory::default()
        };

        inv.node_configs.insert(
            "node-1".into(),
            doc(json!({
                "id": "node-1",
                "display_name": "mgr-1",
                "appliance_mgmt_listen_addr": "10.0.0.11",
                "manager_role": { "api_listen_addr": { "certificate": MANAGER_PEM } }
            })),
        );
        inv.node_configs.insert(
            "node-2".into(),
            doc(json!({ "id": "node-2", "display_name": "mgr-2" })),
        );
        inv.node_statuses.insert(
            "node-1".into(),
            doc(json!({
                "mgmt_cluster_status": { "mgmt_cluster_status": "CONNECTED" },
                "system_status": {
                    "cpu_cores": 8,
                    "load_average": [0.5, 0.25, 0.125],
                    "mem_total": 24000,
                    "mem_used": 12000,
                    "uptime": 3600000
                },
                "version": "4.1.0"
            })),
        );
        inv.node_statuses.insert(
            "node-2".into(),
            doc(json!({ "mgmt_cluster_status": { "mgmt_cluster_status": "DISCONNECTED" } })),
        );

        inv.interfaces.insert(
            "node-1".into(),
            vec![
                doc(json!({
                    "interface_id": "eth0",
                    "admin_status": "UP",
                    "link_status": "UP",
                    "mtu": 1500
                })),
                doc(json!({
                    "interface_id": "lo",
                    "admin_status": "UP",
                    "link_status": "UP",
                    "mtu": 65536
                })),
            ],
        );
        inv.interfaces.insert("node-2".into(), Vec::new());
        inv.interface_stats.insert(
            ("node-1".into(), "eth0".into()),
            doc(json!({ "interface_id": "eth0", "rx_bytes": 5000, "tx_bytes": 7000 })),
        );
        inv.interface_stats.insert(
            ("node-1".into(), "lo".into()),
            doc(json!({ "interface_id": "lo", "rx_bytes": 10 })),
        );

        inv.lb_services = vec![
            doc(json!({ "id": "lb1", "display_name": "web-lb", "enabled": true, "size": "SMALL" })),
            doc(json!({ "id": "lb2", "display_name": "db-lb", "enabled": false })),
        ];
        inv.lb_statuses.insert(
            "lb1".into(),
            ListResult::last(vec![doc(json!({
                "service_path": "/infra/lb-services/lb1",
                "service_status": "UP",
                "cpu_usage": 7,
                "memory_usage": 30,
                "virtual_servers": [
                    { "virtual_server_path": "/infra/lb-virtual-servers/vs1", "status": "UP" }
                ],
                "pools": [{
                    "pool_path": "/infra/lb-pools/pool1",
                    "status": "UP",
                    "members": [
                        { "ip_address": "10.0.1.1", "port": "8080", "status": "UP" },
                        { "ip_address": "10.0.1.2", "port": "8080", "status": "UP" }
                    ]
                }]
            }))]),
        );
        inv.lb_statistics.insert(
            "lb1".into(),
            ListResult::last(vec![doc(json!({
                "service_path": "/infra/lb-services/lb1",
                "statistics": { "l4_current_sessions": 3, "l7_current_sessions": 9 },
                "virtual_servers": [{
                    "virtual_server_path": "/infra/lb-virtual-servers/vs1",
                    "statistics": { "bytes_in": 1000, "bytes_in_rate": 12.5, "current_sessions": 6 }
                }],
                "pools": [{
                    "pool_path": "/infra/lb-pools/pool1",
                    "statistics": { "current_sessions": 6 },
                    "members": [
                        {
                            "ip_address": "10.0.1.1",
                            "port": "8080",
                            "statistics": { "current_sessions": 2 }
                        },
                        {
                            "ip_address": "10.0.1.2",
                            "port": "8080",
                            "statistics": { "current_sessions": 4 }
                        }
                    ]
                }]
            }))]),
        );
        inv.lb_statuses.insert(
            "lb2".into(),
            ListResult::last(vec![doc(json!({ "service_status": "DOWN" }))]),
        );
        inv.lb_statistics
            .insert("lb2".into(), ListResult::last(vec![doc(json!({}))]));

        inv.virtual_servers.insert(
            "vs1".into(),
            doc(json!({
                "id": "vs1",
                "display_name": "web-vs",
                "enabled": true,
                "ip_address": "192.168.10.10",
                "pool_path": "/infra/lb-pools/pool1",
                "lb_service_path": "/infra/lb-services/lb1"
            })),
        );
        inv.pools.insert(
            "pool1".into(),
            doc(json!({
                "id": "pool1",
                "display_name": "web-pool",
                "algorithm": "ROUND_ROBIN",
                "min_active_members": 1,
                "member_group": { "port": 8080 }
            })),
        );

        inv.gateways.insert(
            GatewayKind::Tier0,
            vec![doc(json!({
                "id": "t0-main",
                "display_name": "edge",
                "ha_mode": "ACTIVE_STANDBY"
            }))],
        );
        inv.gateways.insert(
            GatewayKind::Tier1,
            vec![
                doc(json!({ "id": "t1-a", "display_name": "tenant-a" })),
                doc(json!({ "id": "t1-b", "display_name": "tenant-b" })),
            ],
        );
        inv.gateway_states.insert(
            (GatewayKind::Tier0, "t0-main".into()),
            doc(json!({
                "tier0_state": { "state": "in_sync", "details": [{}, {}] },
                "tier0_status": { "per_node_status": [
                    {
                        "edge_path": format!("{EDGE_NODES}/e1"),
                        "high_availability_status": "ACTIVE"
                    },
                    {
                        "edge_path": format!("{EDGE_NODES}/e2"),
                        "high_availability_status": "STANDBY"
                    }
                ]}
            })),
        );
        inv.gateway_states.insert(
            (GatewayKind::Tier1, "t1-a".into()),
            doc(json!({ "tier1_state": { "state": "in_sync" } })),
        );
        inv.gateway_states.insert(
            (GatewayKind::Tier1, "t1-b".into()),
            doc(json!({
                "tier1_state": {
                    "state": "out_of_sync",
                    "failure_code": 8001,
                    "failure_message": "edge unreachable"
                }
            })),
        );

        Self {
            inventory: Mutex::new(inv),
            ..Self::default()
        }
    }

    /// Make every call to `operation` fail with HTTP 500.
    pub fn fail_on(&self, operation: &'static str) {
        *self.failing.lock() = Some(operation);
    }

    pub fn heal(&self) {
        *self.failing.lock() = None;
    }

    /// Operation names of every call so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    pub fn with_lb_statistics<F>(&self, id: &str, edit: F)
    where
        F: FnOnce(&mut LbServiceStatistics),
    {
        let mut inv = self.inventory.lock();
        if let Some(stats) = inv
            .lb_statistics
            .get_mut(id)
            .and_then(|list| list.results.first_mut())
        {
            edit(stats);
        }
    }

    pub fn duplicate_lb_status(&self, id: &str) {
        let mut inv = self.inventory.lock();
        if let Some(list) = inv.lb_statuses.get_mut(id) {
            if let Some(first) = list.results.first().cloned() {
                list.results.push(first);
            }
        }
    }

    pub fn with_node_config<F>(&self, id: &str, edit: F)
    where
        F: FnOnce(&mut ClusterNodeConfig),
    {
        if let Some(config) = self.inventory.lock().node_configs.get_mut(id) {
            edit(config);
        }
    }

    /// Drop a load balancer from the listing.
    pub fn remove_load_balancer(&self, id: &str) {
        self.inventory.lock().lb_services.retain(|lb| lb.id != id);
    }

    fn enter(&self, operation: &'static str, target: &str) -> Result<()> {
        self.calls.lock().push(format!("{} {}", operation, target).trim_end().to_string());
        if *self.failing.lock() == Some(operation) {
            return Err(ApiError::Status {
                status: 500,
                url: format!("fake://{}/{}", operation, target),
                body: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn lookup<T: Clone>(found: Option<&T>, operation: &str, target: &str) -> Result<T> {
        found.cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            url: format!("fake://{}/{}", operation, target),
            body: "not found".to_string(),
        })
    }
}

#[async_trait]
impl NsxtApi for FakeNsxt {
    async fn cluster_status(&self) -> Result<ClusterStatus> {
        self.enter("cluster_status", "")?;
        Ok(self.inventory.lock().cluster.clone())
    }

    async fn cluster_node_config(&self, node_id: &str) -> Result<ClusterNodeConfig> {
        self.enter("cluster_node_config", node_id)?;
        Self::lookup(self.inventory.lock().node_configs.get(node_id), "node", node_id)
    }

    async fn cluster_node_status(&self, node_id: &str) -> Result<ClusterNodeStatus> {
        self.enter("cluster_node_status", node_id)?;
        Self::lookup(self.inventory.lock().node_statuses.get(node_id), "node status", node_id)
    }

    async fn node_interfaces(&self, node_id: &str) -> Result<ListResult<NodeInterfaceProperties>> {
        self.enter("node_interfaces", node_id)?;
        let interfaces =
            Self::lookup(self.inventory.lock().interfaces.get(node_id), "interfaces", node_id)?;
        Ok(ListResult::last(interfaces))
    }

    async fn node_interface(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceProperties> {
        self.enter("node_interface", interface_id)?;
        let inv = self.inventory.lock();
        let found = inv
            .interfaces
            .get(node_id)
            .and_then(|list| list.iter().find(|i| i.interface_id == interface_id));
        Self::lookup(found, "interface", interface_id)
    }

    async fn node_interface_stats(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceStatistics> {
        self.enter("node_interface_stats", interface_id)?;
        let key = (node_id.to_string(), interface_id.to_string());
        Self::lookup(
            self.inventory.lock().interface_stats.get(&key),
            "interface stats",
            interface_id,
        )
    }

    async fn list_lb_services(&self, cursor: Option<String>) -> Result<ListResult<LbService>> {
        self.enter("list_lb_services", cursor.as_deref().unwrap_or(""))?;
        let index: usize = cursor
            .as_deref()
            .and_then(|c| c.strip_prefix("page-"))
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        let inv = self.inventory.lock();
        let page = inv.lb_services.get(index).cloned().into_iter().collect();
        if index + 1 < inv.lb_services.len() {
            Ok(ListResult::with_cursor(page, format!("page-{}", index + 1)))
        } else {
            Ok(ListResult::last(page))
        }
    }

    async fn lb_service(&self, id: &str) -> Result<LbService> {
        self.enter("lb_service", id)?;
        let inv = self.inventory.lock();
        Self::lookup(inv.lb_services.iter().find(|lb| lb.id == id), "lb service", id)
    }

    async fn lb_service_status(&self, id: &str) -> Result<ListResult<LbServiceStatus>> {
        self.enter("lb_service_status", id)?;
        Ok(self.inventory.lock().lb_statuses.get(id).cloned().unwrap_or_default())
    }

    async fn lb_service_statistics(&self, id: &str) -> Result<ListResult<LbServiceStatistics>> {
        self.enter("lb_service_statistics", id)?;
        Ok(self.inventory.lock().lb_statistics.get(id).cloned().unwrap_or_default())
    }

    async fn lb_virtual_server(&self, id: &str) -> Result<LbVirtualServer> {
        self.enter("lb_virtual_server", id)?;
        Self::lookup(self.inventory.lock().virtual_servers.get(id), "virtual server", id)
    }

    async fn lb_pool(&self, id: &str) -> Result<LbPool> {
        self.enter("lb_pool", id)?;
        Self::lookup(self.inventory.lock().pools.get(id), "pool", id)
    }

    async fn list_gateways(
        &self,
        kind: GatewayKind,
        _cursor: Option<String>,
    ) -> Result<ListResult<Gateway>> {
        self.enter("list_gateways", kind.as_str())?;
        let gateways = self.inventory.lock().gateways.get(&kind).cloned().unwrap_or_default();
        Ok(ListResult::last(gateways))
    }

    async fn gateway_state(&self, kind: GatewayKind, id: &str) -> Result<GatewayState> {
        self.enter("gateway_state", id)?;
        let key = (kind, id.to_string());
        Self::lookup(self.inventory.lock().gateway_states.get(&key), "gateway state", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_value() {
        let text = "# TYPE nsxt_a gauge\nnsxt_a{x=\"1\"} 2.5\nnsxt_a_total 3\nnsxt_b 1.0\n";
        assert_eq!(sample_value(text, r#"nsxt_a{x="1"}"#), Some(2.5));
        assert_eq!(sample_value(text, "nsxt_b"), Some(1.0));
        assert_eq!(sample_value(text, "nsxt_a"), None);
    }

    #[tokio::test]
    async fn test_fake_pages_load_balancers() {
        let fake = FakeNsxt::sample();
        let first = fake.list_lb_services(None).await.unwrap();
        assert_eq!(first.results[0].id, "lb1");
        assert_eq!(first.next_cursor(), Some("page-1"));

        let second = fake.list_lb_services(Some("page-1".into())).await.unwrap();
        assert_eq!(second.results[0].id, "lb2");
        assert_eq!(second.next_cursor(), None);
    }

    #[tokio::test]
    async fn test_fake_failure_injection() {
        let fake = FakeNsxt::sample();
        fake.fail_on("lb_pool");
        assert_eq!(fake.lb_pool("pool1").await.unwrap_err().status(), Some(500));
        fake.heal();
        assert!(fake.lb_pool("pool1").await.is_ok());
        assert_eq!(fake.call_count("lb_pool"), 2);
    }
}
