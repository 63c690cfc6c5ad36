//! The NSX-T operations the exporter depends on.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    ClusterNodeConfig, ClusterNodeStatus, ClusterStatus, Gateway, GatewayKind, GatewayState,
    LbPool, LbService, LbServiceStatistics, LbServiceStatus, LbVirtualServer, ListResult,
    NodeInterfaceProperties, NodeInterfaceStatistics,
};

/// Read-only access to an NSX-T manager.
///
/// Paginated operations take the cursor returned by the previous page
/// (`None` for the first page).
#[async_trait]
pub trait NsxtApi: Send + Sync {
    /// `GET /api/v1/cluster/status`
    async fn cluster_status(&self) -> Result<ClusterStatus>;

    /// `GET /api/v1/cluster/nodes/<node-id>`
    async fn cluster_node_config(&self, node_id: &str) -> Result<ClusterNodeConfig>;

    /// `GET /api/v1/cluster/nodes/<node-id>/status`
    async fn cluster_node_status(&self, node_id: &str) -> Result<ClusterNodeStatus>;

    /// `GET /api/v1/cluster/nodes/<node-id>/network/interfaces`
    async fn node_interfaces(&self, node_id: &str) -> Result<ListResult<NodeInterfaceProperties>>;

    /// `GET /api/v1/cluster/nodes/<node-id>/network/interfaces/<interface-id>`
    async fn node_interface(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceProperties>;

    /// `GET /api/v1/cluster/nodes/<node-id>/network/interfaces/<interface-id>/stats`
    async fn node_interface_stats(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceStatistics>;

    /// `GET /policy/api/v1/infra/lb-services`
    async fn list_lb_services(&self, cursor: Option<String>) -> Result<ListResult<LbService>>;

    /// `GET /policy/api/v1/infra/lb-services/<id>`
    async fn lb_service(&self, id: &str) -> Result<LbService>;

    /// `GET /policy/api/v1/infra/lb-services/<id>/detailed-status`
    async fn lb_service_status(&self, id: &str) -> Result<ListResult<LbServiceStatus>>;

    /// `GET /policy/api/v1/infra/lb-services/<id>/statistics`
    async fn lb_service_statistics(&self, id: &str) -> Result<ListResult<LbServiceStatistics>>;

    /// `GET /policy/api/v1/infra/lb-virtual-servers/<id>`
    async fn lb_virtual_server(&self, id: &str) -> Result<LbVirtualServer>;

    /// `GET /policy/api/v1/infra/lb-pools/<id>`
    async fn lb_pool(&self, id: &str) -> Result<LbPool>;

    /// `GET /policy/api/v1/infra/tier-0s` or `tier-1s`
    async fn list_gateways(
        &self,
        kind: GatewayKind,
        cursor: Option<String>,
    ) -> Result<ListResult<Gateway>>;

    /// `GET /policy/api/v1/infra/tier-0s/<id>/state` or `tier-1s`
    async fn gateway_state(&self, kind: GatewayKind, id: &str) -> Result<GatewayState>;
}
