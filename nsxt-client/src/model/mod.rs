//! Typed NSX-T management and policy API documents.
//!
//! Only the members the exporter reads are modelled; unknown fields are
//! ignored. Every member the API may omit is an `Option`, leaving the
//! "absent" policy to the caller.

pub mod cluster;
pub mod lb;
pub mod list;
pub mod node;
pub mod tier;

pub use cluster::{
    ClusterStatus, ControlClusterStatus, ManagementClusterStatus, ManagementPlaneNode,
};
pub use lb::{
    LbPool, LbPoolMemberGroup, LbPoolMemberStatistics, LbPoolMemberStatus, LbPoolStatistics,
    LbPoolStatus, LbService, LbServiceStatistics, LbServiceStatisticsCounter, LbServiceStatus,
    LbStatisticsCounter, LbVirtualServer, LbVirtualServerStatistics, LbVirtualServerStatus,
    RuntimeAlarm,
};
pub use list::ListResult;
pub use node::{
    ClusterNodeConfig, ClusterNodeStatus, FileSystemUsage, ManagerRole,
    NodeInterfaceProperties, NodeInterfaceStatistics, NodeManagementClusterStatus,
    NodeSystemStatus, ServiceEndpoint,
};
pub use tier::{
    EdgeNodeStatus, Gateway, GatewayKind, GatewayState, LogicalRouterState, LogicalRouterStatus,
};
