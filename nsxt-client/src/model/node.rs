//! Management API node documents (`/api/v1/cluster/nodes/...`).

use serde::{Deserialize, Serialize};

/// `GET /api/v1/cluster/nodes/<node-id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterNodeConfig {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub appliance_mgmt_listen_addr: Option<String>,

    #[serde(default)]
    pub manager_role: Option<ManagerRole>,
}

/// Listener endpoints of a node running the manager role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerRole {
    #[serde(default)]
    pub api_listen_addr: Option<ServiceEndpoint>,

    #[serde(default)]
    pub mgmt_cluster_listen_addr: Option<ServiceEndpoint>,

    #[serde(default)]
    pub mgmt_plane_listen_addr: Option<ServiceEndpoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// PEM-encoded certificate chain presented by the listener.
    #[serde(default)]
    pub certificate: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub port: Option<i64>,
}

/// `GET /api/v1/cluster/nodes/<node-id>/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterNodeStatus {
    #[serde(default)]
    pub mgmt_cluster_status: Option<NodeManagementClusterStatus>,

    #[serde(default)]
    pub system_status: Option<NodeSystemStatus>,

    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeManagementClusterStatus {
    #[serde(default)]
    pub mgmt_cluster_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeSystemStatus {
    #[serde(default)]
    pub cpu_cores: Option<i64>,

    #[serde(default)]
    pub file_systems: Vec<FileSystemUsage>,

    /// 1, 5 and 15 minute load averages.
    #[serde(default)]
    pub load_average: Vec<f64>,

    #[serde(default)]
    pub mem_cache: Option<i64>,

    #[serde(default)]
    pub mem_total: Option<i64>,

    #[serde(default)]
    pub mem_used: Option<i64>,

    /// Milliseconds since boot.
    #[serde(default)]
    pub uptime: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSystemUsage {
    #[serde(default)]
    pub file_system: Option<String>,

    #[serde(default)]
    pub mount: Option<String>,

    #[serde(default, rename = "type")]
    pub fs_type: Option<String>,

    #[serde(default)]
    pub total: Option<i64>,

    #[serde(default)]
    pub used: Option<i64>,
}

/// `GET /api/v1/cluster/nodes/<node-id>/network/interfaces[/<interface-id>]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInterfaceProperties {
    pub interface_id: String,

    #[serde(default)]
    pub admin_status: Option<String>,

    #[serde(default)]
    pub link_status: Option<String>,

    #[serde(default)]
    pub mtu: Option<i64>,
}

/// `GET /api/v1/cluster/nodes/<node-id>/network/interfaces/<interface-id>/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInterfaceStatistics {
    #[serde(default)]
    pub interface_id: Option<String>,

    #[serde(default)]
    pub rx_bytes: Option<i64>,

    #[serde(default)]
    pub rx_dropped: Option<i64>,

    #[serde(default)]
    pub rx_errors: Option<i64>,

    #[serde(default)]
    pub rx_frame: Option<i64>,

    #[serde(default)]
    pub rx_packets: Option<i64>,

    #[serde(default)]
    pub tx_bytes: Option<i64>,

    #[serde(default)]
    pub tx_carrier: Option<i64>,

    #[serde(default)]
    pub tx_colls: Option<i64>,

    #[serde(default)]
    pub tx_dropped: Option<i64>,

    #[serde(default)]
    pub tx_errors: Option<i64>,

    #[serde(default)]
    pub tx_packets: Option<i64>,
}
