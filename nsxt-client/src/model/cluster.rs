//! Management API cluster documents (`/api/v1/cluster/...`).

use serde::{Deserialize, Serialize};

/// `GET /api/v1/cluster/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterStatus {
    #[serde(default)]
    pub control_cluster_status: ControlClusterStatus,

    #[serde(default)]
    pub mgmt_cluster_status: ManagementClusterStatus,
}

impl ClusterStatus {
    /// Identifiers of every management node, online nodes first.
    pub fn node_ids(&self) -> Vec<String> {
        self.mgmt_cluster_status
            .online_nodes
            .iter()
            .chain(&self.mgmt_cluster_status.offline_nodes)
            .filter_map(|node| node.uuid.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlClusterStatus {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagementClusterStatus {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub online_nodes: Vec<ManagementPlaneNode>,

    #[serde(default)]
    pub offline_nodes: Vec<ManagementPlaneNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagementPlaneNode {
    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub mgmt_cluster_listen_ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_online_then_offline() {
        let status: ClusterStatus = serde_json::from_value(serde_json::json!({
            "control_cluster_status": { "status": "STABLE" },
            "mgmt_cluster_status": {
                "status": "STABLE",
                "online_nodes": [{ "uuid": "n1" }, { "uuid": "n2" }],
                "offline_nodes": [
                    { "uuid": "n3" },
                    { "mgmt_cluster_listen_ip_address": "10.0.0.9" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(status.node_ids(), vec!["n1", "n2", "n3"]);
        assert_eq!(status.control_cluster_status.status.as_deref(), Some("STABLE"));
    }

    #[test]
    fn test_empty_document() {
        let status: ClusterStatus = serde_json::from_str("{}").unwrap();
        assert!(status.node_ids().is_empty());
        assert!(status.mgmt_cluster_status.status.is_none());
    }
}
