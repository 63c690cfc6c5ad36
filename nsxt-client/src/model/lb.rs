//! Policy API load balancer documents (`/policy/api/v1/infra/lb-*`).

use serde::{Deserialize, Serialize};

/// `GET /policy/api/v1/infra/lb-services/<lb-service-id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LbService {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub enabled: Option<bool>,

    /// SMALL, MEDIUM, LARGE, XLARGE or DLB.
    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub connectivity_path: Option<String>,
}

/// Alarm raised on a load balancer object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeAlarm {
    #[serde(default)]
    pub error_id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// `GET .../lb-services/<id>/detailed-status` result entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LbServiceStatus {
    #[serde(default)]
    pub service_path: Option<String>,

    /// UP, PARTIALLY_UP, PRIMARY_DOWN, DOWN, ERROR, NO_STANDBY, DETACHED,
    /// DISABLED or UNKNOWN.
    #[serde(default)]
    pub service_status: Option<String>,

    #[serde(default)]
    pub cpu_usage: Option<i64>,

    #[serde(default)]
    pub memory_usage: Option<i64>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub alarm: Option<RuntimeAlarm>,

    #[serde(default)]
    pub virtual_servers: Vec<LbVirtualServerStatus>,

    #[serde(default)]
    pub pools: Vec<LbPoolStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbVirtualServerStatus {
    #[serde(default)]
    pub virtual_server_path: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub alarm: Option<RuntimeAlarm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPoolStatus {
    #[serde(default)]
    pub pool_path: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub alarm: Option<RuntimeAlarm>,

    #[serde(default)]
    pub members: Vec<LbPoolMemberStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPoolMemberStatus {
    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub port: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub failure_cause: Option<String>,
}

/// `GET .../lb-services/<id>/statistics` result entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LbServiceStatistics {
    #[serde(default)]
    pub service_path: Option<String>,

    #[serde(default)]
    pub statistics: Option<LbServiceStatisticsCounter>,

    #[serde(default)]
    pub virtual_servers: Vec<LbVirtualServerStatistics>,

    #[serde(default)]
    pub pools: Vec<LbPoolStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbServiceStatisticsCounter {
    #[serde(default)]
    pub l4_current_session_rate: Option<f64>,

    #[serde(default)]
    pub l4_current_sessions: Option<i64>,

    #[serde(default)]
    pub l4_max_sessions: Option<i64>,

    #[serde(default)]
    pub l4_total_sessions: Option<i64>,

    #[serde(default)]
    pub l7_current_session_rate: Option<f64>,

    #[serde(default)]
    pub l7_current_sessions: Option<i64>,

    #[serde(default)]
    pub l7_max_sessions: Option<i64>,

    #[serde(default)]
    pub l7_total_sessions: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbVirtualServerStatistics {
    #[serde(default)]
    pub virtual_server_path: Option<String>,

    #[serde(default)]
    pub statistics: Option<LbStatisticsCounter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPoolStatistics {
    #[serde(default)]
    pub pool_path: Option<String>,

    #[serde(default)]
    pub statistics: Option<LbStatisticsCounter>,

    #[serde(default)]
    pub members: Vec<LbPoolMemberStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPoolMemberStatistics {
    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub port: Option<String>,

    #[serde(default)]
    pub statistics: Option<LbStatisticsCounter>,
}

/// Traffic counters shared by virtual servers, pools and pool members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbStatisticsCounter {
    #[serde(default)]
    pub bytes_in: Option<i64>,

    #[serde(default)]
    pub bytes_in_rate: Option<f64>,

    #[serde(default)]
    pub bytes_out: Option<i64>,

    #[serde(default)]
    pub bytes_out_rate: Option<f64>,

    #[serde(default)]
    pub current_session_rate: Option<f64>,

    #[serde(default)]
    pub current_sessions: Option<i64>,

    #[serde(default)]
    pub http_request_rate: Option<f64>,

    #[serde(default)]
    pub http_requests: Option<i64>,

    #[serde(default)]
    pub max_sessions: Option<i64>,

    #[serde(default)]
    pub packets_in: Option<i64>,

    #[serde(default)]
    pub packets_in_rate: Option<f64>,

    #[serde(default)]
    pub packets_out: Option<i64>,

    #[serde(default)]
    pub packets_out_rate: Option<f64>,

    #[serde(default)]
    pub source_ip_persistence_entry_size: Option<i64>,

    #[serde(default)]
    pub total_sessions: Option<i64>,
}

/// `GET /policy/api/v1/infra/lb-virtual-servers/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbVirtualServer {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub pool_path: Option<String>,

    #[serde(default)]
    pub lb_service_path: Option<String>,
}

/// `GET /policy/api/v1/infra/lb-pools/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPool {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// ROUND_ROBIN, WEIGHTED_ROUND_ROBIN, LEAST_CONNECTION, ...
    #[serde(default)]
    pub algorithm: Option<String>,

    #[serde(default)]
    pub min_active_members: Option<i64>,

    #[serde(default)]
    pub member_group: Option<LbPoolMemberGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbPoolMemberGroup {
    #[serde(default)]
    pub group_path: Option<String>,

    #[serde(default)]
    pub port: Option<i64>,
}
