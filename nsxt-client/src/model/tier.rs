//! Policy API tier-0 / tier-1 gateway documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which family of gateway an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    /// Provider edge router.
    Tier0,
    /// Tenant router.
    Tier1,
}

impl GatewayKind {
    /// Short name used in metric names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayKind::Tier0 => "tier0",
            GatewayKind::Tier1 => "tier1",
        }
    }

    /// Policy API collection segment (`/infra/<segment>`).
    pub fn collection(&self) -> &'static str {
        match self {
            GatewayKind::Tier0 => "tier-0s",
            GatewayKind::Tier1 => "tier-1s",
        }
    }
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier-0 or tier-1 gateway as returned by `GET /policy/api/v1/infra/tier-Ns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    /// ACTIVE_ACTIVE or ACTIVE_STANDBY.
    #[serde(default)]
    pub ha_mode: Option<String>,
}

/// `GET /policy/api/v1/infra/tier-Ns/<id>/state`.
///
/// The document names its members `tier0_state` / `tier0_status` or
/// `tier1_state` / `tier1_status` depending on the gateway kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayState {
    #[serde(default, alias = "tier0_state", alias = "tier1_state")]
    pub state: LogicalRouterState,

    #[serde(default, alias = "tier0_status", alias = "tier1_status")]
    pub status: LogicalRouterStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalRouterState {
    #[serde(default)]
    pub logical_router_id: Option<String>,

    /// pending, in_progress, success, failed, partial_success,
    /// in_sync, out_of_sync, unknown, ...
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub failure_code: Option<i64>,

    #[serde(default)]
    pub failure_message: Option<String>,

    /// Per transport node configuration state.
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalRouterStatus {
    #[serde(default)]
    pub logical_router_id: Option<String>,

    #[serde(default)]
    pub per_node_status: Vec<EdgeNodeStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeNodeStatus {
    #[serde(default)]
    pub edge_path: Option<String>,

    #[serde(default)]
    pub transport_node_id: Option<String>,

    /// ACTIVE, STANDBY, DOWN, SYNC, UNKNOWN, ...
    #[serde(default)]
    pub high_availability_status: Option<String>,
}
