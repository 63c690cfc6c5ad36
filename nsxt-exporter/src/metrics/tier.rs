use nsxt_client::GatewayKind;
use prometheus_client::registry::Registry;

use super::values::{STATUS_IN_SYNC, display_name, status_value};
use crate::join::{TierInfo, path_to_id};
use crate::registry::GaugeVec;

const LABELS: &[&str] = &["id", "name"];

/// Gauges of one gateway kind (`tier0_*` or `tier1_*`).
#[derive(Debug, Clone)]
pub struct TierMetrics {
    info: GaugeVec,
    status: GaugeVec,
    failure: GaugeVec,
    transport: GaugeVec,
    edge: GaugeVec,
}

impl TierMetrics {
    pub fn register(registry: &mut Registry, kind: GatewayKind) -> Self {
        let kind_name = kind.as_str();
        Self {
            info: GaugeVec::register(
                registry,
                &format!("{}_info", kind_name),
                &format!("HA mode of the {} gateway as label, value is always 1", kind_name),
                &["id", "name", "mode"],
            ),
            status: GaugeVec::register(
                registry,
                &format!("{}_status", kind_name),
                &format!("Realization state of the {} gateway, 1 is in_sync", kind_name),
                LABELS,
            ),
            failure: GaugeVec::register(
                registry,
                &format!("{}_failure", kind_name),
                &format!("Realization failure of the {} gateway, value is always 1", kind_name),
                &["id", "name", "code", "message"],
            ),
            transport: GaugeVec::register(
                registry,
                &format!("{}_transport", kind_name),
                &format!("Number of transport nodes of the {} gateway", kind_name),
                LABELS,
            ),
            edge: GaugeVec::register(
                registry,
                &format!("{}_edge", kind_name),
                &format!(
                    "HA status of each edge node of the {} gateway, value is always 1",
                    kind_name
                ),
                &["id", "name", "index", "mode"],
            ),
        }
    }

    pub fn populate(&self, info: &TierInfo) {
        let id = info.config.id.as_str();
        let name = display_name(info.config.display_name.as_deref(), id);
        let labels = [id, name];

        if let Some(mode) = info.config.ha_mode.as_deref() {
            self.info.set(&[id, name, mode], 1.0);
        }

        self.status.set(
            &labels,
            status_value(info.state.state.as_deref(), STATUS_IN_SYNC),
        );

        if let (Some(code), Some(message)) =
            (info.state.failure_code, info.state.failure_message.as_deref())
        {
            let code = code.to_string();
            self.failure.set(&[id, name, code.as_str(), message], 1.0);
        }

        self.transport.set(&labels, info.state.details.len() as f64);

        for edge in &info.status.per_node_status {
            if let (Some(path), Some(mode)) = (
                edge.edge_path.as_deref(),
                edge.high_availability_status.as_deref(),
            ) {
                self.edge.set(&[id, name, path_to_id(path), mode], 1.0);
            }
        }
    }

    pub fn reset(&self) {
        self.info.reset();
        self.status.reset();
        self.failure.reset();
        self.transport.reset();
        self.edge.reset();
    }
}
