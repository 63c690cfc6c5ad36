//! Management node resource usage, certificates and interfaces.

use nsxt_client::model::{NodeInterfaceStatistics, ServiceEndpoint};
use prometheus_client::registry::Registry;
use tracing::warn;

use super::values::{STATUS_CONNECTED, display_name, status_value};
use crate::certificate::{CertificateDecodeError, CertificateExpiry, decode_chain};
use crate::join::NodeInfo;
use crate::registry::GaugeVec;

const NODE_LABELS: &[&str] = &["uuid", "ip", "name"];
const FS_LABELS: &[&str] = &["uuid", "ip", "name", "type", "mount"];
const IFACE_LABELS: &[&str] = &["uuid", "ip", "name", "dev"];

type InterfaceCounter = fn(&NodeInterfaceStatistics) -> Option<i64>;

const INTERFACE_COUNTERS: [(&str, &str, InterfaceCounter); 11] = [
    ("rx_byte", "Bytes received", |s| s.rx_bytes),
    ("rx_dropped", "Received packets dropped", |s| s.rx_dropped),
    ("rx_error", "Receive errors", |s| s.rx_errors),
    ("rx_frame", "Receive framing errors", |s| s.rx_frame),
    ("rx_packet", "Packets received", |s| s.rx_packets),
    ("tx_byte", "Bytes sent", |s| s.tx_bytes),
    ("tx_carrier", "Carrier losses while sending", |s| s.tx_carrier),
    ("tx_coll", "Collisions while sending", |s| s.tx_colls),
    ("tx_dropped", "Sent packets dropped", |s| s.tx_dropped),
    ("tx_error", "Send errors", |s| s.tx_errors),
    ("tx_packet", "Packets sent", |s| s.tx_packets),
];

fn certificate(endpoint: &ServiceEndpoint) -> Option<&str> {
    endpoint.certificate.as_deref()
}

#[derive(Debug, Clone)]
pub struct NodeMetrics {
    status: GaugeVec,
    cpu: GaugeVec,
    fs_total: GaugeVec,
    fs_used: GaugeVec,
    load1: GaugeVec,
    load5: GaugeVec,
    load15: GaugeVec,
    mem_total: GaugeVec,
    mem_used: GaugeVec,
    mem_cache: GaugeVec,
    uptime: GaugeVec,
    version: GaugeVec,
    certificates: GaugeVec,
    interface: GaugeVec,
    interface_counters: Vec<(GaugeVec, InterfaceCounter)>,
}

impl NodeMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        let interface_counters = INTERFACE_COUNTERS
            .iter()
            .map(|(stem, help, read)| {
                let family = GaugeVec::register(
                    registry,
                    &format!("cluster_node_interface_{}", stem),
                    help,
                    IFACE_LABELS,
                );
                (family, *read)
            })
            .collect();

        Self {
            status: GaugeVec::register(
                registry,
                "cluster_node_status",
                "Management cluster status of the node, 1 is CONNECTED",
                NODE_LABELS,
            ),
            cpu: GaugeVec::register(
                registry,
                "cluster_node_cpu",
                "Number of CPU cores",
                NODE_LABELS,
            ),
            fs_total: GaugeVec::register(
                registry,
                "cluster_node_fs_total",
                "File system size in kilobytes",
                FS_LABELS,
            ),
            fs_used: GaugeVec::register(
                registry,
                "cluster_node_fs_used",
                "File system usage in kilobytes",
                FS_LABELS,
            ),
            load1: GaugeVec::register(
                registry,
                "cluster_node_load1",
                "Load average over 1 minute",
                NODE_LABELS,
            ),
            load5: GaugeVec::register(
                registry,
                "cluster_node_load5",
                "Load average over 5 minutes",
                NODE_LABELS,
            ),
            load15: GaugeVec::register(
                registry,
                "cluster_node_load15",
                "Load average over 15 minutes",
                NODE_LABELS,
            ),
            mem_total: GaugeVec::register(
                registry,
                "cluster_node_mem_total",
                "Total memory in kilobytes",
                NODE_LABELS,
            ),
            mem_used: GaugeVec::register(
                registry,
                "cluster_node_mem_used",
                "Used memory in kilobytes",
                NODE_LABELS,
            ),
            mem_cache: GaugeVec::register(
                registry,
                "cluster_node_mem_cache",
                "Cache memory in kilobytes",
                NODE_LABELS,
            ),
            uptime: GaugeVec::register(
                registry,
                "cluster_node_uptime",
                "Milliseconds since the node booted",
                NODE_LABELS,
            ),
            version: GaugeVec::register(
                registry,
                "cluster_node_version",
                "Software version as label, value is always 1",
                &["uuid", "ip", "name", "version"],
            ),
            certificates: GaugeVec::register(
                registry,
                "cluster_node_certificates",
                "Expiry of listener certificates in seconds since epoch",
                &["uuid", "ip", "name", "type", "index"],
            ),
            interface: GaugeVec::register(
                registry,
                "cluster_node_interface",
                "Interface settings as labels, value is always 1",
                &["uuid", "ip", "name", "dev", "admin", "link", "mtu"],
            ),
            interface_counters,
        }
    }

    /// Record one node.
    ///
    /// Every certificate blob is processed; the first decode failure is
    /// returned after the rest of the node has been recorded.
    pub fn populate(&self, info: &NodeInfo) -> Result<(), CertificateDecodeError> {
        let uuid = info.config.id.as_str();
        let ip = info.config.appliance_mgmt_listen_addr.as_deref().unwrap_or("");
        let name = display_name(info.config.display_name.as_deref(), uuid);
        let labels = [uuid, ip, name];

        let mgmt = info
            .status
            .mgmt_cluster_status
            .as_ref()
            .and_then(|s| s.mgmt_cluster_status.as_deref());
        self.status.set(&labels, status_value(mgmt, STATUS_CONNECTED));

        if let Some(system) = &info.status.system_status {
            self.cpu.observe(&labels, system.cpu_cores);

            for fs in &system.file_systems {
                let fs_labels = [
                    uuid,
                    ip,
                    name,
                    fs.fs_type.as_deref().unwrap_or(""),
                    fs.mount.as_deref().unwrap_or(""),
                ];
                self.fs_total.observe(&fs_labels, fs.total);
                self.fs_used.observe(&fs_labels, fs.used);
            }

            if let [load1, load5, load15] = system.load_average[..] {
                self.load1.set(&labels, load1);
                self.load5.set(&labels, load5);
                self.load15.set(&labels, load15);
            }

            self.mem_total.observe(&labels, system.mem_total);
            self.mem_used.observe(&labels, system.mem_used);
            self.mem_cache.observe(&labels, system.mem_cache);
            self.uptime.observe(&labels, system.uptime);
        }

        if let Some(version) = info.status.version.as_deref() {
            self.version.set(&[uuid, ip, name, version], 1.0);
        }

        let mut first_error = None;
        if let Some(role) = &info.config.manager_role {
            let endpoints = [
                ("api", &role.api_listen_addr),
                ("mgmt_cluster", &role.mgmt_cluster_listen_addr),
                ("mgmt_plane", &role.mgmt_plane_listen_addr),
            ];
            for (kind, endpoint) in endpoints {
                let Some(pem) = endpoint.as_ref().and_then(certificate) else {
                    continue;
                };
                match decode_chain(pem) {
                    Ok(certs) => self.record_certificates(&labels, kind, &certs),
                    Err(e) => {
                        warn!(
                            node = uuid,
                            listener = kind,
                            error = %e,
                            "Invalid listener certificate"
                        );
                        self.record_certificates(&labels, kind, &e.parsed);
                        first_error.get_or_insert(e);
                    }
                }
            }
        }

        for iface in &info.interfaces {
            let dev = iface.config.interface_id.as_str();
            let iface_labels = [uuid, ip, name, dev];

            if let (Some(admin), Some(link), Some(mtu)) = (
                iface.config.admin_status.as_deref(),
                iface.config.link_status.as_deref(),
                iface.config.mtu,
            ) {
                let mtu = mtu.to_string();
                self.interface
                    .set(&[uuid, ip, name, dev, admin, link, mtu.as_str()], 1.0);
            }

            for (family, read) in &self.interface_counters {
                family.observe(&iface_labels, read(&iface.stats));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn record_certificates(&self, labels: &[&str; 3], kind: &str, certs: &[CertificateExpiry]) {
        for cert in certs {
            let index = cert.index.to_string();
            self.certificates.set(
                &[labels[0], labels[1], labels[2], kind, index.as_str()],
                cert.not_after as f64,
            );
        }
    }

    pub fn reset(&self) {
        self.status.reset();
        self.cpu.reset();
        self.fs_total.reset();
        self.fs_used.reset();
        self.load1.reset();
        self.load5.reset();
        self.load15.reset();
        self.mem_total.reset();
        self.mem_used.reset();
        self.mem_cache.reset();
        self.uptime.reset();
        self.version.reset();
        self.certificates.reset();
        self.interface.reset();
        for (family, _) in &self.interface_counters {
            family.reset();
        }
    }
}
