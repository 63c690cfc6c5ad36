//! Assembles per-resource documents into joined records.
//!
//! Load balancer status and statistics arrive as two parallel trees; the
//! statistics side is indexed once per collection (by path for virtual
//! servers and pools, by `ip:port` for pool members) and every status
//! entry must find its counterpart.

use std::collections::HashMap;

use nsxt_client::model::{
    ClusterNodeConfig, ClusterNodeStatus, Gateway, GatewayKind, LbPool, LbPoolMemberStatistics,
    LbPoolMemberStatus, LbPoolStatistics, LbPoolStatus, LbService, LbServiceStatistics,
    LbServiceStatus, LbVirtualServer, LbVirtualServerStatistics, LbVirtualServerStatus,
    ListResult, LogicalRouterState, LogicalRouterStatus, NodeInterfaceProperties,
    NodeInterfaceStatistics,
};
use nsxt_client::NsxtApi;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::filter::AllowList;

#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    pub config: NodeInterfaceProperties,
    pub stats: NodeInterfaceStatistics,
}

/// A management node with its interfaces in listing order.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub config: ClusterNodeConfig,
    pub status: ClusterNodeStatus,
    pub interfaces: Vec<InterfaceInfo>,
}

#[derive(Debug, Clone)]
pub struct VsInfo {
    pub config: LbVirtualServer,
    pub status: LbVirtualServerStatus,
    pub stats: LbVirtualServerStatistics,
}

#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub status: LbPoolMemberStatus,
    pub stats: LbPoolMemberStatistics,
}

#[derive(Debug, Clone)]
pub struct PoolInfo {
    pub config: LbPool,
    pub status: LbPoolStatus,
    pub stats: LbPoolStatistics,
    pub members: Vec<MemberInfo>,
}

/// A load balancer joined with its virtual servers and pools.
///
/// `stats` keeps the service-level counters only; per virtual server and
/// per pool statistics live in `virtual_servers` and `pools`.
#[derive(Debug, Clone)]
pub struct LbInfo {
    pub config: LbService,
    pub status: LbServiceStatus,
    pub stats: LbServiceStatistics,
    pub virtual_servers: Vec<VsInfo>,
    pub pools: Vec<PoolInfo>,
}

#[derive(Debug, Clone)]
pub struct TierInfo {
    pub config: Gateway,
    pub state: LogicalRouterState,
    pub status: LogicalRouterStatus,
}

/// Last segment of a policy path (`/infra/lb-pools/web` -> `web`).
pub fn path_to_id(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Key used to join pool member status and statistics.
pub fn member_key(ip_address: Option<&str>, port: Option<&str>) -> Option<String> {
    Some(format!("{}:{}", ip_address?, port?))
}

/// The only result of a list, or an error naming what was expected.
pub fn single<T>(list: ListResult<T>, kind: &'static str, id: &str) -> Result<T> {
    let count = list.results.len();
    let mut results = list.results.into_iter();
    match (results.next(), count) {
        (Some(item), 1) => Ok(item),
        (None, _) => Err(ScrapeError::NotFound {
            kind,
            id: id.to_string(),
        }),
        _ => Err(ScrapeError::TooManyResults {
            kind,
            id: id.to_string(),
            count,
        }),
    }
}

/// Index records by key; the first record of a duplicated key wins and
/// records without a key are dropped.
pub fn index_by<T, F>(items: Vec<T>, key: F) -> HashMap<String, T>
where
    F: Fn(&T) -> Option<String>,
{
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        if let Some(key) = key(&item) {
            index.entry(key).or_insert(item);
        }
    }
    index
}

/// Fetch a management node with its interfaces.
pub async fn fetch_node<A: NsxtApi + ?Sized>(api: &A, node_id: &str) -> Result<NodeInfo> {
    let status = api.cluster_node_status(node_id).await?;
    let config = api.cluster_node_config(node_id).await?;
    let listing = api.node_interfaces(node_id).await?;

    let mut interfaces = Vec::with_capacity(listing.results.len());
    for iface in &listing.results {
        let config = api.node_interface(node_id, &iface.interface_id).await?;
        let stats = api
            .node_interface_stats(node_id, &iface.interface_id)
            .await?;
        interfaces.push(InterfaceInfo { config, stats });
    }

    debug!(node = node_id, interfaces = interfaces.len(), "Fetched node");
    Ok(NodeInfo {
        config,
        status,
        interfaces,
    })
}

/// Fetch a load balancer and join its virtual servers, pools and members
/// with their statistics.
///
/// Virtual servers rejected by `virtual_servers` are skipped once their
/// configuration is known.
pub async fn fetch_load_balancer<A: NsxtApi + ?Sized>(
    api: &A,
    id: &str,
    virtual_servers: &AllowList,
) -> Result<LbInfo> {
    let config = api.lb_service(id).await?;
    let status = single(api.lb_service_status(id).await?, "load balancer status", id)?;
    let mut stats = single(
        api.lb_service_statistics(id).await?,
        "load balancer statistics",
        id,
    )?;

    let vs_stats = index_by(std::mem::take(&mut stats.virtual_servers), |s| {
        s.virtual_server_path.clone()
    });
    let pool_stats = index_by(std::mem::take(&mut stats.pools), |s| s.pool_path.clone());

    let mut vs_infos = Vec::with_capacity(status.virtual_servers.len());
    for vs_status in &status.virtual_servers {
        let path = vs_status
            .virtual_server_path
            .as_deref()
            .ok_or_else(|| ScrapeError::MissingKey {
                kind: "virtual server",
                lb: id.to_string(),
            })?;

        let vs_config = api.lb_virtual_server(path_to_id(path)).await?;
        if !virtual_servers.includes(vs_config.display_name.as_deref(), &vs_config.id) {
            debug!(lb = id, virtual_server = %vs_config.id, "Virtual server filtered out");
            continue;
        }

        let vs_stat = vs_stats
            .get(path)
            .cloned()
            .ok_or_else(|| ScrapeError::Unresolved {
                kind: "virtual server statistics",
                key: path.to_string(),
                lb: id.to_string(),
            })?;

        vs_infos.push(VsInfo {
            config: vs_config,
            status: vs_status.clone(),
            stats: vs_stat,
        });
    }

    let mut pool_infos = Vec::with_capacity(status.pools.len());
    for pool_status in &status.pools {
        let path = pool_status
            .pool_path
            .as_deref()
            .ok_or_else(|| ScrapeError::MissingKey {
                kind: "pool",
                lb: id.to_string(),
            })?;

        let pool_config = api.lb_pool(path_to_id(path)).await?;
        let mut pool_stat = pool_stats
            .get(path)
            .cloned()
            .ok_or_else(|| ScrapeError::Unresolved {
                kind: "pool statistics",
                key: path.to_string(),
                lb: id.to_string(),
            })?;

        let member_stats = index_by(std::mem::take(&mut pool_stat.members), |m| {
            member_key(m.ip_address.as_deref(), m.port.as_deref())
        });

        let mut members = Vec::with_capacity(pool_status.members.len());
        for member in &pool_status.members {
            let key = member_key(member.ip_address.as_deref(), member.port.as_deref())
                .ok_or_else(|| ScrapeError::MissingKey {
                    kind: "pool member",
                    lb: id.to_string(),
                })?;
            let stats = member_stats
                .get(&key)
                .cloned()
                .ok_or_else(|| ScrapeError::Unresolved {
                    kind: "pool member statistics",
                    key: key.clone(),
                    lb: id.to_string(),
                })?;
            members.push(MemberInfo {
                status: member.clone(),
                stats,
            });
        }

        pool_infos.push(PoolInfo {
            config: pool_config,
            status: pool_status.clone(),
            stats: pool_stat,
            members,
        });
    }

    debug!(
        lb = id,
        virtual_servers = vs_infos.len(),
        pools = pool_infos.len(),
        "Fetched load balancer"
    );

    Ok(LbInfo {
        config,
        status,
        stats,
        virtual_servers: vs_infos,
        pools: pool_infos,
    })
}

/// Fetch the realized state of a gateway.
pub async fn fetch_tier<A: NsxtApi + ?Sized>(
    api: &A,
    kind: GatewayKind,
    gateway: Gateway,
) -> Result<TierInfo> {
    let state = api.gateway_state(kind, &gateway.id).await?;
    debug!(kind = %kind, gateway = %gateway.id, "Fetched gateway state");
    Ok(TierInfo {
        config: gateway,
        state: state.state,
        status: state.status,
    })
}
