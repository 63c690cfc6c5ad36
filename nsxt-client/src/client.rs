//! reqwest implementation of [`NsxtApi`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client, Identity};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::NsxtApi;
use crate::config::{Auth, NsxtConfig};
use crate::error::{ApiError, Result};
use crate::model::{
    ClusterNodeConfig, ClusterNodeStatus, ClusterStatus, Gateway, GatewayKind, GatewayState,
    LbPool, LbService, LbServiceStatistics, LbServiceStatus, LbVirtualServer, ListResult,
    NodeInterfaceProperties, NodeInterfaceStatistics,
};
use crate::retry::RetryPolicy;

const MANAGEMENT_API: &str = "/api/v1";
const POLICY_API: &str = "/policy/api/v1";

/// HTTP client for one NSX-T manager.
#[derive(Debug, Clone)]
pub struct NsxtClient {
    http: Client,
    base_url: String,
    basic_auth: Option<(String, String)>,
    retry: RetryPolicy,
}

fn read_file(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ApiError::Io {
        path: Path::new(path).to_path_buf(),
        source,
    })
}

impl NsxtClient {
    /// Build a client from a validated configuration.
    pub fn new(config: &NsxtConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.skip_ssl_verify);

        if let Some(ca_path) = &config.ca_cert_path {
            let pem = read_file(ca_path)?;
            for cert in Certificate::from_pem_bundle(&pem)
                .map_err(|e| ApiError::Config(format!("Invalid CA bundle {}: {}", ca_path, e)))?
            {
                builder = builder.add_root_certificate(cert);
            }
        }

        let basic_auth = match config.auth()? {
            Auth::Basic { username, password } => Some((username, password)),
            Auth::Certificate {
                cert_path,
                key_path,
            } => {
                let mut pem = read_file(&cert_path)?;
                pem.push(b'\n');
                pem.extend(read_file(&key_path)?);
                let identity = Identity::from_pem(&pem).map_err(|e| {
                    ApiError::Config(format!("Invalid client certificate {}: {}", cert_path, e))
                })?;
                builder = builder.identity(identity);
                None
            }
        };

        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            basic_auth,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body, retrying throttled and failed
    /// requests according to the retry policy.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;

        loop {
            let mut request = self.http.get(&url).query(query);
            if let Some((username, password)) = &self.basic_auth {
                request = request.basic_auth(username, Some(password));
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(source) => {
                    if self.retry.allows(attempt) {
                        attempt += 1;
                        let delay = self.retry.delay();
                        warn!(
                            url = %url,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %source,
                            "NSX-T request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(ApiError::Transport { url, source });
                }
            };

            let status = response.status();
            if status.is_success() {
                let body = response
                    .bytes()
                    .await
                    .map_err(|source| ApiError::Transport {
                        url: url.clone(),
                        source,
                    })?;
                debug!(url = %url, bytes = body.len(), "NSX-T response");
                return serde_json::from_slice(&body)
                    .map_err(|source| ApiError::Decode { url, source });
            }

            if RetryPolicy::is_retryable(status) && self.retry.allows(attempt) {
                attempt += 1;
                let delay = self.retry.delay();
                warn!(
                    url = %url,
                    status = status.as_u16(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "NSX-T request throttled, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        cursor: Option<String>,
        extra: &[(&str, &str)],
    ) -> Result<ListResult<T>> {
        let mut query = extra.to_vec();
        if let Some(cursor) = cursor.as_deref() {
            query.push(("cursor", cursor));
        }
        self.get(path, &query).await
    }
}

#[async_trait]
impl NsxtApi for NsxtClient {
    async fn cluster_status(&self) -> Result<ClusterStatus> {
        self.get(&format!("{MANAGEMENT_API}/cluster/status"), &[]).await
    }

    async fn cluster_node_config(&self, node_id: &str) -> Result<ClusterNodeConfig> {
        self.get(&format!("{MANAGEMENT_API}/cluster/nodes/{node_id}"), &[])
            .await
    }

    async fn cluster_node_status(&self, node_id: &str) -> Result<ClusterNodeStatus> {
        self.get(&format!("{MANAGEMENT_API}/cluster/nodes/{node_id}/status"), &[])
            .await
    }

    async fn node_interfaces(&self, node_id: &str) -> Result<ListResult<NodeInterfaceProperties>> {
        self.get(
            &format!("{MANAGEMENT_API}/cluster/nodes/{node_id}/network/interfaces"),
            &[],
        )
        .await
    }

    async fn node_interface(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceProperties> {
        self.get(
            &format!("{MANAGEMENT_API}/cluster/nodes/{node_id}/network/interfaces/{interface_id}"),
            &[],
        )
        .await
    }

    async fn node_interface_stats(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> Result<NodeInterfaceStatistics> {
        self.get(
            &format!(
                "{MANAGEMENT_API}/cluster/nodes/{node_id}/network/interfaces/{interface_id}/stats"
            ),
            &[],
        )
        .await
    }

    async fn list_lb_services(&self, cursor: Option<String>) -> Result<ListResult<LbService>> {
        self.get_page(
            &format!("{POLICY_API}/infra/lb-services"),
            cursor,
            &[("include_mark_for_delete_objects", "false")],
        )
        .await
    }

    async fn lb_service(&self, id: &str) -> Result<LbService> {
        self.get(&format!("{POLICY_API}/infra/lb-services/{id}"), &[])
            .await
    }

    async fn lb_service_status(&self, id: &str) -> Result<ListResult<LbServiceStatus>> {
        self.get(
            &format!("{POLICY_API}/infra/lb-services/{id}/detailed-status"),
            &[("source", "realtime"), ("include_instance_details", "false")],
        )
        .await
    }

    async fn lb_service_statistics(&self, id: &str) -> Result<ListResult<LbServiceStatistics>> {
        self.get(
            &format!("{POLICY_API}/infra/lb-services/{id}/statistics"),
            &[("source", "realtime")],
        )
        .await
    }

    async fn lb_virtual_server(&self, id: &str) -> Result<LbVirtualServer> {
        self.get(&format!("{POLICY_API}/infra/lb-virtual-servers/{id}"), &[])
            .await
    }

    async fn lb_pool(&self, id: &str) -> Result<LbPool> {
        self.get(&format!("{POLICY_API}/infra/lb-pools/{id}"), &[])
            .await
    }

    async fn list_gateways(
        &self,
        kind: GatewayKind,
        cursor: Option<String>,
    ) -> Result<ListResult<Gateway>> {
        self.get_page(
            &format!("{POLICY_API}/infra/{}", kind.collection()),
            cursor,
            &[],
        )
        .await
    }

    async fn gateway_state(&self, kind: GatewayKind, id: &str) -> Result<GatewayState> {
        self.get(
            &format!("{POLICY_API}/infra/{}/{id}/state", kind.collection()),
            &[],
        )
        .await
    }
}
