//! Async client for the NSX-T management and policy APIs.
//!
//! The [`NsxtApi`] trait lists the read-only operations the exporter
//! needs; [`NsxtClient`] implements it over HTTPS with basic or
//! certificate authentication and bounded retries on throttling.
//!
//! ```no_run
//! use nsxt_client::{NsxtApi, NsxtClient, NsxtConfig};
//!
//! # async fn run() -> nsxt_client::Result<()> {
//! let config = NsxtConfig::with_basic_auth("https://nsx.example.com", "admin", "secret");
//! let client = NsxtClient::new(&config)?;
//! let status = client.cluster_status().await?;
//! println!("{:?}", status.mgmt_cluster_status.status);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod retry;

pub use api::NsxtApi;
pub use client::NsxtClient;
pub use config::{Auth, NsxtConfig};
pub use error::{ApiError, Result};
pub use model::GatewayKind;
pub use retry::RetryPolicy;
