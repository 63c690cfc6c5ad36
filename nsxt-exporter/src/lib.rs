//! Prometheus exporter for VMware NSX-T.
//!
//! The exporter polls the NSX-T management and policy APIs on an interval,
//! joins status, statistics and configuration records per resource, and
//! republishes them as Prometheus gauges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  NSX-T Manager  │<────│ Scraper/Recorder│────>│   HTTP Server   │
//! │ (mgmt + policy) │     │ (join + mapping)│     │   (/metrics)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! A cycle runs the stages cluster, nodes, load balancers (with virtual
//! servers, pools and members), tier-1 and tier-0 gateways in order. The
//! first error aborts the cycle and sets `<namespace>_scrape_error` to 1.
//!
//! # Usage
//!
//! ```bash
//! nsxt-exporter --config nsxt-exporter.json5
//! ```
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod certificate;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod join;
pub mod metrics;
pub mod pagination;
pub mod recorder;
pub mod registry;
pub mod scraper;

#[cfg(test)]
mod testing;

pub use config::ExporterConfig;
pub use error::ScrapeError;
pub use http::HttpServer;
pub use metrics::NsxtMetrics;
pub use recorder::Recorder;
pub use scraper::{ScrapeStats, Scraper, SharedStats};
