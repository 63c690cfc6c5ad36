//! Prometheus exporter for VMware NSX-T.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use nsxt_client::NsxtClient;
use prometheus_client::registry::Registry;
use tokio::sync::watch;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use nsxt_exporter::config::LogFormat;
use nsxt_exporter::{ExporterConfig, HttpServer, NsxtMetrics, Recorder, Scraper};

/// Prometheus exporter for VMware NSX-T.
#[derive(Parser, Debug)]
#[command(name = "nsxt-exporter")]
#[command(about = "Export NSX-T cluster, load balancer and gateway state as Prometheus metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long, default_value = "nsxt-exporter.json5")]
    config: String,

    /// HTTP listen address (overrides config).
    #[arg(long)]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides config.
    #[arg(long)]
    log_level: Option<String>,
}

async fn terminate() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = ExporterConfig::load_from_file(&args.config)?;

    // Override from CLI
    if let Some(listen) = args.listen {
        config.exporter.listen = listen;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    // Initialize logging
    let log_level = config.logging.level.parse().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("nsxt_exporter={}", log_level).parse()?)
        .add_directive(format!("nsxt_client={}", log_level).parse()?);

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    info!(url = %config.nsxt.url, "Starting NSX-T exporter");

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Create components
    let client = NsxtClient::new(&config.nsxt)?;
    let mut registry = Registry::with_prefix(config.exporter.namespace.as_str());
    let metrics = NsxtMetrics::register(&mut registry);
    let registry = Arc::new(registry);

    let recorder = Recorder::new(Arc::new(client), metrics, config.filters.clone());
    let scraper = Scraper::new(
        recorder,
        config.exporter.interval(),
        config.exporter.error_interval(),
    );
    let stats = scraper.stats();

    let http_server = HttpServer::new(
        registry,
        stats.clone(),
        config.listen_addr()?,
        config.exporter.path.clone(),
    );

    // Start scraper
    let scraper_task = tokio::spawn(scraper.run(shutdown_rx.clone()));

    // Start HTTP server
    let http_shutdown = shutdown_rx.clone();
    let http_task = tokio::spawn(async move {
        if let Err(e) = http_server.run(http_shutdown).await {
            error!("HTTP server error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate() => {
            info!("Received SIGTERM, shutting down...");
        }
    }

    // Signal shutdown
    shutdown_tx.send(true)?;

    // Wait for tasks to complete
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = scraper_task.await;
        let _ = http_task.await;
    })
    .await;

    // Print final stats
    let stats = stats.read().clone();
    info!(
        cycles = stats.cycles,
        successes = stats.successes,
        failures = stats.failures,
        last_duration_ms = stats.last_duration.map(|d| d.as_millis() as u64),
        last_error = stats.last_error.as_deref(),
        "Final statistics"
    );

    info!("Exporter stopped");
    Ok(())
}
