//! Periodic scrape loop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{error, info};

use crate::recorder::Recorder;

/// Outcome counters of the scrape loop.
#[derive(Debug, Clone, Default)]
pub struct ScrapeStats {
    pub cycles: u64,
    pub successes: u64,
    pub failures: u64,
    pub last_duration: Option<Duration>,
    pub last_error: Option<String>,
}

/// Scrape statistics shared with the HTTP server.
pub type SharedStats = Arc<RwLock<ScrapeStats>>;

/// Runs the recorder immediately, then after `interval` following a
/// success or `error_interval` following a failure.
pub struct Scraper {
    recorder: Recorder,
    interval: Duration,
    error_interval: Duration,
    stats: SharedStats,
}

impl Scraper {
    pub fn new(recorder: Recorder, interval: Duration, error_interval: Duration) -> Self {
        Self {
            recorder,
            interval,
            error_interval,
            stats: SharedStats::default(),
        }
    }

    pub fn stats(&self) -> SharedStats {
        self.stats.clone()
    }

    /// Run one cycle and return the delay before the next one.
    pub async fn run_once(&self) -> Duration {
        let result = self.recorder.record().await;

        let mut stats = self.stats.write();
        stats.cycles += 1;
        match result {
            Ok(duration) => {
                stats.successes += 1;
                stats.last_duration = Some(duration);
                stats.last_error = None;
                info!(
                    duration_ms = duration.as_millis() as u64,
                    cycle = stats.cycles,
                    "Scrape cycle completed"
                );
                self.interval
            }
            Err(e) => {
                stats.failures += 1;
                stats.last_error = Some(e.to_string());
                error!(error = %e, cycle = stats.cycles, "Scrape cycle failed");
                self.error_interval
            }
        }
    }

    /// Scrape until the shutdown signal is received.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            error_interval_secs = self.error_interval.as_secs(),
            "Starting scraper"
        );

        loop {
            let delay = tokio::select! {
                delay = self.run_once() => delay,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Scraper stopped");
    }
}
