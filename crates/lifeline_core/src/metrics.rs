//! Data manager metrics.
//!
//! Atomic counters for the data manager, with a structured log line every
//! `log_interval` ticks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub struct Metrics {
    tick_count: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    activations: AtomicU64,
    log_interval: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::with_log_interval(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs every `log_interval` ticks. Zero
    /// disables the periodic log line.
    #[must_use]
    pub fn with_log_interval(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            activations: AtomicU64::new(0),
            log_interval,
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, recorders: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        if self.log_interval > 0 && tick % self.log_interval == 0 {
            tracing::info!(
                tick = tick,
                recorders = recorders,
                cache_hits = self.cache_hits(),
                cache_misses = self.cache_misses(),
                duration_us = duration.as_micros() as u64,
                "Data update"
            );
        }
    }

    pub fn record_activations(&self, count: usize) {
        self.activations.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Provider instances activated so far.
    pub fn activations(&self) -> u64 {
        self.activations.load(Ordering::Relaxed)
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `default_level`. Logs go to stderr.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
