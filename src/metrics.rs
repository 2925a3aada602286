use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    summaries_completed: AtomicU64,
    summaries_degraded: AtomicU64,
    extractive_fallbacks: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed summary and whether it was served by a degraded tier.
    pub fn record_summary(&self, degraded: bool, extractive: bool) {
        self.summaries_completed.fetch_add(1, Ordering::Relaxed);
        if degraded {
            self.summaries_degraded.fetch_add(1, Ordering::Relaxed);
        }
        if extractive {
            self.extractive_fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            summaries_completed: self.summaries_completed.load(Ordering::Relaxed),
            summaries_degraded: self.summaries_degraded.load(Ordering::Relaxed),
            extractive_fallbacks: self.extractive_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of summaries produced since startup.
    pub summaries_completed: u64,
    /// How many of those came from a tier below cloud quality.
    pub summaries_degraded: u64,
    /// How many bottomed out at the deterministic extractive tier.
    pub extractive_fallbacks: u64,
}
