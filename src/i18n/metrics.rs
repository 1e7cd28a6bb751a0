//! Lookup metrics and observability.
//!
//! Each resolver owns its own `LookupMetrics`, so tests that build several
//! resolvers never see each other's counts.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for translation lookups and dictionary loads.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups answered from the active dictionary
    hits: AtomicUsize,

    /// Lookups that fell back to the key
    fallbacks: AtomicUsize,

    /// Partial dictionaries loaded successfully
    partial_loads: AtomicUsize,

    /// Partial dictionaries that failed to load and were treated as empty
    load_failures: AtomicUsize,

    /// Loads discarded because a newer language switch superseded them
    superseded_loads: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_partial_load(&self) {
        self.partial_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_superseded_load(&self) {
        self.superseded_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn partial_loads(&self) -> usize {
        self.partial_loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn superseded_loads(&self) -> usize {
        self.superseded_loads.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let total_lookups = hits + fallbacks;
        let hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallbacks,
            hit_rate,
            partial_loads: self.partial_loads(),
            load_failures: self.load_failures(),
            superseded_loads: self.superseded_loads(),
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub fallbacks: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    pub partial_loads: usize,
    pub load_failures: usize,
    pub superseded_loads: usize,
}

impl MetricsReport {
    /// Format the report as a human-readable string for logs.
    pub fn format(&self) -> String {
        format!(
            "Lookups: {} hits, {} fallbacks ({:.1}% hit rate) | Loads: {} partials, {} failed, {} superseded",
            self.hits,
            self.fallbacks,
            self.hit_rate,
            self.partial_loads,
            self.load_failures,
            self.superseded_loads
        )
    }
}
