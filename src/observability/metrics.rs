//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the note service.
///
/// Relaxed ordering is enough: counters are independent and only read for reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    notes_stored: AtomicU64,
    notes_fetched: AtomicU64,
    /// Fetches for ids absent from the data file
    notes_missing: AtomicU64,
    /// Any other store failure (missing file, I/O, decode, encode)
    store_errors: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_notes_stored(&self) {
        self.notes_stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_notes_fetched(&self) {
        self.notes_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_notes_missing(&self) {
        self.notes_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            notes_stored: self.notes_stored.load(Ordering::Relaxed),
            notes_fetched: self.notes_fetched.load(Ordering::Relaxed),
            notes_missing: self.notes_missing.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub notes_stored: u64,
    pub notes_fetched: u64,
    pub notes_missing: u64,
    pub store_errors: u64,
}
