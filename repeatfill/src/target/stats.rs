//! Per-target request counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters updated on every data request.
///
/// Counters are independent; a snapshot taken while requests are in flight
/// may mix values from slightly different moments.
#[derive(Debug, Default)]
pub struct TargetStats {
    reads: AtomicU64,
    bytes_filled: AtomicU64,
    writes_dropped: AtomicU64,
    discards_dropped: AtomicU64,
    bytes_dropped: AtomicU64,
    read_aheads_rejected: AtomicU64,
}

/// Point-in-time copy of [`TargetStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub reads: u64,
    pub bytes_filled: u64,
    pub writes_dropped: u64,
    pub discards_dropped: u64,
    pub bytes_dropped: u64,
    pub read_aheads_rejected: u64,
}

impl TargetStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&self, bytes: u64) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.bytes_filled.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_write(&self, bytes: u64) {
        self.writes_dropped.fetch_add(1, Ordering::Relaxed);
        self.bytes_dropped.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_discard(&self, bytes: u64) {
        self.discards_dropped.fetch_add(1, Ordering::Relaxed);
        self.bytes_dropped.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_read_ahead_rejected(&self) {
        self.read_aheads_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            bytes_filled: self.bytes_filled.load(Ordering::Relaxed),
            writes_dropped: self.writes_dropped.load(Ordering::Relaxed),
            discards_dropped: self.discards_dropped.load(Ordering::Relaxed),
            bytes_dropped: self.bytes_dropped.load(Ordering::Relaxed),
            read_aheads_rejected: self.read_aheads_rejected.load(Ordering::Relaxed),
        }
    }
}
