//! Servicing data requests against the active pattern.
//!
//! A read moves through `Idle → SnapshotTaken → Filling(i) → Done`:
//! [`ReadServicer::begin_read`] pins the active pattern and computes the
//! starting offset, then [`PendingRead::fill`] walks the segments in order.
//! The snapshot is taken before any buffer is touched, so a read either fills
//! every segment from one pattern or does not start.
//!
//! Writes and discards are accepted and dropped; read-ahead goes straight to
//! `Rejected`. Statistics counters are bookkeeping, not target state: a
//! rejected read-ahead bumps `read_aheads_rejected` and touches nothing else.

use std::sync::Arc;

use super::error::IoError;
use super::request::{Completion, IoRequest};
use super::stats::{StatsSnapshot, TargetStats};
use crate::log::Logger;
use crate::pattern::CompiledPattern;
use crate::position::SegmentCursor;
use crate::store::PatternStore;
use crate::{log_debug, log_trace};

/// Executes data requests for one target.
pub struct ReadServicer {
    store: Arc<PatternStore>,
    stats: TargetStats,
    logger: Arc<dyn Logger>,
}

impl ReadServicer {
    pub fn new(store: Arc<PatternStore>, logger: Arc<dyn Logger>) -> Self {
        Self {
            store,
            stats: TargetStats::new(),
            logger,
        }
    }

    /// Dispatch a request by kind.
    pub fn map(&self, request: IoRequest<'_>) -> Result<Completion, IoError> {
        match request {
            IoRequest::Read { position, segments } => Ok(self.read(position, segments)),
            IoRequest::ReadAhead { position, segments } => {
                let len: u64 = segments.iter().map(|s| s.len() as u64).sum();
                self.read_ahead(position, len)
            }
            IoRequest::Write { position, segments } => Ok(self.write(position, &segments)),
            IoRequest::Discard { position, len } => Ok(self.discard(position, len)),
        }
    }

    /// Snapshot the active pattern for a read starting at `position`.
    pub fn begin_read(&self, position: u64) -> PendingRead<'_> {
        PendingRead {
            servicer: self,
            pattern: self.store.get(),
            position,
        }
    }

    /// Fill `segments` in order with the pattern tiled from `position`.
    pub fn read<'b, I>(&self, position: u64, segments: I) -> Completion
    where
        I: IntoIterator<Item = &'b mut [u8]>,
    {
        self.begin_read(position).fill(segments)
    }

    /// Accept a write without looking at its payload.
    pub fn write(&self, position: u64, segments: &[&[u8]]) -> Completion {
        let bytes: u64 = segments.iter().map(|s| s.len() as u64).sum();
        self.stats.record_write(bytes);
        log_trace!(self.logger, "dropped {} byte write at {}", bytes, position);
        Completion::Dropped { bytes }
    }

    /// Accept a discard of `len` bytes.
    pub fn discard(&self, position: u64, len: u64) -> Completion {
        self.stats.record_discard(len);
        log_trace!(self.logger, "dropped {} byte discard at {}", len, position);
        Completion::Dropped { bytes: len }
    }

    /// Refuse a speculative read.
    ///
    /// Buffers and the pattern are left alone. The only thing recorded is the
    /// `read_aheads_rejected` counter, which sits outside the target's state.
    pub fn read_ahead(&self, position: u64, len: u64) -> Result<Completion, IoError> {
        self.stats.record_read_ahead_rejected();
        log_debug!(
            self.logger,
            "rejected {} byte read-ahead at {}",
            len,
            position
        );
        Err(IoError::ReadAheadUnsupported)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// A read whose pattern snapshot has been taken.
///
/// Reconfiguration after this point does not affect it.
pub struct PendingRead<'s> {
    servicer: &'s ReadServicer,
    pattern: Arc<CompiledPattern>,
    position: u64,
}

impl PendingRead<'_> {
    /// Pattern this read will use.
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill every segment in order and complete the read.
    pub fn fill<'b, I>(self, segments: I) -> Completion
    where
        I: IntoIterator<Item = &'b mut [u8]>,
    {
        let logger = &self.servicer.logger;
        let mut cursor = SegmentCursor::new(self.pattern.unit(), self.position);
        for (index, segment) in segments.into_iter().enumerate() {
            log_trace!(
                logger,
                "read at {}: segment {} ({} bytes) from offset {}",
                self.position,
                index,
                segment.len(),
                cursor.offset()
            );
            cursor.fill_next(segment);
        }

        let bytes = cursor.filled();
        self.servicer.stats.record_read(bytes);
        Completion::Filled { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, MemoryLogger, NoOpLogger};

    fn servicer(spec: &str) -> ReadServicer {
        let store = Arc::new(PatternStore::with_spec(spec).unwrap());
        ReadServicer::new(store, Arc::new(NoOpLogger))
    }

    #[test]
    fn test_read_fills_from_position() {
        let servicer = servicer("0xaabbcc");
        let mut buf = [0u8; 4];
        let completion = servicer.read(5, [&mut buf[..]]);
        assert_eq!(completion, Completion::Filled { bytes: 4 });
        assert_eq!(buf, [0xCC, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_read_carries_offset_across_segments() {
        let servicer = servicer("0xaabbcc");
        let mut a = [0u8; 2];
        let mut b = [0u8; 5];
        servicer.read(1, [&mut a[..], &mut b[..]]);
        assert_eq!(a, [0xBB, 0xCC]);
        assert_eq!(b, [0xAA, 0xBB, 0xCC, 0xAA, 0xBB]);
    }

    #[test]
    fn test_read_with_no_segments() {
        let servicer = servicer("0xff");
        let completion = servicer.read(0, std::iter::empty());
        assert_eq!(completion, Completion::Filled { bytes: 0 });
        assert_eq!(servicer.stats().reads, 1);
    }

    #[test]
    fn test_pending_read_keeps_its_snapshot() {
        let store = Arc::new(PatternStore::new());
        let servicer = ReadServicer::new(Arc::clone(&store), Arc::new(NoOpLogger));

        let pending = servicer.begin_read(0);
        store.set("0x00").unwrap();

        let mut old = [0u8; 16];
        pending.fill([&mut old[..]]);
        assert!(old.iter().all(|b| *b == 0xFF));

        let mut new = [0xAAu8; 16];
        servicer.read(0, [&mut new[..]]);
        assert!(new.iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_map_write_is_dropped() {
        let servicer = servicer("0xff");
        let payload = [0x42u8; 8];
        let completion = servicer
            .map(IoRequest::Write {
                position: 0,
                segments: vec![&payload[..]],
            })
            .unwrap();
        assert_eq!(completion, Completion::Dropped { bytes: 8 });
        assert_eq!(servicer.stats().writes_dropped, 1);
    }

    #[test]
    fn test_map_discard_is_dropped() {
        let servicer = servicer("0xff");
        let completion = servicer
            .map(IoRequest::Discard {
                position: 4096,
                len: 1 << 20,
            })
            .unwrap();
        assert_eq!(completion.bytes(), 1 << 20);
        assert_eq!(servicer.stats().discards_dropped, 1);
    }

    #[test]
    fn test_map_read_ahead_rejected_untouched() {
        let logger = Arc::new(MemoryLogger::new());
        let store = Arc::new(PatternStore::new());
        let servicer = ReadServicer::new(Arc::clone(&store), logger.clone());
        let before = store.get();

        let mut buf = [0x11u8; 32];
        let result = servicer.map(IoRequest::ReadAhead {
            position: 8192,
            segments: vec![&mut buf[..]],
        });

        assert_eq!(result, Err(IoError::ReadAheadUnsupported));
        assert_eq!(buf, [0x11u8; 32]);
        assert!(Arc::ptr_eq(&before, &store.get()));
        assert_eq!(servicer.stats().read_aheads_rejected, 1);
        assert_eq!(servicer.stats().reads, 0);
        assert_eq!(
            logger.messages_at(LogLevel::Debug),
            vec!["rejected 32 byte read-ahead at 8192".to_string()]
        );
    }

    #[test]
    fn test_segment_fills_are_traced() {
        let logger = Arc::new(MemoryLogger::new());
        let servicer = ReadServicer::new(Arc::new(PatternStore::new()), logger.clone());
        let mut a = [0u8; 3];
        let mut b = [0u8; 1];
        servicer.read(7, [&mut a[..], &mut b[..]]);

        let traces = logger.messages_at(LogLevel::Trace);
        assert_eq!(traces.len(), 2);
        assert!(traces[1].contains("segment 1 (1 bytes)"));
    }

    #[test]
    fn test_stats_count_filled_bytes() {
        let servicer = servicer("0xab");
        let mut buf = vec![0u8; 1000];
        servicer.read(0, [&mut buf[..]]);
        servicer.read(10, [&mut buf[..10]]);

        let stats = servicer.stats();
        assert_eq!(stats.reads, 2);
        assert_eq!(stats.bytes_filled, 1010);
    }
}
