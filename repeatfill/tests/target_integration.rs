//! Integration tests for the repeat target.
//!
//! These tests drive [`RepeatTarget`] through its public surface:
//! - tiling correctness for every offset and segmentation
//! - reconfiguration through control messages
//! - snapshot isolation between in-flight reads and reconfiguration
//! - write, discard and read-ahead policies

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use repeatfill::config::{ConfigFile, TargetConfig};
use repeatfill::fill::fill;
use repeatfill::log::{LogLevel, MemoryLogger, NoOpLogger};
use repeatfill::pattern::{compile, ParseError};
use repeatfill::target::{
    Completion, ControlError, ControlReply, IoError, IoRequest, RepeatTarget, StatsSnapshot,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn target_with(spec: &str) -> RepeatTarget {
    let args: [&str; 0] = [];
    let config = TargetConfig::new().with_pattern_spec(spec);
    RepeatTarget::new(&args, &config, Arc::new(NoOpLogger)).unwrap()
}

/// Expected bytes for a read of `len` bytes at `position`.
fn expected(unit: &[u8], position: u64, len: usize) -> Vec<u8> {
    (0..len)
        .map(|k| unit[((position + k as u64) % unit.len() as u64) as usize])
        .collect()
}

/// Read `lens` consecutive segments at `position` and concatenate them.
fn read_segments(target: &RepeatTarget, position: u64, lens: &[usize]) -> Vec<u8> {
    let mut buffers: Vec<Vec<u8>> = lens.iter().map(|&l| vec![0u8; l]).collect();
    let completion = target.read(position, buffers.iter_mut().map(|b| b.as_mut_slice()));
    assert_eq!(
        completion,
        Completion::Filled {
            bytes: lens.iter().sum::<usize>() as u64
        }
    );
    buffers.concat()
}

// =============================================================================
// Tiling
// =============================================================================

#[test]
fn test_fill_matches_modular_formula_for_many_specs() {
    let specs = ["0xff", "0xAABBCC", "0o7", "0o1", "0b101", "0x1", "0b1100101"];
    for spec in specs {
        let unit = compile(spec).unwrap();
        let bytes = unit.as_bytes();
        for offset in 0..bytes.len() {
            for len in [0, 1, bytes.len(), 2 * bytes.len() + 1, 37] {
                let mut dest = vec![0u8; len];
                fill(&mut dest, &unit, offset);
                assert_eq!(
                    dest,
                    expected(bytes, offset as u64, len),
                    "spec {spec} offset {offset} len {len}"
                );
            }
        }
    }
}

#[test]
fn test_segmentation_invariance() {
    let target = target_with("0xAABBCC");
    let whole = read_segments(&target, 1, &[7]);
    assert_eq!(whole, [0xBB, 0xCC, 0xAA, 0xBB, 0xCC, 0xAA, 0xBB]);
    assert_eq!(read_segments(&target, 1, &[2, 5]), whole);
    assert_eq!(read_segments(&target, 1, &[3, 4]), whole);
    assert_eq!(read_segments(&target, 1, &[1, 0, 1, 5]), whole);
}

#[test]
fn test_reads_at_large_positions() {
    let target = target_with("0o1");
    let unit = target.pattern().unit().as_bytes().to_vec();
    let position = u64::MAX - 10;
    assert_eq!(
        read_segments(&target, position, &[4, 3, 4]),
        expected(&unit, position, 11)
    );
}

#[test]
fn test_default_target_reads_ff() {
    let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));
    assert_eq!(read_segments(&target, 12345, &[512]), vec![0xFF; 512]);
}

#[test]
fn test_config_file_drives_target() {
    let mut config = ConfigFile::default();
    config.pattern.spec = "0b10".to_string();
    config.device.sector_size = 4096;

    let args: [&str; 0] = [];
    let target =
        RepeatTarget::new(&args, &config.target_config(), Arc::new(NoOpLogger)).unwrap();

    let mut buf = [0u8; 8];
    target.read_sectors(3, [&mut buf[..]]);
    assert_eq!(buf, [0x55; 8]);
    assert_eq!(target.sector_size(), 4096);
}

// =============================================================================
// Reconfiguration
// =============================================================================

#[test]
fn test_compile_ff() {
    assert_eq!(compile("0xFF").unwrap().as_bytes(), &[0xFF]);
}

#[test]
fn test_invalid_reconfiguration_keeps_pattern() {
    let target = target_with("0xAABBCC");
    let before = read_segments(&target, 0, &[9]);

    let result = target.message(&["seq.config", "0xG1"]);
    assert_eq!(
        result,
        Err(ControlError::InvalidPattern(ParseError::InvalidDigit {
            base: repeatfill::pattern::PrefixKind::Hex,
            character: 'G',
        }))
    );
    assert_eq!(read_segments(&target, 0, &[9]), before);
}

#[test]
fn test_reconfigure_to_zero() {
    let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));
    let reply = target.message(&["seq.config", "0x00"]).unwrap();
    assert!(matches!(reply, ControlReply::Configured { .. }));
    assert_eq!(read_segments(&target, 7, &[3, 13]), vec![0u8; 16]);
}

#[test]
fn test_snapshot_read_completes_with_old_pattern() {
    let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));

    let pending = target.begin_read(0);
    target.message(&["seq.config", "0x00"]).unwrap();

    let mut a = [0x11u8; 4];
    let mut b = [0x11u8; 4];
    pending.fill([&mut a[..], &mut b[..]]);
    assert_eq!(a, [0xFF; 4]);
    assert_eq!(b, [0xFF; 4]);

    assert_eq!(read_segments(&target, 0, &[4]), vec![0u8; 4]);
}

#[test]
fn test_concurrent_reads_never_mix_patterns() {
    let target = Arc::new(target_with("0xAABBCC"));
    let first = expected(&[0xAA, 0xBB, 0xCC], 5, 4096);
    let second = expected(&[0x11, 0x22, 0x33], 5, 4096);
    let stop = Arc::new(AtomicBool::new(false));

    thread::scope(|scope| {
        for _ in 0..4 {
            let target = Arc::clone(&target);
            let stop = Arc::clone(&stop);
            let (first, second) = (&first, &second);
            scope.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let got = read_segments(&target, 5, &[1000, 96, 3000]);
                    assert!(got == *first || got == *second, "mixed pattern in one read");
                }
            });
        }

        for i in 0..200 {
            let spec = if i % 2 == 0 { "0x112233" } else { "0xAABBCC" };
            target.message(&["seq.config", spec]).unwrap();
        }
        stop.store(true, Ordering::Relaxed);
    });
}

#[test]
fn test_racing_compare_and_swap_has_one_winner() {
    let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));
    let store = Arc::clone(target.store());
    let expected_pattern = store.get();

    let winners: usize = thread::scope(|scope| {
        let handles: Vec<_> = ["0x00", "0x11", "0x22", "0x33"]
            .into_iter()
            .map(|spec| {
                let store = Arc::clone(&store);
                let expected_pattern = Arc::clone(&expected_pattern);
                scope.spawn(move || store.set_if_current(&expected_pattern, spec).is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    assert_eq!(winners, 1);
    assert_ne!(target.pattern().spec().text(), "0xff");
}

// =============================================================================
// Write, discard and read-ahead
// =============================================================================

#[test]
fn test_write_then_read_returns_pattern() {
    let target = target_with("0xAABBCC");
    let payload = [0x42u8; 64];

    let completion = target
        .map(IoRequest::Write {
            position: 0,
            segments: vec![&payload[..]],
        })
        .unwrap();
    assert_eq!(completion, Completion::Dropped { bytes: 64 });

    assert_eq!(
        read_segments(&target, 0, &[64]),
        expected(&[0xAA, 0xBB, 0xCC], 0, 64)
    );
}

#[test]
fn test_discard_is_dropped() {
    let target = target_with("0x5A");
    assert_eq!(
        target.map(IoRequest::Discard {
            position: 4096,
            len: 8192
        }),
        Ok(Completion::Dropped { bytes: 8192 })
    );
    assert_eq!(read_segments(&target, 4096, &[8]), vec![0xA5; 8]);
}

#[test]
fn test_read_ahead_always_fails_without_side_effects() {
    let logger = Arc::new(MemoryLogger::new());
    let args: [&str; 0] = [];
    let target = RepeatTarget::new(&args, &TargetConfig::default(), logger.clone()).unwrap();
    let before = target.pattern();

    let mut buf = [0x77u8; 32];
    for position in [0, 1, 4096] {
        let (head, tail) = buf.split_at_mut(16);
        let result = target.map(IoRequest::ReadAhead {
            position,
            segments: vec![head, tail],
        });
        assert_eq!(result, Err(IoError::ReadAheadUnsupported));
        assert_eq!(result.unwrap_err().errno(), libc::EIO);
    }

    assert_eq!(buf, [0x77; 32]);
    assert!(Arc::ptr_eq(&before, &target.pattern()));
    // The rejection counter is the only thing a read-ahead records.
    assert_eq!(
        target.stats(),
        StatsSnapshot {
            read_aheads_rejected: 3,
            ..StatsSnapshot::default()
        }
    );
    assert_eq!(logger.messages_at(LogLevel::Debug).len(), 3);
}
