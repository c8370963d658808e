//! The active pattern, published through an atomic handle.
//!
//! Readers take an `Arc<CompiledPattern>` snapshot and keep using it for the
//! whole request; a reconfiguration builds a fresh pattern and swaps the
//! handle. Nothing shared is ever edited in place, so a read never sees a
//! half-replaced pattern and never waits on a writer.

use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::pattern::{CompiledPattern, ParseError};

/// Errors from a compare-and-swap replacement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The new spec did not compile
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Another writer replaced the pattern first
    #[error("Active pattern was replaced by a concurrent update")]
    Superseded,
}

/// Holder of the process-wide active pattern.
///
/// # Example
///
/// ```
/// use repeatfill::store::PatternStore;
///
/// let store = PatternStore::new();
/// let before = store.get();
/// store.set("0x00").unwrap();
///
/// assert_eq!(before.unit().as_bytes(), &[0xFF]);
/// assert_eq!(store.get().unit().as_bytes(), &[0x00]);
/// ```
#[derive(Debug)]
pub struct PatternStore {
    active: ArcSwap<CompiledPattern>,
}

impl PatternStore {
    /// Create a store holding the default `0xff` pattern.
    pub fn new() -> Self {
        Self::from_pattern(CompiledPattern::default())
    }

    /// Create a store holding `spec`.
    pub fn with_spec(spec: &str) -> Result<Self, ParseError> {
        CompiledPattern::compile(spec).map(Self::from_pattern)
    }

    fn from_pattern(pattern: CompiledPattern) -> Self {
        Self {
            active: ArcSwap::from_pointee(pattern),
        }
    }

    /// Snapshot of the active pattern.
    pub fn get(&self) -> Arc<CompiledPattern> {
        self.active.load_full()
    }

    /// Compile `spec` and make it the active pattern.
    ///
    /// Returns the pattern that was replaced. On error the active pattern is
    /// left as it was.
    pub fn set(&self, spec: &str) -> Result<Arc<CompiledPattern>, ParseError> {
        self.replace(spec).map(|(previous, _)| previous)
    }

    /// Compile `spec`, make it active, and return `(previous, installed)`.
    ///
    /// `installed` is the exact pattern this call published, even if another
    /// writer has replaced it again by the time the caller looks.
    pub fn replace(
        &self,
        spec: &str,
    ) -> Result<(Arc<CompiledPattern>, Arc<CompiledPattern>), ParseError> {
        let installed = Arc::new(CompiledPattern::compile(spec)?);
        let previous = self.active.swap(Arc::clone(&installed));
        Ok((previous, installed))
    }

    /// Compile `spec` and publish it only if `expected` is still active.
    ///
    /// Of several racing callers holding the same `expected`, at most one
    /// succeeds; the rest get [`ReplaceError::Superseded`].
    pub fn set_if_current(
        &self,
        expected: &Arc<CompiledPattern>,
        spec: &str,
    ) -> Result<Arc<CompiledPattern>, ReplaceError> {
        let pattern = Arc::new(CompiledPattern::compile(spec)?);
        let previous = self.active.compare_and_swap(expected, pattern);
        if Arc::ptr_eq(&previous, expected) {
            Ok(Arc::clone(&previous))
        } else {
            Err(ReplaceError::Superseded)
        }
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_default_is_ff() {
        let store = PatternStore::new();
        let active = store.get();
        assert_eq!(active.spec().text(), "0xff");
        assert_eq!(active.unit().as_bytes(), &[0xFF]);
    }

    #[test]
    fn test_with_spec() {
        let store = PatternStore::with_spec("0b10").unwrap();
        assert_eq!(store.get().unit().as_bytes(), &[0x55]);
        assert!(PatternStore::with_spec("0q1").is_err());
    }

    #[test]
    fn test_set_returns_previous() {
        let store = PatternStore::new();
        let previous = store.set("0x00").unwrap();
        assert_eq!(previous.spec().text(), "0xff");
        assert_eq!(store.get().spec().text(), "0x00");
    }

    #[test]
    fn test_replace_returns_installed_pattern() {
        let store = PatternStore::new();
        let (previous, installed) = store.replace("0x11").unwrap();
        assert_eq!(previous.spec().text(), "0xff");
        assert!(Arc::ptr_eq(&installed, &store.get()));

        store.set("0x22").unwrap();
        assert_eq!(installed.spec().text(), "0x11");
        assert!(store.replace("0b").is_err());
        assert_eq!(store.get().spec().text(), "0x22");
    }

    #[test]
    fn test_failed_set_leaves_pattern_untouched() {
        let store = PatternStore::new();
        let before = store.get();

        let err = store.set("0xG1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDigit { character: 'G', .. }));
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let store = PatternStore::new();
        let snapshot = store.get();
        store.set("0xaabbcc").unwrap();

        assert_eq!(snapshot.unit().as_bytes(), &[0xFF]);
        assert_eq!(store.get().unit().as_bytes(), &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_set_if_current_succeeds_when_unchanged() {
        let store = PatternStore::new();
        let expected = store.get();
        let previous = store.set_if_current(&expected, "0x00").unwrap();
        assert!(Arc::ptr_eq(&previous, &expected));
        assert_eq!(store.get().spec().text(), "0x00");
    }

    #[test]
    fn test_set_if_current_rejects_stale_expectation() {
        let store = PatternStore::new();
        let stale = store.get();
        store.set("0x11").unwrap();

        let err = store.set_if_current(&stale, "0x22").unwrap_err();
        assert_eq!(err, ReplaceError::Superseded);
        assert_eq!(store.get().spec().text(), "0x11");
    }

    #[test]
    fn test_set_if_current_parse_error_wins_over_race_check() {
        let store = PatternStore::new();
        let expected = store.get();
        let err = store.set_if_current(&expected, "nope").unwrap_err();
        assert!(matches!(err, ReplaceError::Parse(ParseError::UnknownPrefix(_))));
        assert!(Arc::ptr_eq(&expected, &store.get()));
    }

    #[test]
    fn test_racing_compare_and_swap_has_one_winner() {
        const WRITERS: usize = 8;
        let store = Arc::new(PatternStore::new());
        let expected = store.get();
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let store = Arc::clone(&store);
                let expected = Arc::clone(&expected);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store
                        .set_if_current(&expected, &format!("0x{:02x}", i))
                        .is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_ne!(store.get().spec().text(), "0xff");
    }
}
