// ============================================================================
// Filter Statistics
// Per-thread counters of interval hits and exact fallbacks
// ============================================================================

use std::cell::Cell;
use std::fmt;

thread_local! {
    static INTERVAL_HITS: Cell<u64> = const { Cell::new(0) };
    static EXACT_FALLBACKS: Cell<u64> = const { Cell::new(0) };
}

/// Snapshot of how often the calling thread's filtered predicates were
/// decided by intervals versus the exact fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterStats {
    pub interval_hits: u64,
    pub exact_fallbacks: u64,
}

impl FilterStats {
    /// Total predicate evaluations.
    #[inline]
    pub fn total(&self) -> u64 {
        self.interval_hits + self.exact_fallbacks
    }

    /// Fraction decided by the interval tier, or `None` before any
    /// evaluation.
    pub fn hit_ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.interval_hits as f64 / total as f64),
        }
    }

    /// Counters accumulated since `earlier` was taken.
    #[inline]
    pub fn since(&self, earlier: &FilterStats) -> FilterStats {
        FilterStats {
            interval_hits: self.interval_hits.saturating_sub(earlier.interval_hits),
            exact_fallbacks: self.exact_fallbacks.saturating_sub(earlier.exact_fallbacks),
        }
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} interval hits, {} exact fallbacks",
            self.interval_hits, self.exact_fallbacks
        )
    }
}

/// Counters for the calling thread.
pub fn snapshot() -> FilterStats {
    FilterStats {
        interval_hits: INTERVAL_HITS.with(Cell::get),
        exact_fallbacks: EXACT_FALLBACKS.with(Cell::get),
    }
}

/// Zero the calling thread's counters.
pub fn reset() {
    INTERVAL_HITS.with(|c| c.set(0));
    EXACT_FALLBACKS.with(|c| c.set(0));
}

#[inline]
pub(crate) fn record_interval_hit() {
    INTERVAL_HITS.with(|c| c.set(c.get().wrapping_add(1)));
}

#[inline]
pub(crate) fn record_exact_fallback() {
    EXACT_FALLBACKS.with(|c| c.set(c.get().wrapping_add(1)));
}
