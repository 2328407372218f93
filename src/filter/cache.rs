// ============================================================================
// Cache Policy
// Compile-time choice between recomputing and storing the interval
// ============================================================================

use crate::conversions::ToInterval;
use crate::interval::Interval;
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::NoCache {}
    impl Sealed for super::Cached {}
}

/// Strategy for obtaining a filtered value's interval.
///
/// Implemented only by [`NoCache`] and [`Cached`].
pub trait CachePolicy: sealed::Sealed + 'static {
    /// Storage carried alongside the construction value.
    type Slot: Clone + fmt::Debug;

    /// Name used in `Debug` output.
    const NAME: &'static str;

    /// Compute the slot for a freshly constructed or mutated value.
    fn store<CT: ToInterval>(value: &CT) -> Self::Slot;

    /// Interval of `value`, using the slot when it holds one.
    fn load<CT: ToInterval>(slot: &Self::Slot, value: &CT) -> Interval;
}

/// Recompute the interval on every query. No storage overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoCache;

/// Store the interval next to the value and refresh it on mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cached;

impl CachePolicy for NoCache {
    type Slot = ();

    const NAME: &'static str = "NoCache";

    #[inline]
    fn store<CT: ToInterval>(_value: &CT) -> Self::Slot {}

    #[inline]
    fn load<CT: ToInterval>(_slot: &Self::Slot, value: &CT) -> Interval {
        value.to_interval()
    }
}

impl CachePolicy for Cached {
    type Slot = Interval;

    const NAME: &'static str = "Cached";

    #[inline]
    fn store<CT: ToInterval>(value: &CT) -> Self::Slot {
        value.to_interval()
    }

    #[inline]
    fn load<CT: ToInterval>(slot: &Self::Slot, _value: &CT) -> Interval {
        *slot
    }
}
