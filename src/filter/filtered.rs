// ============================================================================
// Filtered Value
// Construction value paired with an interval filter and an exact fallback
// ============================================================================

use super::cache::{CachePolicy, NoCache};
use super::dispatch;
use crate::conversions::{FromRatio, ToExact, ToInterval};
use crate::interval::Interval;
use crate::numeric::{FilterError, FilterResult, Sign};
use num_rational::BigRational;
use num_traits::{Float, Zero};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Div;
use std::str::FromStr;

/// Number type that uses interval arithmetic as a filter in front of an
/// exact representation.
///
/// # Type Parameters
/// - `CT`: construction type, the value actually stored and computed with
/// - `ET`: exact type, produced on demand when a filter is inconclusive
/// - `C`: cache policy, [`NoCache`] (default) or [`Cached`](super::Cached)
///
/// Arithmetic combines construction values directly, exactly as `CT` would
/// on its own. Comparison operators also delegate to `CT`. The filtering
/// happens in [`sign`](dispatch::sign) and [`compare`](dispatch::compare),
/// which try [`interval`](Self::interval) first and fall back to
/// [`exact`](Self::exact).
///
/// # Invariant
/// `interval()` always contains the real value denoted by `value()`. Under
/// [`Cached`](super::Cached) the stored interval is recomputed from the new
/// value after every mutation, never derived from older intervals.
///
/// # Example
/// ```
/// use filtered_exact::prelude::*;
///
/// let a = FilteredRational::<Cached>::from_ratio(1i64, 3i64)?;
/// let b = FilteredRational::<Cached>::from_ratio(1i64, 4i64)?;
/// let resolved = sign_resolved(&(&a - &b));
/// assert_eq!(resolved.value, Sign::Positive);
/// assert_eq!(resolved.resolution, Resolution::Interval);
/// # Ok::<(), FilterError>(())
/// ```
pub struct Filtered<CT, ET = BigRational, C: CachePolicy = NoCache> {
    value: CT,
    cache: C::Slot,
    _exact: PhantomData<fn() -> ET>,
}

/// `f64` filtered against exact rationals.
pub type FilteredF64<C = NoCache> = Filtered<f64, BigRational, C>;

/// Decimal filtered against exact rationals.
pub type FilteredDecimal<C = NoCache> = Filtered<Decimal, BigRational, C>;

/// Rational construction values, filtered by intervals.
pub type FilteredRational<C = NoCache> = Filtered<BigRational, BigRational, C>;

impl<CT, ET, C> Filtered<CT, ET, C>
where
    CT: ToInterval,
    C: CachePolicy,
{
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a construction value, computing its cache if the policy has one.
    #[inline]
    pub fn new(value: CT) -> Self {
        let cache = C::store(&value);
        Self {
            value,
            cache,
            _exact: PhantomData,
        }
    }

    /// Build from a numerator/denominator pair.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `den` is zero.
    #[inline]
    pub fn from_ratio<N>(num: N, den: N) -> FilterResult<Self>
    where
        CT: FromRatio<N>,
    {
        CT::from_ratio(num, den).map(Self::new)
    }

    /// Replace the construction value and refresh the cache.
    #[inline]
    pub fn set_value(&mut self, value: CT) {
        self.value = value;
        self.refresh();
    }

    #[inline]
    pub(crate) fn refresh(&mut self) {
        self.cache = C::store(&self.value);
    }

    /// Mutate the construction value in place, then refresh the cache.
    #[inline]
    pub(crate) fn update(&mut self, mutate: impl FnOnce(&mut CT)) {
        mutate(&mut self.value);
        self.refresh();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The construction value.
    #[inline]
    pub fn value(&self) -> &CT {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> CT {
        self.value
    }

    /// Interval enclosing the value: stored under `Cached`, computed under
    /// `NoCache`.
    #[inline]
    pub fn interval(&self) -> Interval {
        C::load(&self.cache, &self.value)
    }

    /// Exact conversion of the construction value.
    ///
    /// # Errors
    /// Returns `NonFinite` if the construction value is NaN or infinite.
    #[inline]
    pub fn try_exact(&self) -> FilterResult<ET>
    where
        CT: ToExact<ET>,
    {
        self.value.to_exact()
    }

    /// Exact conversion of the construction value.
    ///
    /// # Panics
    /// Panics if the construction value has no exact representation (a NaN
    /// or infinite float). Check [`is_finite`](dispatch::is_finite) first when
    /// the construction type admits such states.
    #[inline]
    pub fn exact(&self) -> ET
    where
        CT: ToExact<ET>,
    {
        self.try_exact()
            .expect("exact() called on a non-finite construction value")
    }

    // ========================================================================
    // Checked Operations
    // ========================================================================

    /// Division that refuses an exactly zero divisor.
    ///
    /// The divisor's interval is consulted first. Only when it contains zero
    /// is the divisor's exact sign computed.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if the divisor is exactly zero, and
    /// `NonFinite` if the divisor is NaN.
    pub fn checked_div(&self, rhs: &Self) -> FilterResult<Self>
    where
        CT: ToExact<ET> + Clone + Div<Output = CT>,
        ET: Ord + Zero,
    {
        if rhs.interval().contains_zero() && dispatch::try_sign(rhs)?.is_zero() {
            tracing::debug!(divisor = %rhs.interval(), "filtered division by exact zero");
            return Err(FilterError::DivisionByZero);
        }
        Ok(Self::new(self.value.clone() / rhs.value.clone()))
    }

    /// Square root that refuses a negative radicand.
    ///
    /// # Errors
    /// Returns `NegativeRadicand` if the value is negative: immediately when
    /// the whole interval is negative, after an exact check when the interval
    /// straddles zero. Returns `NonFinite` for NaN.
    pub fn checked_sqrt(&self) -> FilterResult<Self>
    where
        CT: ToExact<ET> + Float,
        ET: Ord + Zero,
    {
        let radicand = self.interval();
        let negative = if radicand.hi() < 0.0 {
            true
        } else if radicand.lo() < 0.0 {
            dispatch::try_sign(self)? == Sign::Negative
        } else {
            false
        };
        if negative {
            tracing::debug!(radicand = %radicand, "filtered square root of a negative value");
            return Err(FilterError::NegativeRadicand);
        }
        Ok(Self::new(self.value.sqrt()))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<CT, ET, C> Clone for Filtered<CT, ET, C>
where
    CT: Clone,
    C: CachePolicy,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            cache: self.cache.clone(),
            _exact: PhantomData,
        }
    }
}

impl<CT, ET, C> Copy for Filtered<CT, ET, C>
where
    CT: Copy,
    C: CachePolicy,
    C::Slot: Copy,
{
}

impl<CT, ET, C> Default for Filtered<CT, ET, C>
where
    CT: ToInterval + Default,
    C: CachePolicy,
{
    #[inline]
    fn default() -> Self {
        Self::new(CT::default())
    }
}

impl<CT, ET, C> From<CT> for Filtered<CT, ET, C>
where
    CT: ToInterval,
    C: CachePolicy,
{
    #[inline]
    fn from(value: CT) -> Self {
        Self::new(value)
    }
}

impl<CT, ET, C> PartialEq for Filtered<CT, ET, C>
where
    CT: PartialEq,
    C: CachePolicy,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<CT, ET, C> Eq for Filtered<CT, ET, C>
where
    CT: Eq,
    C: CachePolicy,
{
}

impl<CT, ET, C> PartialOrd for Filtered<CT, ET, C>
where
    CT: PartialOrd,
    C: CachePolicy,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<CT, ET, C> Ord for Filtered<CT, ET, C>
where
    CT: Ord,
    C: CachePolicy,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<CT, ET, C> Hash for Filtered<CT, ET, C>
where
    CT: Hash,
    C: CachePolicy,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

// ============================================================================
// Display, Debug and Parsing
// ============================================================================

impl<CT, ET, C> fmt::Debug for Filtered<CT, ET, C>
where
    CT: fmt::Debug,
    C: CachePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered")
            .field("value", &self.value)
            .field("policy", &C::NAME)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Text output is exactly the construction type's.
impl<CT, ET, C> fmt::Display for Filtered<CT, ET, C>
where
    CT: fmt::Display,
    C: CachePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Text input is parsed by the construction type; its error is passed through.
impl<CT, ET, C> FromStr for Filtered<CT, ET, C>
where
    CT: ToInterval + FromStr,
    C: CachePolicy,
{
    type Err = CT::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<CT>().map(Self::new)
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl<CT, ET, C> serde::Serialize for Filtered<CT, ET, C>
where
    CT: serde::Serialize,
    C: CachePolicy,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, CT, ET, C> serde::Deserialize<'de> for Filtered<CT, ET, C>
where
    CT: ToInterval + serde::Deserialize<'de>,
    C: CachePolicy,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CT::deserialize(deserializer).map(Self::new)
    }
}

// ============================================================================
// Tests
// ============================================================================
