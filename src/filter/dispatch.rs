// ============================================================================
// Predicate Dispatch
// Filter-then-fallback evaluation and free functions over filtered values
// ============================================================================
//
// Sign and comparison are the robustness-critical predicates: they are first
// attempted on intervals and only recomputed exactly when the intervals are
// inconclusive. The remaining functions have no precision ambiguity and are
// forwarded to the construction value.

use super::cache::CachePolicy;
use super::filtered::Filtered;
use super::stats;
use crate::conversions::{NumberValidity, ToExact, ToInterval};
use crate::numeric::{FilterResult, Sign};
use num_traits::{Float, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::ops::Mul;

/// Which tier produced a predicate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Decided by interval arithmetic alone
    Interval,
    /// Interval was inconclusive; decided by exact arithmetic
    Exact,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Interval => write!(f, "interval"),
            Resolution::Exact => write!(f, "exact"),
        }
    }
}

/// A predicate result together with the tier that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolved<T> {
    pub value: T,
    pub resolution: Resolution,
}

impl<T> Resolved<T> {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.resolution == Resolution::Exact
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Evaluate a predicate with the two-tier filter.
///
/// `approx` is the cheap evaluation and returns `None` when it cannot
/// decide. Only then is `exact` run, and its answer is final. Each call is
/// counted in the thread's [`FilterStats`](super::FilterStats).
#[inline]
pub fn resolve<T>(
    approx: impl FnOnce() -> Option<T>,
    exact: impl FnOnce() -> T,
) -> Resolved<T> {
    match try_resolve(approx, || Ok::<T, Infallible>(exact())) {
        Ok(resolved) => resolved,
        Err(never) => match never {},
    }
}

/// [`resolve`] with a fallible exact tier. An error from `exact` is
/// returned as is; the fallback is still counted.
#[inline]
pub fn try_resolve<T, E>(
    approx: impl FnOnce() -> Option<T>,
    exact: impl FnOnce() -> Result<T, E>,
) -> Result<Resolved<T>, E> {
    match approx() {
        Some(value) => {
            stats::record_interval_hit();
            Ok(Resolved {
                value,
                resolution: Resolution::Interval,
            })
        },
        None => {
            stats::record_exact_fallback();
            tracing::trace!("interval filter inconclusive, evaluating exactly");
            Ok(Resolved {
                value: exact()?,
                resolution: Resolution::Exact,
            })
        },
    }
}

// ============================================================================
// Filtered Predicates
// ============================================================================

/// Sign of a filtered value, reporting which tier decided it.
///
/// # Errors
/// Returns `NonFinite` if the interval is inconclusive and the value has no
/// exact representation. For floats this happens only for NaN: infinities
/// are decided by their interval.
pub fn try_sign_resolved<CT, ET, C>(x: &Filtered<CT, ET, C>) -> FilterResult<Resolved<Sign>>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord + Zero,
    C: CachePolicy,
{
    try_resolve(
        || x.interval().sign(),
        || Ok(Sign::from(x.try_exact()?.cmp(&ET::zero()))),
    )
}

/// Sign of a filtered value.
///
/// # Errors
/// See [`try_sign_resolved`].
#[inline]
pub fn try_sign<CT, ET, C>(x: &Filtered<CT, ET, C>) -> FilterResult<Sign>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord + Zero,
    C: CachePolicy,
{
    try_sign_resolved(x).map(Resolved::into_inner)
}

/// Sign of a filtered value, reporting which tier decided it.
///
/// # Panics
/// Panics if the value is a NaN float. Use [`try_sign_resolved`] when NaN
/// can occur.
pub fn sign_resolved<CT, ET, C>(x: &Filtered<CT, ET, C>) -> Resolved<Sign>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord + Zero,
    C: CachePolicy,
{
    resolve(
        || x.interval().sign(),
        || Sign::from(x.exact().cmp(&ET::zero())),
    )
}

/// Sign of a filtered value.
#[inline]
pub fn sign<CT, ET, C>(x: &Filtered<CT, ET, C>) -> Sign
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord + Zero,
    C: CachePolicy,
{
    sign_resolved(x).value
}

/// Three-way comparison of two filtered values, reporting which tier decided
/// it.
///
/// # Errors
/// Returns `NonFinite` if the intervals are inconclusive and either value
/// has no exact representation. Equal infinities are decided by their
/// intervals, so for floats this means a NaN operand.
pub fn try_compare_resolved<CT, ET, C>(
    a: &Filtered<CT, ET, C>,
    b: &Filtered<CT, ET, C>,
) -> FilterResult<Resolved<Ordering>>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord,
    C: CachePolicy,
{
    try_resolve(
        || a.interval().compare(b.interval()),
        || Ok(a.try_exact()?.cmp(&b.try_exact()?)),
    )
}

/// Three-way comparison of two filtered values.
///
/// # Errors
/// See [`try_compare_resolved`].
#[inline]
pub fn try_compare<CT, ET, C>(
    a: &Filtered<CT, ET, C>,
    b: &Filtered<CT, ET, C>,
) -> FilterResult<Ordering>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord,
    C: CachePolicy,
{
    try_compare_resolved(a, b).map(Resolved::into_inner)
}

/// Three-way comparison of two filtered values, reporting which tier decided
/// it.
///
/// # Panics
/// Panics if either value is a NaN float. Use [`try_compare_resolved`] when
/// NaN can occur.
pub fn compare_resolved<CT, ET, C>(
    a: &Filtered<CT, ET, C>,
    b: &Filtered<CT, ET, C>,
) -> Resolved<Ordering>
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord,
    C: CachePolicy,
{
    resolve(
        || a.interval().compare(b.interval()),
        || a.exact().cmp(&b.exact()),
    )
}

/// Three-way comparison of two filtered values.
#[inline]
pub fn compare<CT, ET, C>(a: &Filtered<CT, ET, C>, b: &Filtered<CT, ET, C>) -> Ordering
where
    CT: ToInterval + ToExact<ET>,
    ET: Ord,
    C: CachePolicy,
{
    compare_resolved(a, b).value
}

// ============================================================================
// Forwarded Functions
// ============================================================================

/// Absolute value, computed on the construction value.
#[inline]
pub fn abs<CT, ET, C>(x: &Filtered<CT, ET, C>) -> Filtered<CT, ET, C>
where
    CT: ToInterval + Signed,
    C: CachePolicy,
{
    Filtered::new(x.value().abs())
}

/// The smaller of two values; the first on ties. The cache is carried over.
#[inline]
pub fn min<CT, ET, C>(a: &Filtered<CT, ET, C>, b: &Filtered<CT, ET, C>) -> Filtered<CT, ET, C>
where
    CT: Clone + PartialOrd,
    C: CachePolicy,
{
    if b < a {
        b.clone()
    } else {
        a.clone()
    }
}

/// The larger of two values; the first on ties. The cache is carried over.
#[inline]
pub fn max<CT, ET, C>(a: &Filtered<CT, ET, C>, b: &Filtered<CT, ET, C>) -> Filtered<CT, ET, C>
where
    CT: Clone + PartialOrd,
    C: CachePolicy,
{
    if b > a {
        b.clone()
    } else {
        a.clone()
    }
}

/// `x * x`, computed on the construction value.
#[inline]
pub fn square<CT, ET, C>(x: &Filtered<CT, ET, C>) -> Filtered<CT, ET, C>
where
    CT: ToInterval + Clone + Mul<Output = CT>,
    C: CachePolicy,
{
    Filtered::new(x.value().clone() * x.value().clone())
}

/// Square root for floating-point construction types.
///
/// # Errors
/// Returns `NegativeRadicand` if the value is negative.
#[inline]
pub fn sqrt<CT, ET, C>(x: &Filtered<CT, ET, C>) -> FilterResult<Filtered<CT, ET, C>>
where
    CT: ToInterval + ToExact<ET> + Float,
    ET: Ord + Zero,
    C: CachePolicy,
{
    x.checked_sqrt()
}

/// False if the construction value is not a number at all.
#[inline]
pub fn is_valid<CT, ET, C>(x: &Filtered<CT, ET, C>) -> bool
where
    CT: ToInterval + NumberValidity,
    C: CachePolicy,
{
    x.value().is_valid()
}

/// False if the construction value is NaN or infinite.
#[inline]
pub fn is_finite<CT, ET, C>(x: &Filtered<CT, ET, C>) -> bool
where
    CT: ToInterval + NumberValidity,
    C: CachePolicy,
{
    x.value().is_finite()
}

/// Nearest double to the construction value, if one exists.
#[inline]
pub fn to_f64<CT, ET, C>(x: &Filtered<CT, ET, C>) -> Option<f64>
where
    CT: ToInterval + ToPrimitive,
    C: CachePolicy,
{
    x.value().to_f64()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{stats, Cached, FilteredDecimal, FilteredF64, FilteredRational, NoCache};
    use crate::numeric::FilterError;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn q(num: i64, den: i64) -> FilteredRational<Cached> {
        FilteredRational::<Cached>::from_ratio(num, den).unwrap()
    }

    #[test]
    fn test_equal_thirds_need_exact_path() {
        stats::reset();
        let diff = q(1, 3) - q(1, 3);
        assert!(diff.interval().contains_zero());
        assert_eq!(diff.interval().sign(), None);

        let resolved = sign_resolved(&diff);
        assert_eq!(resolved.value, Sign::Zero);
        assert_eq!(resolved.resolution, Resolution::Exact);
        assert_eq!(stats::snapshot().exact_fallbacks, 1);
    }

    #[test]
    fn test_third_minus_quarter_decided_by_interval() {
        stats::reset();
        let diff = q(1, 3) - q(1, 4);
        assert!(!diff.interval().contains_zero());

        let resolved = sign_resolved(&diff);
        assert_eq!(resolved.value, Sign::Positive);
        assert_eq!(resolved.resolution, Resolution::Interval);
        assert!(!resolved.is_exact());
        assert_eq!(stats::snapshot().exact_fallbacks, 0);
        assert_eq!(stats::snapshot().interval_hits, 1);
    }

    #[test]
    fn test_close_values_compare() {
        // 0.1 + 0.2 and 0.3 differ only in the last bit of a double
        let a = FilteredF64::<NoCache>::new(0.1 + 0.2);
        let b = FilteredF64::<NoCache>::new(0.3);
        let resolved = compare_resolved(&a, &b);
        assert_eq!(resolved.value, Ordering::Greater);
        assert_eq!(resolved.resolution, Resolution::Interval);

        // Two decimals whose intervals overlap after conversion
        let c = FilteredDecimal::<Cached>::new(Decimal::from_str("0.1").unwrap());
        let d = FilteredDecimal::<Cached>::new(Decimal::from_str("0.10").unwrap());
        let resolved = compare_resolved(&c, &d);
        assert_eq!(resolved.value, Ordering::Equal);
        assert_eq!(resolved.resolution, Resolution::Exact);
    }

    #[test]
    fn test_sign_of_negative_value() {
        let x = FilteredF64::<Cached>::new(-3.5);
        assert_eq!(sign(&x), Sign::Negative);
        let zero = FilteredF64::<Cached>::new(0.0);
        assert_eq!(sign(&zero), Sign::Zero);
    }

    #[test]
    fn test_compare_orders() {
        assert_eq!(compare(&q(1, 3), &q(1, 2)), Ordering::Less);
        assert_eq!(compare(&q(2, 3), &q(1, 2)), Ordering::Greater);
        assert_eq!(compare(&q(2, 4), &q(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_resolve_only_runs_exact_when_needed() {
        let mut exact_calls = 0;
        let hit = resolve(|| Some(1), || {
            exact_calls += 1;
            2
        });
        assert_eq!(hit.into_inner(), 1);
        assert_eq!(exact_calls, 0);

        let miss = resolve(|| None, || 2);
        assert_eq!(miss.value, 2);
        assert!(miss.is_exact());
    }

    #[test]
    fn test_abs_min_max_square() {
        let a = q(-1, 2);
        let b = q(1, 3);
        assert_eq!(abs(&a).exact(), BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(min(&a, &b), a);
        assert_eq!(max(&a, &b), b);
        assert_eq!(
            square(&a).exact(),
            BigRational::new(BigInt::from(1), BigInt::from(4))
        );
    }

    #[test]
    fn test_min_max_ties_keep_first() {
        let a = FilteredF64::<Cached>::new(0.0);
        let b = FilteredF64::<Cached>::new(-0.0);
        assert!(min(&a, &b).value().is_sign_positive());
        assert!(max(&a, &b).value().is_sign_positive());
    }

    #[test]
    fn test_sqrt() {
        let x = FilteredF64::<Cached>::new(2.25);
        assert_eq!(*sqrt(&x).unwrap().value(), 1.5);
        assert!(sqrt(&FilteredF64::<Cached>::new(-0.5)).is_err());
    }

    #[test]
    fn test_validity() {
        let nan = FilteredF64::<NoCache>::new(f64::NAN);
        let inf = FilteredF64::<NoCache>::new(f64::INFINITY);
        let one = FilteredF64::<NoCache>::new(1.0);
        assert!(!is_valid(&nan));
        assert!(is_valid(&inf));
        assert!(!is_finite(&inf));
        assert!(is_finite(&one));
        assert!(is_finite(&q(1, 3)));
    }

    #[test]
    fn test_infinite_sign_needs_no_exact_path() {
        let inf = FilteredF64::<NoCache>::new(f64::NEG_INFINITY);
        let resolved = sign_resolved(&inf);
        assert_eq!(resolved.value, Sign::Negative);
        assert_eq!(resolved.resolution, Resolution::Interval);
    }

    #[test]
    fn test_compare_infinities() {
        let pos = FilteredF64::<Cached>::new(f64::INFINITY);
        let neg = FilteredF64::<NoCache>::new(f64::NEG_INFINITY);
        let resolved = compare_resolved(&pos, &pos.clone());
        assert_eq!(resolved.value, Ordering::Equal);
        assert_eq!(resolved.resolution, Resolution::Interval);
        assert_eq!(Some(resolved.value), pos.partial_cmp(&pos.clone()));

        let neg_b = FilteredF64::<NoCache>::new(f64::NEG_INFINITY);
        let pos_b = FilteredF64::<NoCache>::new(f64::INFINITY);
        assert_eq!(compare(&neg, &pos_b), Ordering::Less);
        assert_eq!(compare(&pos_b, &neg), Ordering::Greater);
        assert_eq!(compare(&neg, &neg_b), Ordering::Equal);
    }

    #[test]
    fn test_try_predicates_report_nan() {
        let nan = FilteredF64::<Cached>::new(f64::NAN);
        let one = FilteredF64::<Cached>::new(1.0);
        let inf = FilteredF64::<Cached>::new(f64::INFINITY);

        assert_eq!(try_sign(&nan), Err(FilterError::NonFinite));
        assert_eq!(try_compare(&nan, &one), Err(FilterError::NonFinite));
        assert_eq!(try_compare(&inf, &nan), Err(FilterError::NonFinite));

        assert_eq!(try_sign(&inf), Ok(Sign::Positive));
        assert_eq!(try_compare(&one, &inf), Ok(Ordering::Less));
        let third = q(1, 3);
        let resolved = try_sign_resolved(&(&third - &third)).unwrap();
        assert_eq!(resolved.value, Sign::Zero);
        assert!(resolved.is_exact());
    }

    #[test]
    fn test_try_resolve_counts_failed_fallback() {
        stats::reset();
        let failed: Result<Resolved<i32>, FilterError> =
            try_resolve(|| None, || Err(FilterError::NonFinite));
        assert_eq!(failed, Err(FilterError::NonFinite));
        assert_eq!(stats::snapshot().exact_fallbacks, 1);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(&q(1, 4)), Some(0.25));
        assert_eq!(to_f64(&FilteredF64::<NoCache>::new(1.5)), Some(1.5));
    }
}
