// ============================================================================
// Interval Soundness Tests
// Outward-rounded bounds must bracket the exact rational result
// ============================================================================

use filtered_exact::interval::{current_mode, Interval, RoundingGuard, RoundingMode};
use filtered_exact::numeric::FilterError;
use num_rational::BigRational;
use quickcheck::{quickcheck, TestResult};

fn to_rational(value: f64) -> Option<BigRational> {
    BigRational::from_float(value)
}

/// `lo <= exact <= hi`, with infinite bounds accepted as unbounded.
fn brackets(lo: f64, hi: f64, exact: &BigRational) -> bool {
    let above_lo = lo == f64::NEG_INFINITY || to_rational(lo).is_some_and(|lo| &lo <= exact);
    let below_hi = hi == f64::INFINITY || to_rational(hi).is_some_and(|hi| exact <= &hi);
    above_lo && below_hi
}

fn finite_pair(x: f64, y: f64) -> Option<(BigRational, BigRational)> {
    Some((to_rational(x)?, to_rational(y)?))
}

// ============================================================================
// Directed Primitives
// ============================================================================

fn prop_add_brackets(x: f64, y: f64) -> TestResult {
    let Some((xr, yr)) = finite_pair(x, y) else {
        return TestResult::discard();
    };
    let guard = RoundingGuard::outward();
    let exact = xr + yr;
    TestResult::from_bool(brackets(guard.add_down(x, y), guard.add_up(x, y), &exact))
}

fn prop_sub_brackets(x: f64, y: f64) -> TestResult {
    let Some((xr, yr)) = finite_pair(x, y) else {
        return TestResult::discard();
    };
    let guard = RoundingGuard::outward();
    let exact = xr - yr;
    TestResult::from_bool(brackets(guard.sub_down(x, y), guard.sub_up(x, y), &exact))
}

fn prop_mul_brackets(x: f64, y: f64) -> TestResult {
    let Some((xr, yr)) = finite_pair(x, y) else {
        return TestResult::discard();
    };
    let guard = RoundingGuard::outward();
    let exact = xr * yr;
    TestResult::from_bool(brackets(guard.mul_down(x, y), guard.mul_up(x, y), &exact))
}

fn prop_div_brackets(x: f64, y: f64) -> TestResult {
    if y == 0.0 {
        return TestResult::discard();
    }
    let Some((xr, yr)) = finite_pair(x, y) else {
        return TestResult::discard();
    };
    let guard = RoundingGuard::outward();
    let exact = xr / yr;
    TestResult::from_bool(brackets(guard.div_down(x, y), guard.div_up(x, y), &exact))
}

fn prop_sqrt_brackets(x: f64) -> TestResult {
    if !x.is_finite() || x < 0.0 {
        return TestResult::discard();
    }
    let Some(radicand) = to_rational(x) else {
        return TestResult::discard();
    };
    let guard = RoundingGuard::outward();
    let (lo, hi) = (guard.sqrt_down(x), guard.sqrt_up(x));

    // lo^2 <= x <= hi^2, checked exactly
    let lo_ok = lo <= 0.0 || to_rational(lo).is_some_and(|lo| &lo * &lo <= radicand);
    let hi_ok = hi == f64::INFINITY || to_rational(hi).is_some_and(|hi| radicand <= &hi * &hi);
    TestResult::from_bool(lo_ok && hi_ok)
}

#[test]
fn test_directed_add_brackets_exact_sum() {
    quickcheck(prop_add_brackets as fn(f64, f64) -> TestResult);
}

#[test]
fn test_directed_sub_brackets_exact_difference() {
    quickcheck(prop_sub_brackets as fn(f64, f64) -> TestResult);
}

#[test]
fn test_directed_mul_brackets_exact_product() {
    quickcheck(prop_mul_brackets as fn(f64, f64) -> TestResult);
}

#[test]
fn test_directed_div_brackets_exact_quotient() {
    quickcheck(prop_div_brackets as fn(f64, f64) -> TestResult);
}

#[test]
fn test_directed_sqrt_brackets_exact_root() {
    quickcheck(prop_sqrt_brackets as fn(f64) -> TestResult);
}

// ============================================================================
// Interval Operations
// ============================================================================

fn interval_of(a: f64, b: f64) -> Option<Interval> {
    Interval::new(a.min(b), a.max(b)).ok()
}

/// Every corner combination of two intervals lands inside `op`'s result.
fn corners_enclosed(
    a: (f64, f64),
    b: (f64, f64),
    result: Interval,
    exact_op: impl Fn(&BigRational, &BigRational) -> BigRational,
) -> TestResult {
    for x in [a.0, a.1] {
        for y in [b.0, b.1] {
            let Some((xr, yr)) = finite_pair(x, y) else {
                return TestResult::discard();
            };
            if !brackets(result.lo(), result.hi(), &exact_op(&xr, &yr)) {
                return TestResult::failed();
            }
        }
    }
    TestResult::passed()
}

fn prop_interval_add(a: (f64, f64), b: (f64, f64)) -> TestResult {
    let (Some(x), Some(y)) = (interval_of(a.0, a.1), interval_of(b.0, b.1)) else {
        return TestResult::discard();
    };
    corners_enclosed(a, b, x + y, |p, q| p + q)
}

fn prop_interval_mul(a: (f64, f64), b: (f64, f64)) -> TestResult {
    let (Some(x), Some(y)) = (interval_of(a.0, a.1), interval_of(b.0, b.1)) else {
        return TestResult::discard();
    };
    corners_enclosed(a, b, x * y, |p, q| p * q)
}

fn prop_interval_div(a: (f64, f64), b: (f64, f64)) -> TestResult {
    let (Some(x), Some(y)) = (interval_of(a.0, a.1), interval_of(b.0, b.1)) else {
        return TestResult::discard();
    };
    match x.checked_div(y) {
        Ok(quotient) => corners_enclosed(a, b, quotient, |p, q| p / q),
        Err(err) => TestResult::from_bool(
            err == FilterError::ZeroStraddlingDivisor && y.contains_zero(),
        ),
    }
}

fn prop_square_never_negative(a: f64, b: f64) -> TestResult {
    let Some(x) = interval_of(a, b) else {
        return TestResult::discard();
    };
    let squared = x.square();
    TestResult::from_bool(squared.lo() >= 0.0 && squared.hi() >= squared.lo())
}

#[test]
fn test_interval_add_encloses_corners() {
    quickcheck(prop_interval_add as fn((f64, f64), (f64, f64)) -> TestResult);
}

#[test]
fn test_interval_mul_encloses_corners() {
    quickcheck(prop_interval_mul as fn((f64, f64), (f64, f64)) -> TestResult);
}

#[test]
fn test_interval_div_encloses_corners() {
    quickcheck(prop_interval_div as fn((f64, f64), (f64, f64)) -> TestResult);
}

#[test]
fn test_interval_square_is_non_negative() {
    quickcheck(prop_square_never_negative as fn(f64, f64) -> TestResult);
}

#[test]
fn test_mode_is_restored_after_properties() {
    quickcheck(prop_mul_brackets as fn(f64, f64) -> TestResult);
    assert_eq!(current_mode(), RoundingMode::ToNearest);
}
