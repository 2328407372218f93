// ============================================================================
// Interval
// Sound f64 enclosure of a real value, computed with outward rounding
// ============================================================================

use super::rounding::RoundingGuard;
use crate::numeric::{FilterError, FilterResult, Sign};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest magnitude up to which every integer is exactly representable.
const EXACT_INTEGER_LIMIT: u128 = 1 << f64::MANTISSA_DIGITS;

/// Closed interval `[lo, hi]` of doubles that contains a true real value.
///
/// Invariant: `lo <= hi` and neither bound is NaN. Infinite bounds are
/// allowed; `[-inf, +inf]` encloses anything and is used when nothing better
/// is known.
///
/// Arithmetic rounds every lower bound toward -inf and every upper bound
/// toward +inf, so the result always contains the true result of the same
/// operation on any values contained in the operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// The whole real line.
    pub const ENTIRE: Self = Self {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// The point interval `[0, 0]`.
    pub const ZERO: Self = Self { lo: 0.0, hi: 0.0 };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from explicit bounds.
    ///
    /// # Errors
    /// Returns `InvalidInterval` if either bound is NaN or `lo > hi`.
    #[inline]
    pub fn new(lo: f64, hi: f64) -> FilterResult<Self> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(FilterError::InvalidInterval);
        }
        Ok(Self { lo, hi })
    }

    /// Point interval for a double known exactly.
    ///
    /// NaN carries no information about a real value and maps to
    /// [`Interval::ENTIRE`].
    #[inline]
    pub fn point(value: f64) -> Self {
        if value.is_nan() {
            Self::ENTIRE
        } else {
            Self {
                lo: value,
                hi: value,
            }
        }
    }

    /// Enclosure of a double that approximates the true value to within one
    /// ulp (for example a round-to-nearest or truncating conversion).
    #[inline]
    pub fn around(approx: f64) -> Self {
        if approx.is_nan() {
            Self::ENTIRE
        } else {
            Self {
                lo: approx.next_down(),
                hi: approx.next_up(),
            }
        }
    }

    /// Enclosure of an integer. Exact when the integer fits the mantissa.
    #[inline]
    pub fn from_i128(value: i128) -> Self {
        let approx = value as f64;
        if value.unsigned_abs() <= EXACT_INTEGER_LIMIT {
            Self::point(approx)
        } else {
            Self::around(approx)
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn lo(self) -> f64 {
        self.lo
    }

    #[inline]
    pub const fn hi(self) -> f64 {
        self.hi
    }

    /// Width `hi - lo`, rounded up.
    #[inline]
    pub fn width(self) -> f64 {
        let guard = RoundingGuard::outward();
        guard.sub_up(self.hi, self.lo)
    }

    /// Midpoint of the bounds (not rounded in any particular direction).
    #[inline]
    pub fn midpoint(self) -> f64 {
        if self.is_point() {
            return self.lo;
        }
        match (self.lo.is_finite(), self.hi.is_finite()) {
            (true, true) => self.lo / 2.0 + self.hi / 2.0,
            (false, false) => 0.0,
            (true, false) => f64::MAX.copysign(self.hi),
            (false, true) => f64::MAX.copysign(self.lo),
        }
    }

    #[inline]
    pub fn is_point(self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn contains(self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    #[inline]
    pub fn contains_zero(self) -> bool {
        self.contains(0.0)
    }

    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    // ========================================================================
    // Filter Queries
    // ========================================================================

    /// Sign of every value in the interval, if they all agree and are
    /// non-zero.
    ///
    /// An interval containing zero is inconclusive, including the point
    /// `[0, 0]`: zero-valued results are always confirmed exactly.
    #[inline]
    pub fn sign(self) -> Option<Sign> {
        if self.lo > 0.0 {
            Some(Sign::Positive)
        } else if self.hi < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }

    /// Ordering of every pair of values drawn from the two intervals, if it
    /// is the same for all pairs.
    ///
    /// Conclusive for disjoint intervals, and for two identical infinite
    /// points: only an exact infinity encloses to `[inf, inf]`.
    #[inline]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        if self.hi < other.lo {
            Some(Ordering::Less)
        } else if self.lo > other.hi {
            Some(Ordering::Greater)
        } else if self.is_point() && self == other && self.lo.is_infinite() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    // ========================================================================
    // Set Operations
    // ========================================================================

    /// Smallest interval containing both.
    #[inline]
    pub fn hull(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Common part of both, if any.
    #[inline]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let lo = self.lo.max(other.lo);
        let hi = self.hi.min(other.hi);
        (lo <= hi).then_some(Self { lo, hi })
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Enclosure of `|x|`.
    #[inline]
    pub fn abs(self) -> Self {
        if self.lo >= 0.0 {
            self
        } else if self.hi <= 0.0 {
            -self
        } else {
            Self {
                lo: 0.0,
                hi: (-self.lo).max(self.hi),
            }
        }
    }

    /// Enclosure of `min(x, y)`.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.min(other.hi),
        }
    }

    /// Enclosure of `max(x, y)`.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            lo: self.lo.max(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Enclosure of `x^2`. Never negative, unlike `x * x` on an interval
    /// that straddles zero.
    #[inline]
    pub fn square(self) -> Self {
        let magnitude = self.abs();
        let guard = RoundingGuard::outward();
        Self {
            lo: guard.mul_down(magnitude.lo, magnitude.lo).max(0.0),
            hi: guard.mul_up(magnitude.hi, magnitude.hi),
        }
    }

    /// Checked division.
    ///
    /// # Errors
    /// Returns `ZeroStraddlingDivisor` if the divisor contains zero. The
    /// quotient would be unbounded, so the filter cannot say anything.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> FilterResult<Self> {
        if rhs.contains_zero() {
            return Err(FilterError::ZeroStraddlingDivisor);
        }
        let guard = RoundingGuard::outward();
        let lows = [
            guard.div_down(self.lo, rhs.lo),
            guard.div_down(self.lo, rhs.hi),
            guard.div_down(self.hi, rhs.lo),
            guard.div_down(self.hi, rhs.hi),
        ];
        let highs = [
            guard.div_up(self.lo, rhs.lo),
            guard.div_up(self.lo, rhs.hi),
            guard.div_up(self.hi, rhs.lo),
            guard.div_up(self.hi, rhs.hi),
        ];
        Ok(Self::from_candidates(lows, highs))
    }

    /// Checked square root.
    ///
    /// # Errors
    /// Returns `NegativeRadicand` if the lower bound is negative.
    #[inline]
    pub fn checked_sqrt(self) -> FilterResult<Self> {
        if self.lo < 0.0 {
            return Err(FilterError::NegativeRadicand);
        }
        let guard = RoundingGuard::outward();
        Ok(Self {
            lo: guard.sqrt_down(self.lo),
            hi: guard.sqrt_up(self.hi),
        })
    }

    #[inline]
    fn from_candidates(lows: [f64; 4], highs: [f64; 4]) -> Self {
        Self {
            lo: lows.into_iter().fold(f64::INFINITY, f64::min),
            hi: highs.into_iter().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Interval {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Interval {
    #[inline]
    fn from(value: f64) -> Self {
        Self::point(value)
    }
}

impl Neg for Interval {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl Add for Interval {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let guard = RoundingGuard::outward();
        Self {
            lo: guard.add_down(self.lo, rhs.lo),
            hi: guard.add_up(self.hi, rhs.hi),
        }
    }
}

impl Sub for Interval {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        let guard = RoundingGuard::outward();
        Self {
            lo: guard.sub_down(self.lo, rhs.hi),
            hi: guard.sub_up(self.hi, rhs.lo),
        }
    }
}

impl Mul for Interval {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let guard = RoundingGuard::outward();
        let lows = [
            guard.mul_down(self.lo, rhs.lo),
            guard.mul_down(self.lo, rhs.hi),
            guard.mul_down(self.hi, rhs.lo),
            guard.mul_down(self.hi, rhs.hi),
        ];
        let highs = [
            guard.mul_up(self.lo, rhs.lo),
            guard.mul_up(self.lo, rhs.hi),
            guard.mul_up(self.hi, rhs.lo),
            guard.mul_up(self.hi, rhs.hi),
        ];
        Self::from_candidates(lows, highs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

// ============================================================================
// Tests
// ============================================================================
