// ============================================================================
// Rational Construction Types
// Ratio<i64> and BigRational
// ============================================================================

use super::{FromRatio, NumberValidity, ToExact, ToInterval};
use crate::interval::Interval;
use crate::numeric::{FilterError, FilterResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::{BigRational, Ratio};
use num_traits::{ToPrimitive, Zero};

/// Bits kept from the shorter of numerator/denominator before converting.
const KEPT_BITS: u64 = 64;

/// Enclosure of a big integer.
fn bigint_interval(value: &BigInt) -> Interval {
    if value.bits() <= u64::from(f64::MANTISSA_DIGITS) {
        value.to_i128().map_or(Interval::ENTIRE, Interval::from_i128)
    } else {
        value.to_f64().map_or(Interval::ENTIRE, Interval::around)
    }
}

/// Enclosure of `value / 2^shift`.
fn shifted_interval(value: &BigInt, shift: u64) -> Interval {
    if shift == 0 {
        return bigint_interval(value);
    }
    // Shr rounds toward -inf, so the true quotient lies in [floor, floor + 1]
    let floor = value >> shift;
    let ceil = &floor + 1u32;
    bigint_interval(&floor).hull(bigint_interval(&ceil))
}

/// Enclosure of `numer / denom` for a positive denominator.
///
/// Both parts are scaled by the same power of two first so that operands
/// thousands of bits long still give finite, tight bounds.
fn ratio_interval(numer: &BigInt, denom: &BigInt) -> Interval {
    let shift = numer.bits().min(denom.bits()).saturating_sub(KEPT_BITS);
    let num = shifted_interval(numer, shift);
    let den = shifted_interval(denom, shift);
    num.checked_div(den).unwrap_or(Interval::ENTIRE)
}

impl ToInterval for BigRational {
    #[inline]
    fn to_interval(&self) -> Interval {
        ratio_interval(self.numer(), self.denom())
    }
}

impl ToExact<BigRational> for BigRational {
    #[inline]
    fn to_exact(&self) -> FilterResult<BigRational> {
        Ok(self.clone())
    }
}

impl ToInterval for Ratio<i64> {
    #[inline]
    fn to_interval(&self) -> Interval {
        let num = Interval::from_i128(i128::from(*self.numer()));
        let den = Interval::from_i128(i128::from(*self.denom()));
        num.checked_div(den).unwrap_or(Interval::ENTIRE)
    }
}

impl ToExact<BigRational> for Ratio<i64> {
    #[inline]
    fn to_exact(&self) -> FilterResult<BigRational> {
        if self.denom().is_zero() {
            return Err(FilterError::NonFinite);
        }
        Ok(BigRational::new(
            BigInt::from(*self.numer()),
            BigInt::from(*self.denom()),
        ))
    }
}

impl<T> FromRatio<T> for Ratio<T>
where
    T: Clone + Integer,
{
    #[inline]
    fn from_ratio(num: T, den: T) -> FilterResult<Self> {
        if den.is_zero() {
            return Err(FilterError::DivisionByZero);
        }
        Ok(Ratio::new(num, den))
    }
}

impl FromRatio<i64> for BigRational {
    #[inline]
    fn from_ratio(num: i64, den: i64) -> FilterResult<Self> {
        BigRational::from_ratio(BigInt::from(num), BigInt::from(den))
    }
}

impl<T> NumberValidity for Ratio<T>
where
    T: Clone + Integer,
{
    #[inline]
    fn is_valid(&self) -> bool {
        !self.denom().is_zero()
    }

    #[inline]
    fn is_finite(&self) -> bool {
        !self.denom().is_zero()
    }
}
