// ============================================================================
// Primitive Construction Types
// f64 and i64
// ============================================================================

use super::{NumberValidity, ToExact, ToInterval};
use crate::interval::Interval;
use crate::numeric::{FilterError, FilterResult};
use num_bigint::BigInt;
use num_rational::BigRational;

impl ToInterval for f64 {
    #[inline]
    fn to_interval(&self) -> Interval {
        Interval::point(*self)
    }
}

impl ToExact<BigRational> for f64 {
    #[inline]
    fn to_exact(&self) -> FilterResult<BigRational> {
        BigRational::from_float(*self).ok_or(FilterError::NonFinite)
    }
}

impl NumberValidity for f64 {
    #[inline]
    fn is_valid(&self) -> bool {
        !self.is_nan()
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl ToInterval for i64 {
    #[inline]
    fn to_interval(&self) -> Interval {
        Interval::from_i128(i128::from(*self))
    }
}

impl ToExact<BigRational> for i64 {
    #[inline]
    fn to_exact(&self) -> FilterResult<BigRational> {
        Ok(BigRational::from_integer(BigInt::from(*self)))
    }
}

impl NumberValidity for i64 {
    #[inline]
    fn is_valid(&self) -> bool {
        true
    }

    #[inline]
    fn is_finite(&self) -> bool {
        true
    }
}
