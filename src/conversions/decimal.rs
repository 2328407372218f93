// ============================================================================
// Decimal Construction Type
// rust_decimal::Decimal, i.e. a 96-bit mantissa over a power of ten
// ============================================================================

use super::{NumberValidity, ToExact, ToInterval};
use crate::interval::Interval;
use crate::numeric::FilterResult;
use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::Decimal;

impl ToInterval for Decimal {
    #[inline]
    fn to_interval(&self) -> Interval {
        let mantissa = Interval::from_i128(self.mantissa());
        if self.scale() == 0 {
            return mantissa;
        }
        // scale <= 28, so 10^scale fits an i128
        let divisor = Interval::from_i128(10i128.pow(self.scale()));
        mantissa.checked_div(divisor).unwrap_or(Interval::ENTIRE)
    }
}

impl ToExact<BigRational> for Decimal {
    #[inline]
    fn to_exact(&self) -> FilterResult<BigRational> {
        let denom = num_traits::pow(BigInt::from(10), self.scale() as usize);
        Ok(BigRational::new(BigInt::from(self.mantissa()), denom))
    }
}

impl NumberValidity for Decimal {
    #[inline]
    fn is_valid(&self) -> bool {
        true
    }

    #[inline]
    fn is_finite(&self) -> bool {
        true
    }
}
