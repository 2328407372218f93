// ============================================================================
// Conversions Module
// Capabilities a construction type needs to take part in filtering
// ============================================================================
//
// A construction type must provide two conversions:
// - ToInterval: an interval SURELY containing the value
// - ToExact<ET>: the value converted EXACTLY to the exact type
//
// Implementations are provided for f64, i64, rust_decimal::Decimal,
// Ratio<i64> and BigRational, all with BigRational as the exact type.

mod decimal;
mod primitive;
mod rational;

use crate::interval::Interval;
use crate::numeric::FilterResult;

/// Sound conversion to an [`Interval`].
///
/// The returned interval must contain the real value denoted by `self`,
/// whatever rounding the conversion involves.
pub trait ToInterval {
    fn to_interval(&self) -> Interval;
}

/// Lossless conversion to the exact type `ET`.
pub trait ToExact<ET> {
    /// Convert exactly.
    ///
    /// # Errors
    /// Returns `NonFinite` when the value denotes no real number (NaN or an
    /// infinity). Types without such states never fail.
    fn to_exact(&self) -> FilterResult<ET>;
}

/// Construction from a numerator/denominator pair, for rational-style types.
pub trait FromRatio<N>: Sized {
    /// # Errors
    /// Returns `DivisionByZero` if `den` is zero.
    fn from_ratio(num: N, den: N) -> FilterResult<Self>;
}

/// Validity queries for construction types that admit non-finite states.
pub trait NumberValidity {
    /// False for states that are not numbers at all (NaN).
    fn is_valid(&self) -> bool;

    /// False for NaN and infinities.
    fn is_finite(&self) -> bool;
}
