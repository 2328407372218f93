// ============================================================================
// Filter Errors
// Domain errors raised by interval arithmetic and filtered operations
// ============================================================================

use std::fmt;

/// Errors that can occur during interval or filtered arithmetic.
///
/// An inconclusive filter is never an error: it is resolved locally through
/// the exact path. Only genuine domain violations surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterError {
    /// Interval divisor contains zero
    ZeroStraddlingDivisor,
    /// Interval radicand has a negative lower bound
    NegativeRadicand,
    /// Exact divisor (or ratio denominator) is zero
    DivisionByZero,
    /// Interval bounds are reversed or NaN
    InvalidInterval,
    /// Value is NaN or infinite and has no exact representation
    NonFinite,
}

impl FilterError {
    /// Returns true for operand errors (division and square root domains).
    ///
    /// These indicate that the exact fallback would also be asked to
    /// evaluate outside its domain.
    #[inline]
    pub const fn is_invalid_operand(self) -> bool {
        matches!(
            self,
            FilterError::ZeroStraddlingDivisor
                | FilterError::NegativeRadicand
                | FilterError::DivisionByZero
        )
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::ZeroStraddlingDivisor => {
                write!(f, "invalid operand: divisor interval contains zero")
            },
            FilterError::NegativeRadicand => write!(
                f,
                "invalid operand: square root of a value with a negative lower bound"
            ),
            FilterError::DivisionByZero => write!(f, "division by zero"),
            FilterError::InvalidInterval => {
                write!(f, "invalid interval: bounds are reversed or NaN")
            },
            FilterError::NonFinite => {
                write!(f, "non-finite value has no exact representation")
            },
        }
    }
}

impl std::error::Error for FilterError {}

/// Result type alias for filtered operations
pub type FilterResult<T> = Result<T, FilterError>;
