// ============================================================================
// Filtered Exact Library
// Interval-filtered numbers with exact fallback for robust predicates
// ============================================================================

//! # Filtered Exact
//!
//! A number wrapper that lets geometric predicates run on cheap floating-point
//! intervals in the common case, and still return bit-exact answers by falling
//! back to arbitrary-precision rationals when the intervals cannot decide.
//!
//! ## Features
//!
//! - **Sound interval engine** with scoped, per-thread outward rounding
//! - **Exact fallback** through `num_rational::BigRational`
//! - **Compile-time cache policy**: recompute the interval (`NoCache`) or
//!   store it and refresh on mutation (`Cached`)
//! - **Two-tier predicates** (`sign`, `compare`) that report which tier
//!   decided them, plus per-thread filter statistics
//!
//! ## Example
//!
//! ```rust
//! use filtered_exact::prelude::*;
//!
//! // Orientation of three points: sign of a 2x2 determinant
//! let p = |x: f64, y: f64| (FilteredF64::<Cached>::new(x), FilteredF64::<Cached>::new(y));
//! let (ax, ay) = p(0.5, 0.5);
//! let (bx, by) = p(12.0, 12.0);
//! let (cx, cy) = p(24.0, 24.0);
//!
//! let det = (&bx - &ax) * (&cy - &ay) - (&by - &ay) * (&cx - &ax);
//! let orientation = sign_resolved(&det);
//!
//! // The points are collinear; intervals cannot prove a zero, so the exact
//! // path decides.
//! assert_eq!(orientation.value, Sign::Zero);
//! assert_eq!(orientation.resolution, Resolution::Exact);
//! ```

pub mod conversions;
pub mod filter;
pub mod interval;
#[cfg(feature = "logging")]
pub mod logging;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::conversions::{FromRatio, NumberValidity, ToExact, ToInterval};
    pub use crate::filter::{
        abs, compare, compare_resolved, is_finite, is_valid, max, min, resolve, sign,
        sign_resolved, sqrt, square, to_f64, try_compare, try_compare_resolved, try_resolve,
        try_sign, try_sign_resolved, CachePolicy, Cached, FilterStats, Filtered, FilteredDecimal,
        FilteredF64, FilteredRational, NoCache, Resolution, Resolved,
    };
    pub use crate::interval::{Interval, RoundingGuard, RoundingMode};
    pub use crate::numeric::{FilterError, FilterResult, Sign};
}
