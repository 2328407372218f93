// ============================================================================
// Numeric Module
// Shared vocabulary for the interval and exact tiers
// ============================================================================
//
// This module provides:
// - FilterError: Domain errors for interval and filtered arithmetic
// - Sign: Three-valued sign returned by filtered predicates

mod errors;
mod sign;

pub use errors::{FilterError, FilterResult};
pub use sign::Sign;
