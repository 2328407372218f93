// ============================================================================
// Filter Module
// The filtered number type, its cache policies and predicate dispatch
// ============================================================================
//
// This module provides:
// - Filtered<CT, ET, C>: Construction value with interval filter and exact fallback
// - NoCache / Cached: Compile-time cache policies
// - sign, compare, ...: Two-tier predicates and forwarded free functions
// - FilterStats: Per-thread counts of interval hits and exact fallbacks

mod cache;
mod dispatch;
mod filtered;
mod ops;
pub mod stats;

pub use cache::{CachePolicy, Cached, NoCache};
pub use dispatch::{
    abs, compare, compare_resolved, is_finite, is_valid, max, min, resolve, sign, sign_resolved,
    sqrt, square, to_f64, try_compare, try_compare_resolved, try_resolve, try_sign,
    try_sign_resolved, Resolution, Resolved,
};
pub use filtered::{Filtered, FilteredDecimal, FilteredF64, FilteredRational};
pub use stats::FilterStats;
