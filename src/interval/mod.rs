// ============================================================================
// Interval Module
// Bounded interval engine used as the cheap tier of the filter
// ============================================================================
//
// This module provides:
// - Interval: Sound [lo, hi] enclosure with outward-rounded arithmetic
// - RoundingGuard: Scoped per-thread outward rounding context
//
// Every bound computation happens inside a RoundingGuard, so the thread's
// rounding mode is always restored when an operation returns.

mod bounds;
mod rounding;

pub use bounds::Interval;
pub use rounding::{current_mode, RoundingGuard, RoundingMode};
