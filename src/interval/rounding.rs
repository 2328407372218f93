// ============================================================================
// Rounding Context
// Scoped, per-thread directed rounding for interval bound computation
// ============================================================================
//
// Safe Rust cannot switch the FPU into upward or downward rounding: the
// optimizer assumes round-to-nearest everywhere. Directed rounding is
// therefore emulated. Every primitive computes the round-to-nearest result,
// recovers the sign of its rounding error with an error-free transformation
// (TwoSum for addition, an FMA residual for the rest) and steps one ulp
// outward only in the direction the true result actually lies.
//
// When the residual cannot be trusted (overflow, results near the subnormal
// range) the bound is widened by one ulp on both sides instead.

use std::cell::Cell;
use std::marker::PhantomData;

/// Rounding mode in effect for the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// IEEE default: round to nearest, ties to even
    ToNearest,
    /// Lower bounds round toward -inf, upper bounds toward +inf
    Outward,
}

thread_local! {
    static MODE: Cell<RoundingMode> = const { Cell::new(RoundingMode::ToNearest) };
}

/// FMA residuals of results smaller than this may be lost to underflow.
const RESIDUAL_FLOOR: f64 = f64::MIN_POSITIVE * 18_014_398_509_481_984.0; // 2^54

/// Returns the rounding mode in effect for the calling thread.
#[inline]
pub fn current_mode() -> RoundingMode {
    MODE.with(Cell::get)
}

/// Scoped acquisition of outward rounding.
///
/// The previous mode is restored when the guard is dropped, including during
/// unwinding. Guards nest, and each one restores what it replaced. The guard
/// is neither `Send` nor `Sync`: the rounding context belongs to one thread.
///
/// All directed primitives are methods on the guard, so bound arithmetic
/// cannot be performed outside an outward-rounding scope.
#[derive(Debug)]
pub struct RoundingGuard {
    previous: RoundingMode,
    _thread_bound: PhantomData<*const ()>,
}

impl RoundingGuard {
    /// Switch the current thread to outward rounding.
    #[inline]
    pub fn outward() -> Self {
        let previous = MODE.with(|mode| mode.replace(RoundingMode::Outward));
        Self {
            previous,
            _thread_bound: PhantomData,
        }
    }

    /// Mode that will be restored when this guard is dropped.
    #[inline]
    pub fn previous(&self) -> RoundingMode {
        self.previous
    }

    // ========================================================================
    // Directed Primitives
    // ========================================================================

    #[inline]
    pub fn add_down(&self, a: f64, b: f64) -> f64 {
        let (sum, residual) = two_sum(a, b);
        lower(sum, residual)
    }

    #[inline]
    pub fn add_up(&self, a: f64, b: f64) -> f64 {
        let (sum, residual) = two_sum(a, b);
        upper(sum, residual)
    }

    #[inline]
    pub fn sub_down(&self, a: f64, b: f64) -> f64 {
        self.add_down(a, -b)
    }

    #[inline]
    pub fn sub_up(&self, a: f64, b: f64) -> f64 {
        self.add_up(a, -b)
    }

    #[inline]
    pub fn mul_down(&self, a: f64, b: f64) -> f64 {
        let (product, residual) = two_product(a, b);
        lower(product, residual)
    }

    #[inline]
    pub fn mul_up(&self, a: f64, b: f64) -> f64 {
        let (product, residual) = two_product(a, b);
        upper(product, residual)
    }

    /// Lower bound of `a / b`. `b` must be non-zero.
    #[inline]
    pub fn div_down(&self, a: f64, b: f64) -> f64 {
        let (quotient, residual) = quotient_residual(a, b);
        lower(quotient, residual)
    }

    /// Upper bound of `a / b`. `b` must be non-zero.
    #[inline]
    pub fn div_up(&self, a: f64, b: f64) -> f64 {
        let (quotient, residual) = quotient_residual(a, b);
        upper(quotient, residual)
    }

    /// Lower bound of `sqrt(a)`. `a` must be non-negative.
    #[inline]
    pub fn sqrt_down(&self, a: f64) -> f64 {
        let (root, residual) = root_residual(a);
        lower(root, residual).max(0.0)
    }

    /// Upper bound of `sqrt(a)`. `a` must be non-negative.
    #[inline]
    pub fn sqrt_up(&self, a: f64) -> f64 {
        let (root, residual) = root_residual(a);
        upper(root, residual)
    }
}

impl Drop for RoundingGuard {
    fn drop(&mut self) {
        MODE.with(|mode| mode.set(self.previous));
    }
}

// ============================================================================
// Error-Free Transformations
// ============================================================================
//
// Each helper returns the round-to-nearest result together with a residual
// whose sign is the sign of (true result - rounded result). A NaN residual
// means the sign is unknown.

/// Lower bound given the nearest result and the residual sign.
#[inline]
fn lower(approx: f64, residual: f64) -> f64 {
    if approx.is_nan() {
        f64::NEG_INFINITY
    } else if residual.is_nan() || residual < 0.0 {
        approx.next_down()
    } else {
        approx
    }
}

/// Upper bound given the nearest result and the residual sign.
#[inline]
fn upper(approx: f64, residual: f64) -> f64 {
    if approx.is_nan() {
        f64::INFINITY
    } else if residual.is_nan() || residual > 0.0 {
        approx.next_up()
    } else {
        approx
    }
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    if !sum.is_finite() {
        // Overflow of finite operands is inexact; infinite operands are exact.
        let residual = if a.is_finite() && b.is_finite() {
            f64::NAN
        } else {
            0.0
        };
        return (sum, residual);
    }
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let residual = (a - a_virtual) + (b - b_virtual);
    (sum, residual)
}

#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    if a == 0.0 || b == 0.0 {
        return (0.0, 0.0);
    }
    let product = a * b;
    if !product.is_finite() {
        let residual = if a.is_finite() && b.is_finite() {
            f64::NAN
        } else {
            0.0
        };
        return (product, residual);
    }
    if product.abs() < RESIDUAL_FLOOR {
        return (product, f64::NAN);
    }
    (product, a.mul_add(b, -product))
}

#[inline]
fn quotient_residual(a: f64, b: f64) -> (f64, f64) {
    if a == 0.0 && b != 0.0 {
        return (0.0, 0.0);
    }
    let quotient = a / b;
    if !a.is_finite() || !b.is_finite() {
        // inf / finite and finite / inf are exact limits
        return (quotient, 0.0);
    }
    if !quotient.is_finite() || quotient.abs() < RESIDUAL_FLOOR || a.abs() < RESIDUAL_FLOOR {
        return (quotient, f64::NAN);
    }
    // a - q*b is exact; a/b - q has the sign of (a - q*b) / b.
    let remainder = (-quotient).mul_add(b, a);
    let residual = if b > 0.0 { remainder } else { -remainder };
    (quotient, residual)
}

#[inline]
fn root_residual(a: f64) -> (f64, f64) {
    let root = a.sqrt();
    if a == 0.0 || a.is_infinite() {
        return (root, 0.0);
    }
    if a < RESIDUAL_FLOOR {
        return (root, f64::NAN);
    }
    (root, (-root).mul_add(root, a))
}
