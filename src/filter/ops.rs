// ============================================================================
// Filtered Arithmetic
// Operators forwarded to the construction type
// ============================================================================
//
// Every operator combines construction values and builds a fresh filtered
// value from the result, so the cached interval (if any) is recomputed from
// the new value instead of being propagated through interval arithmetic.
// Compound assignments mutate the value in place and then refresh the cache.

use super::cache::CachePolicy;
use super::filtered::Filtered;
use crate::conversions::ToInterval;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<CT, ET, C> $Op for Filtered<CT, ET, C>
        where
            CT: ToInterval + $Op<Output = CT>,
            C: CachePolicy,
        {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self::Output {
                Filtered::new($Op::$op(self.into_value(), rhs.into_value()))
            }
        }

        impl<'a, CT, ET, C> $Op<&'a Filtered<CT, ET, C>> for &'a Filtered<CT, ET, C>
        where
            CT: ToInterval,
            &'a CT: $Op<&'a CT, Output = CT>,
            C: CachePolicy,
        {
            type Output = Filtered<CT, ET, C>;

            #[inline]
            fn $op(self, rhs: &'a Filtered<CT, ET, C>) -> Self::Output {
                Filtered::new($Op::$op(self.value(), rhs.value()))
            }
        }

        impl<CT, ET, C> $OpAssign for Filtered<CT, ET, C>
        where
            CT: ToInterval + $OpAssign,
            C: CachePolicy,
        {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                self.update(|value| $OpAssign::$op_assign(value, rhs.into_value()));
            }
        }

        impl<'a, CT, ET, C> $OpAssign<&'a Filtered<CT, ET, C>> for Filtered<CT, ET, C>
        where
            CT: ToInterval + $OpAssign<&'a CT>,
            C: CachePolicy,
        {
            #[inline]
            fn $op_assign(&mut self, rhs: &'a Filtered<CT, ET, C>) {
                self.update(|value| $OpAssign::$op_assign(value, rhs.value()));
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

impl<CT, ET, C> Neg for Filtered<CT, ET, C>
where
    CT: ToInterval + Neg<Output = CT>,
    C: CachePolicy,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Filtered::new(-self.into_value())
    }
}

impl<'a, CT, ET, C> Neg for &'a Filtered<CT, ET, C>
where
    CT: ToInterval,
    &'a CT: Neg<Output = CT>,
    C: CachePolicy,
{
    type Output = Filtered<CT, ET, C>;

    #[inline]
    fn neg(self) -> Self::Output {
        Filtered::new(-self.value())
    }
}
