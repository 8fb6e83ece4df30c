//! Lane combinator.
//!
//! Every elementwise operation on a [`Composite`] register has the same
//! shape: split each operand into its two lanes, run the lane-width version
//! of the operation on `lane_0`s and on `lane_1`s, and pair the results. The
//! functions here are that shape for one, two and three operands. They do no
//! arithmetic; the closure does, and it is either a native operation or
//! another composite operation that recurses through here again.
//!
//! The output lane type may differ from the input lane type, which is how
//! lanewise casts reuse the same code.

use crate::simd::{composite::Composite, traits::SimdRegister};

/// Applies `f` to each lane of `a`.
#[inline(always)]
pub fn lanewise1<L, M, F>(a: Composite<L>, f: F) -> Composite<M>
where
    L: SimdRegister,
    M: SimdRegister,
    F: Fn(L) -> M,
{
    let (a0, a1) = a.into_lanes();
    Composite::from_lanes(f(a0), f(a1))
}

/// Applies `f` to the matching lanes of `a` and `b`.
#[inline(always)]
pub fn lanewise2<L, M, F>(a: Composite<L>, b: Composite<L>, f: F) -> Composite<M>
where
    L: SimdRegister,
    M: SimdRegister,
    F: Fn(L, L) -> M,
{
    let (a0, a1) = a.into_lanes();
    let (b0, b1) = b.into_lanes();
    Composite::from_lanes(f(a0, b0), f(a1, b1))
}

/// Applies `f` to the matching lanes of `a`, `b` and `c`.
#[inline(always)]
pub fn lanewise3<L, M, F>(a: Composite<L>, b: Composite<L>, c: Composite<L>, f: F) -> Composite<M>
where
    L: SimdRegister,
    M: SimdRegister,
    F: Fn(L, L, L) -> M,
{
    let (a0, a1) = a.into_lanes();
    let (b0, b1) = b.into_lanes();
    let (c0, c1) = c.into_lanes();
    Composite::from_lanes(f(a0, b0, c0), f(a1, b1, c1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::native::Native;

    type I32x4 = Native<i32, 4>;

    #[test]
    fn test_lane_order_is_preserved() {
        let a = Composite::from_lanes(I32x4::splat(1), I32x4::splat(2));
        let b = Composite::from_lanes(I32x4::splat(10), I32x4::splat(20));

        let sum = lanewise2(a, b, |x, y| SimdRegister::add(x, y));
        assert_eq!(sum.lane_0(), I32x4::splat(11));
        assert_eq!(sum.lane_1(), I32x4::splat(22));
    }

    #[test]
    fn test_output_lane_type_can_differ() {
        let a = Composite::from_lanes(I32x4::splat(3), I32x4::splat(-3));
        let floats: Composite<Native<f32, 4>> = lanewise1(a, |x| x.convert());
        assert_eq!(floats.lane_0(), Native::splat(3.0));
        assert_eq!(floats.lane_1(), Native::splat(-3.0));
    }

    #[test]
    fn test_ternary() {
        let a = Composite::from_lanes(I32x4::splat(2), I32x4::splat(3));
        let out = lanewise3(a, a, a, |x, y, z| x.mul_add(y, z));
        assert_eq!(out.lane_0(), I32x4::splat(6));
        assert_eq!(out.lane_1(), I32x4::splat(12));
    }
}
