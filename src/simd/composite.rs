//! Lane-decomposed register.
//!
//! A [`Composite`] register stands in for a width the build target has no
//! vector unit for. It is a pair of half-width lanes, `lane_0` holding
//! elements `0 .. n/2` and `lane_1` holding `n/2 .. n`, and every operation
//! is implemented in terms of the same operation on the lanes. A lane may be
//! a composite itself, so a 512-bit register on a 128-bit machine is two
//! levels deep and bottoms out at a hardware-width register such as
//! [`Native`](crate::simd::Native).
//!
//! Results are bit-identical to a native register of the same width: the
//! elementwise operations share the element routines, and the reductions
//! combine the two lanes first, which is the first step of the native
//! halving tree.

use crate::simd::{
    capability::Width,
    combinator::{lanewise1, lanewise2, lanewise3},
    mask,
    math::MathOp,
    traits::{
        float_register_ops, register_ops, Cast, Narrow, SimdFloat, SimdInt, SimdMath,
        SimdRegister, Widen,
    },
};

/// Register made of two lanes of type `L`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Composite<L> {
    lo: L,
    hi: L,
}

const fn double_width(lane: Width) -> Width {
    match lane.double() {
        Some(width) => width,
        None => panic!("composite register wider than 512 bits"),
    }
}

impl<L: SimdRegister> Composite<L> {
    /// Pairs `lane_0` (lower elements) with `lane_1` (upper elements).
    ///
    /// ```
    /// use simdreg::simd::{Composite, Native, SimdRegister, Width};
    ///
    /// let reg = Composite::from_lanes(Native::<i32, 8>::splat(1), Native::splat(2));
    /// assert_eq!(Composite::<Native<i32, 8>>::WIDTH, Width::W512);
    /// assert_eq!(reg.extract(8), 2);
    /// ```
    ///
    /// Two 512-bit lanes would make a 1024-bit register:
    ///
    /// ```compile_fail
    /// use simdreg::simd::{Composite, Native, SimdRegister};
    ///
    /// let _ = Composite::<Native<i32, 16>>::zero();
    /// ```
    #[inline(always)]
    pub fn from_lanes(lane_0: L, lane_1: L) -> Self {
        let _ = const { <Self as SimdRegister>::WIDTH };
        Self {
            lo: lane_0,
            hi: lane_1,
        }
    }

    /// Lower half: elements `0 .. LANES / 2`.
    #[inline(always)]
    pub fn lane_0(self) -> L {
        self.lo
    }

    /// Upper half: elements `LANES / 2 .. LANES`.
    #[inline(always)]
    pub fn lane_1(self) -> L {
        self.hi
    }

    #[inline(always)]
    pub fn into_lanes(self) -> (L, L) {
        (self.lo, self.hi)
    }
}

impl<L: SimdRegister> Default for Composite<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<L: SimdRegister> SimdRegister for Composite<L> {
    type Elem = L::Elem;

    const LANES: usize = 2 * L::LANES;
    const WIDTH: Width = double_width(L::WIDTH);
    const NATIVE: bool = false;

    #[inline(always)]
    fn zero() -> Self {
        Self::from_lanes(L::zero(), L::zero())
    }

    #[inline(always)]
    fn splat(value: L::Elem) -> Self {
        Self::from_lanes(L::splat(value), L::splat(value))
    }

    #[inline(always)]
    fn set(values: &[L::Elem]) -> Self {
        assert_eq!(values.len(), Self::LANES, "set expects one value per element");
        let (low, high) = values.split_at(L::LANES);
        Self::from_lanes(L::set(low), L::set(high))
    }

    /// The reversed list is split the other way round: its second half holds
    /// the lower elements in reverse, and feeds `lane_0`'s own `setr`.
    #[inline(always)]
    fn setr(values: &[L::Elem]) -> Self {
        assert_eq!(values.len(), Self::LANES, "setr expects one value per element");
        let (high, low) = values.split_at(L::LANES);
        Self::from_lanes(L::setr(low), L::setr(high))
    }

    #[inline(always)]
    fn set_masked(bits: u64) -> Self {
        let (low, high) = mask::split(bits, L::LANES);
        Self::from_lanes(L::set_masked(low), L::set_masked(high))
    }

    #[inline(always)]
    fn load(values: &[L::Elem]) -> Self {
        let high = values.get(L::LANES..).unwrap_or(&[]);
        Self::from_lanes(L::load(values), L::load(high))
    }

    #[inline(always)]
    fn store(self, out: &mut [L::Elem]) {
        self.lo.store(out);
        if let Some(high) = out.get_mut(L::LANES..) {
            self.hi.store(high);
        }
    }

    #[inline(always)]
    fn extract(self, index: usize) -> L::Elem {
        assert!(
            index < Self::LANES,
            "element index {index} out of range for {} elements",
            Self::LANES
        );
        if index < L::LANES {
            self.lo.extract(index)
        } else {
            self.hi.extract(index - L::LANES)
        }
    }

    #[inline(always)]
    fn insert(self, index: usize, value: L::Elem) -> Self {
        assert!(
            index < Self::LANES,
            "element index {index} out of range for {} elements",
            Self::LANES
        );
        if index < L::LANES {
            Self::from_lanes(self.lo.insert(index, value), self.hi)
        } else {
            Self::from_lanes(self.lo, self.hi.insert(index - L::LANES, value))
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::sub)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::mul)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        lanewise1(self, L::neg)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        lanewise1(self, L::abs)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::max)
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        lanewise3(self, b, c, L::mul_add)
    }

    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        lanewise3(self, b, c, L::mul_sub)
    }

    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        lanewise3(self, b, c, L::neg_mul_add)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::and)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::or)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::xor)
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::and_not)
    }

    #[inline(always)]
    fn not(self) -> Self {
        lanewise1(self, L::not)
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::cmp_eq)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::cmp_lt)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::cmp_le)
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: Self) -> Self {
        lanewise3(self, other, mask, L::blend)
    }

    #[inline(always)]
    fn move_mask(self) -> u64 {
        self.lo.move_mask() | self.hi.move_mask() << L::LANES
    }

    #[inline(always)]
    fn reduce_min(self) -> L::Elem {
        L::min(self.lo, self.hi).reduce_min()
    }

    #[inline(always)]
    fn reduce_max(self) -> L::Elem {
        L::max(self.lo, self.hi).reduce_max()
    }

    #[inline(always)]
    fn reduce_sum(self) -> L::Elem {
        L::add(self.lo, self.hi).reduce_sum()
    }

    #[inline(always)]
    fn hmin(self) -> Self {
        let lane = L::min(self.lo, self.hi).hmin();
        Self::from_lanes(lane, lane)
    }

    #[inline(always)]
    fn hmax(self) -> Self {
        let lane = L::max(self.lo, self.hi).hmax();
        Self::from_lanes(lane, lane)
    }
}

impl<L: SimdInt> SimdInt for Composite<L> {
    #[inline(always)]
    fn shl<const SHIFT: u32>(self) -> Self {
        lanewise1(self, L::shl::<SHIFT>)
    }

    #[inline(always)]
    fn shr<const SHIFT: u32>(self) -> Self {
        lanewise1(self, L::shr::<SHIFT>)
    }
}

impl<L: SimdFloat> SimdFloat for Composite<L> {
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        lanewise2(self, rhs, L::div)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        lanewise1(self, L::floor)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        lanewise1(self, L::ceil)
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        lanewise1(self, L::trunc)
    }

    #[inline(always)]
    fn round(self) -> Self {
        lanewise1(self, L::round)
    }
}

impl<L: SimdMath> SimdMath for Composite<L> {
    #[inline(always)]
    fn math(self, op: MathOp) -> Self {
        lanewise1(self, |lane| lane.math(op))
    }
}

// ================================================================================================
// REINTERPRETATION
// ================================================================================================

/// Equal-width cast: each lane is cast on its own.
impl<L, M> Cast<Composite<M>> for Composite<L>
where
    L: Cast<M>,
    M: SimdRegister,
{
    #[inline(always)]
    fn cast(self) -> Composite<M> {
        lanewise1(self, <L as Cast<M>>::cast)
    }
}

/// Widening cast: `self` becomes `lane_0` and `lane_1` is zero.
impl<R, M> Widen<Composite<M>> for R
where
    R: Cast<M>,
    M: SimdRegister,
{
    #[inline(always)]
    fn widen(self) -> Composite<M> {
        Composite::from_lanes(self.cast(), M::zero())
    }
}

/// Narrowing cast: `lane_1` is dropped and `lane_0` is reinterpreted.
impl<L, D> Narrow<D> for Composite<L>
where
    L: Cast<D>,
    D: SimdRegister,
{
    #[inline(always)]
    fn narrow(self) -> D {
        self.lo.cast()
    }
}

register_ops!(impl[L: SimdRegister] Composite<L> where [L: SimdRegister]);
float_register_ops!(impl[L: SimdFloat] Composite<L> where [L: SimdFloat]);
