//! Register traits.
//!
//! [`SimdRegister`] is the operation set every register offers, whatever its
//! width or element kind. It is implemented once for hardware-width registers
//! ([`Native`](crate::simd::Native)) and once, generically, for lane pairs
//! ([`Composite`](crate::simd::Composite)); the per-width aliases in
//! [`types`](crate::simd::types) pick between the two at compile time.
//!
//! Arithmetic on integer elements wraps. Float arithmetic follows IEEE 754,
//! `min`/`max` follow the x86 operand convention (`if a < b { a } else { b }`)
//! and `mul_add` is fused.

use std::fmt::Debug;

use num::traits::AsPrimitive;

use crate::simd::{
    capability::Width,
    element::{scratch, Element},
    math::MathOp,
};

/// Fixed-width vector register.
///
/// Element `0` is the lowest-indexed element: the first element of a
/// [`load`](SimdRegister::load)ed slice, the first argument of
/// [`set`](SimdRegister::set) and bit `0` of a BitMask.
pub trait SimdRegister: Copy + Debug + Send + Sync + 'static {
    /// Element type.
    type Elem: Element;

    /// Number of elements.
    const LANES: usize;

    /// Total width of the register.
    const WIDTH: Width;

    /// Whether this representation is hardware-backed or lane-decomposed.
    const NATIVE: bool;

    // ============================================================================
    // Construction
    // ============================================================================

    /// All bits clear.
    fn zero() -> Self;

    /// Every element set to `value`.
    fn splat(value: Self::Elem) -> Self;

    /// One value per element: `values[i]` becomes element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != Self::LANES`.
    fn set(values: &[Self::Elem]) -> Self;

    /// One value per element in reverse order: `values[i]` becomes element
    /// `LANES - 1 - i`, so `setr(e)` equals `set` of `e` reversed.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != Self::LANES`.
    fn setr(values: &[Self::Elem]) -> Self;

    /// Mask register from a runtime BitMask: element `i` has all bits set
    /// when bit `i` of `mask` is set, all bits clear otherwise. Bits at or
    /// above `LANES` are ignored.
    fn set_masked(mask: u64) -> Self;

    /// Mask register from a compile-time BitMask.
    ///
    /// A `MASK` with bits at or above `LANES` is rejected at compile time.
    /// A zero `MASK` yields [`zero`](SimdRegister::zero) directly.
    ///
    /// ```
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// assert_eq!(I32x4::set_masked_const::<0b1010>().move_mask(), 0b1010);
    /// ```
    ///
    /// Bit 4 does not exist on a four-element register:
    ///
    /// ```compile_fail
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// let _ = I32x4::set_masked_const::<0x10>();
    /// ```
    #[inline(always)]
    fn set_masked_const<const MASK: u64>() -> Self {
        const {
            assert!(
                Self::LANES >= 64 || MASK >> Self::LANES == 0,
                "BitMask has bits set beyond the register's element count"
            )
        };

        if MASK == 0 {
            Self::zero()
        } else {
            Self::set_masked(MASK)
        }
    }

    /// Loads `LANES` elements from the front of `values`.
    ///
    /// A shorter slice is loaded partially and the missing elements are zero.
    fn load(values: &[Self::Elem]) -> Self;

    /// Stores the elements to the front of `out`.
    ///
    /// A shorter slice receives only the leading elements that fit.
    fn store(self, out: &mut [Self::Elem]);

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Self::LANES`.
    fn extract(self, index: usize) -> Self::Elem;

    /// Element at a compile-time `INDEX`, rejected at compile time when out of range.
    ///
    /// ```
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// assert_eq!(I32x4::set(&[1, 2, 3, 4]).extract_const::<3>(), 4);
    /// ```
    ///
    /// ```compile_fail
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// let _ = I32x4::set(&[1, 2, 3, 4]).extract_const::<4>();
    /// ```
    #[inline(always)]
    fn extract_const<const INDEX: usize>(self) -> Self::Elem {
        const {
            assert!(
                INDEX < Self::LANES,
                "element index out of range for this register"
            )
        };
        self.extract(INDEX)
    }

    /// Copy of `self` with element `index` replaced by `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Self::LANES`.
    fn insert(self, index: usize, value: Self::Elem) -> Self;

    /// [`insert`](SimdRegister::insert) at a compile-time `INDEX`, rejected at
    /// compile time when out of range.
    ///
    /// ```
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// assert_eq!(I32x4::zero().insert_const::<0>(9).extract(0), 9);
    /// ```
    ///
    /// ```compile_fail
    /// use simdreg::simd::{I32x4, SimdRegister};
    ///
    /// let _ = I32x4::zero().insert_const::<4>(9);
    /// ```
    #[inline(always)]
    fn insert_const<const INDEX: usize>(self, value: Self::Elem) -> Self {
        const {
            assert!(
                INDEX < Self::LANES,
                "element index out of range for this register"
            )
        };
        self.insert(INDEX, value)
    }

    /// Elements in index order.
    fn to_vec(self) -> Vec<Self::Elem> {
        let mut out = vec![Self::Elem::ZERO; Self::LANES];
        self.store(&mut out);
        out
    }

    // ============================================================================
    // Arithmetic
    // ============================================================================

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn neg(self) -> Self;
    fn abs(self) -> Self;
    fn min(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;

    /// `self * b + c`.
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// `self * b - c`.
    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c.neg())
    }

    /// `c - self * b`.
    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        self.neg().mul_add(b, c)
    }

    // ============================================================================
    // Bitwise
    // ============================================================================

    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`, the x86 `andnot` operand order.
    fn and_not(self, rhs: Self) -> Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.xor(Self::set_masked(u64::MAX))
    }

    // ============================================================================
    // Comparison and selection
    // ============================================================================

    /// Mask register: all bits set where the comparison holds.
    fn cmp_eq(self, rhs: Self) -> Self;
    fn cmp_lt(self, rhs: Self) -> Self;
    fn cmp_le(self, rhs: Self) -> Self;

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        self.cmp_eq(rhs).not()
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        rhs.cmp_lt(self)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        rhs.cmp_le(self)
    }

    /// Element `i` of `other` where the most significant bit of `mask[i]`
    /// is set, element `i` of `self` otherwise.
    fn blend(self, other: Self, mask: Self) -> Self;

    /// Activity BitMask: bit `i` is the most significant bit of element `i`.
    fn move_mask(self) -> u64;

    // ============================================================================
    // Horizontal reduction
    // ============================================================================

    /// Minimum over all elements.
    fn reduce_min(self) -> Self::Elem;

    /// Maximum over all elements.
    fn reduce_max(self) -> Self::Elem;

    /// Sum over all elements, accumulated as a halving tree: element `i` is
    /// first combined with element `i + LANES / 2`.
    fn reduce_sum(self) -> Self::Elem;

    /// Every element set to the minimum over all elements.
    #[inline(always)]
    fn hmin(self) -> Self {
        Self::splat(self.reduce_min())
    }

    /// Every element set to the maximum over all elements.
    #[inline(always)]
    fn hmax(self) -> Self {
        Self::splat(self.reduce_max())
    }

    /// Minimum over all elements, converted to `U`.
    #[inline(always)]
    fn reduce_min_as<U>(self) -> U
    where
        U: Element,
        Self::Elem: AsPrimitive<U>,
    {
        self.reduce_min().as_()
    }

    /// Maximum over all elements, converted to `U`.
    #[inline(always)]
    fn reduce_max_as<U>(self) -> U
    where
        U: Element,
        Self::Elem: AsPrimitive<U>,
    {
        self.reduce_max().as_()
    }

    // ============================================================================
    // Conversion
    // ============================================================================

    /// Value-preserving conversion into another register.
    ///
    /// Element `i` of the result is element `i` of `self` converted with `as`
    /// semantics (float to integer truncates toward zero and saturates) for
    /// `i < min(Self::LANES, D::LANES)`; any further elements are zero.
    fn convert<D>(self) -> D
    where
        D: SimdRegister,
        Self::Elem: AsPrimitive<D::Elem>,
    {
        let mut src = scratch::<Self::Elem>();
        self.store(&mut src[..Self::LANES]);

        let mut dst = scratch::<D::Elem>();
        let count = Self::LANES.min(D::LANES);
        for (out, value) in dst[..count].iter_mut().zip(&src[..count]) {
            *out = value.as_();
        }

        D::load(&dst[..D::LANES])
    }
}

/// Shifts on integer registers.
pub trait SimdInt: SimdRegister {
    /// Shift every element left by `SHIFT` bits.
    ///
    /// `SHIFT` must be smaller than the element width; larger counts are
    /// rejected at compile time.
    ///
    /// ```
    /// use simdreg::simd::{I32x4, SimdInt, SimdRegister};
    ///
    /// assert_eq!(I32x4::splat(1).shl::<31>().extract(0), i32::MIN);
    /// ```
    ///
    /// ```compile_fail
    /// use simdreg::simd::{I32x4, SimdInt, SimdRegister};
    ///
    /// let _ = I32x4::splat(1).shl::<32>();
    /// ```
    fn shl<const SHIFT: u32>(self) -> Self;

    /// Shift every element right by `SHIFT` bits, arithmetic for signed
    /// elements and logical for unsigned ones.
    ///
    /// ```compile_fail
    /// use simdreg::simd::{SimdInt, SimdRegister, U8x16};
    ///
    /// let _ = U8x16::splat(1).shr::<8>();
    /// ```
    fn shr<const SHIFT: u32>(self) -> Self;
}

/// Operations specific to float registers.
pub trait SimdFloat: SimdRegister {
    fn div(self, rhs: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;

    /// Round half away from zero.
    fn round(self) -> Self;

    /// `1 / self`, exact division (not a hardware estimate).
    #[inline(always)]
    fn recip(self) -> Self {
        Self::splat(Self::Elem::ONE).div(self)
    }
}

/// Elementwise transcendental functions.
///
/// Available on every register. Integer registers compute through a float
/// register and truncate the result back, see [`fallback`](crate::simd::fallback).
pub trait SimdMath: SimdRegister {
    /// Applies `op` to every element.
    fn math(self, op: MathOp) -> Self;

    #[inline(always)]
    fn sin(self) -> Self {
        self.math(MathOp::Sin)
    }

    #[inline(always)]
    fn cos(self) -> Self {
        self.math(MathOp::Cos)
    }

    #[inline(always)]
    fn tan(self) -> Self {
        self.math(MathOp::Tan)
    }

    #[inline(always)]
    fn asin(self) -> Self {
        self.math(MathOp::Asin)
    }

    #[inline(always)]
    fn acos(self) -> Self {
        self.math(MathOp::Acos)
    }

    #[inline(always)]
    fn atan(self) -> Self {
        self.math(MathOp::Atan)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.math(MathOp::Sqrt)
    }

    #[inline(always)]
    fn cbrt(self) -> Self {
        self.math(MathOp::Cbrt)
    }

    #[inline(always)]
    fn exp(self) -> Self {
        self.math(MathOp::Exp)
    }

    #[inline(always)]
    fn ln(self) -> Self {
        self.math(MathOp::Ln)
    }
}

/// Bit-pattern-preserving reinterpretation between registers of equal total width.
pub trait Cast<D: SimdRegister>: SimdRegister {
    fn cast(self) -> D;
}

/// Reinterpretation into a register twice as wide: `self` becomes the lower
/// half (`lane_0`) and the upper half is zero.
pub trait Widen<D: SimdRegister>: SimdRegister {
    fn widen(self) -> D;
}

/// Reinterpretation into a register half as wide: the lower half (`lane_0`)
/// is kept and the upper half is discarded.
pub trait Narrow<D: SimdRegister>: SimdRegister {
    fn narrow(self) -> D;
}

/// Operator overloads forwarding to [`SimdRegister`].
macro_rules! register_ops {
    (impl[$($g:tt)*] $ty:ty where [$($w:tt)*]) => {
        impl<$($g)*> core::ops::Add for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::add(self, rhs)
            }
        }

        impl<$($g)*> core::ops::Sub for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::sub(self, rhs)
            }
        }

        impl<$($g)*> core::ops::Mul for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::mul(self, rhs)
            }
        }

        impl<$($g)*> core::ops::Neg for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                $crate::simd::traits::SimdRegister::neg(self)
            }
        }

        impl<$($g)*> core::ops::BitAnd for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::and(self, rhs)
            }
        }

        impl<$($g)*> core::ops::BitOr for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::or(self, rhs)
            }
        }

        impl<$($g)*> core::ops::BitXor for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdRegister::xor(self, rhs)
            }
        }

        impl<$($g)*> core::ops::Not for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                $crate::simd::traits::SimdRegister::not(self)
            }
        }
    };
}

/// Division operator for float registers, forwarding to [`SimdFloat::div`].
macro_rules! float_register_ops {
    (impl[$($g:tt)*] $ty:ty where [$($w:tt)*]) => {
        impl<$($g)*> core::ops::Div for $ty where $($w)* {
            type Output = Self;

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                $crate::simd::traits::SimdFloat::div(self, rhs)
            }
        }
    };
}

pub(crate) use float_register_ops;
pub(crate) use register_ops;
