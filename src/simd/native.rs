//! Hardware-width register.
//!
//! [`Native`] holds its elements in a plain array with 16-byte alignment and
//! implements every operation as a fixed-length loop. The compiler
//! vectorizes those loops only up to the target features the crate is built
//! with (SSE2 on a default x86_64 target). The 256-bit `f32` and `i32`
//! registers on AVX2 builds are `avx2::F32x8` and `avx2::I32x8`
//! instead, which call the intrinsics directly.
//!
//! Composite registers decompose until they reach a hardware-width leaf,
//! which is `Native` or one of the AVX2 registers. Its total width (`N * T::BITS`) must be 128, 256 or
//! 512 bits; anything else fails to compile on first use.

use std::array;

use crate::simd::{
    capability::{width_of_bits, Width},
    element::{Element, FloatElement, IntElement},
    math::{MathElement, MathOp},
    traits::{
        float_register_ops, register_ops, Cast, Narrow, SimdFloat, SimdInt, SimdMath,
        SimdRegister, Widen,
    },
};

/// Array-backed register of `N` elements of type `T`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct Native<T: Element, const N: usize> {
    elements: [T; N],
}

impl<T: Element, const N: usize> Native<T, N> {
    /// Builds a register from its elements, element `i` from `elements[i]`.
    ///
    /// ```
    /// use simdreg::simd::{Native, SimdRegister};
    ///
    /// assert_eq!(Native::from_array([1i32, 2, 3, 4]).extract(2), 3);
    /// ```
    ///
    /// Three `i32` elements make 96 bits, which is no register width:
    ///
    /// ```compile_fail
    /// use simdreg::simd::{Native, SimdRegister};
    ///
    /// let _ = Native::from_array([1i32, 2, 3]);
    /// ```
    ///
    /// ```compile_fail
    /// use simdreg::simd::{Native, SimdRegister};
    ///
    /// let _ = Native::<i32, 3>::zero();
    /// ```
    #[inline(always)]
    pub fn from_array(elements: [T; N]) -> Self {
        let _ = const { <Self as SimdRegister>::WIDTH };
        Self { elements }
    }

    /// Elements in index order.
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.elements
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[T; N] {
        &self.elements
    }

    #[inline(always)]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self::from_array(self.elements.map(f))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self::from_array(array::from_fn(|i| f(self.elements[i], rhs.elements[i])))
    }

    #[inline(always)]
    fn zip3(self, b: Self, c: Self, f: impl Fn(T, T, T) -> T) -> Self {
        Self::from_array(array::from_fn(|i| {
            f(self.elements[i], b.elements[i], c.elements[i])
        }))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(T, T) -> bool) -> Self {
        self.zip(rhs, |a, b| T::mask_value(f(a, b)))
    }

    /// Halving-tree reduction: element `i` meets element `i + width / 2`
    /// until one element is left.
    #[inline(always)]
    fn tree_reduce(self, f: impl Fn(T, T) -> T) -> T {
        let mut values = self.elements;
        let mut width = N;
        while width > 1 {
            width /= 2;
            for i in 0..width {
                values[i] = f(values[i], values[i + width]);
            }
        }
        values[0]
    }
}

impl<T: Element, const N: usize> Default for Native<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Native<T, N> {
    fn from(elements: [T; N]) -> Self {
        Self::from_array(elements)
    }
}

impl<T: Element, const N: usize> SimdRegister for Native<T, N> {
    type Elem = T;

    const LANES: usize = N;
    const WIDTH: Width = width_of_bits(N * T::BITS as usize);
    const NATIVE: bool = true;

    #[inline(always)]
    fn zero() -> Self {
        Self::from_array([T::ZERO; N])
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self::from_array([value; N])
    }

    #[inline(always)]
    fn set(values: &[T]) -> Self {
        assert_eq!(values.len(), N, "set expects one value per element");
        Self::from_array(array::from_fn(|i| values[i]))
    }

    #[inline(always)]
    fn setr(values: &[T]) -> Self {
        assert_eq!(values.len(), N, "setr expects one value per element");
        Self::from_array(array::from_fn(|i| values[N - 1 - i]))
    }

    #[inline(always)]
    fn set_masked(mask: u64) -> Self {
        Self::from_array(array::from_fn(|i| T::mask_value((mask >> i) & 1 == 1)))
    }

    #[inline(always)]
    fn load(values: &[T]) -> Self {
        let mut elements = [T::ZERO; N];
        let count = values.len().min(N);
        elements[..count].copy_from_slice(&values[..count]);
        Self::from_array(elements)
    }

    #[inline(always)]
    fn store(self, out: &mut [T]) {
        let count = out.len().min(N);
        out[..count].copy_from_slice(&self.elements[..count]);
    }

    #[inline(always)]
    fn extract(self, index: usize) -> T {
        assert!(index < N, "element index {index} out of range for {N} elements");
        self.elements[index]
    }

    #[inline(always)]
    fn insert(mut self, index: usize, value: T) -> Self {
        assert!(index < N, "element index {index} out of range for {N} elements");
        self.elements[index] = value;
        self
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, T::simd_add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, T::simd_sub)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, T::simd_mul)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(T::simd_neg)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(T::simd_abs)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, T::simd_min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, T::simd_max)
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        self.zip3(b, c, T::simd_mul_add)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| T::from_bits(a.to_bits() & b.to_bits()))
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| T::from_bits(a.to_bits() | b.to_bits()))
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| T::from_bits(a.to_bits() ^ b.to_bits()))
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| T::from_bits(!a.to_bits() & b.to_bits()))
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        self.compare(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: Self) -> Self {
        self.zip3(other, mask, |a, b, m| if m.msb() { b } else { a })
    }

    #[inline(always)]
    fn move_mask(self) -> u64 {
        self.elements
            .iter()
            .enumerate()
            .fold(0u64, |mask, (i, e)| mask | (e.msb() as u64) << i)
    }

    #[inline(always)]
    fn reduce_min(self) -> T {
        self.tree_reduce(T::simd_min)
    }

    #[inline(always)]
    fn reduce_max(self) -> T {
        self.tree_reduce(T::simd_max)
    }

    #[inline(always)]
    fn reduce_sum(self) -> T {
        self.tree_reduce(T::simd_add)
    }
}

impl<T: IntElement, const N: usize> SimdInt for Native<T, N> {
    #[inline(always)]
    fn shl<const SHIFT: u32>(self) -> Self {
        const {
            assert!(
                SHIFT < T::BITS,
                "shift count must be smaller than the element width"
            )
        };
        self.map(|e| e.simd_shl(SHIFT))
    }

    #[inline(always)]
    fn shr<const SHIFT: u32>(self) -> Self {
        const {
            assert!(
                SHIFT < T::BITS,
                "shift count must be smaller than the element width"
            )
        };
        self.map(|e| e.simd_shr(SHIFT))
    }
}

impl<T: FloatElement, const N: usize> SimdFloat for Native<T, N> {
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map(num::traits::Float::floor)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        self.map(num::traits::Float::ceil)
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        self.map(num::traits::Float::trunc)
    }

    #[inline(always)]
    fn round(self) -> Self {
        self.map(num::traits::Float::round)
    }
}

impl<T: MathElement, const N: usize> SimdMath for Native<T, N> {
    #[inline(always)]
    fn math(self, op: MathOp) -> Self {
        let mut elements = self.elements;
        T::math_in_place(op, &mut elements);
        Self::from_array(elements)
    }
}

// ================================================================================================
// REINTERPRETATION
// ================================================================================================

impl<T: Element, const N: usize, U: Element, const M: usize> Cast<Native<U, M>> for Native<T, N> {
    #[inline(always)]
    fn cast(self) -> Native<U, M> {
        const {
            assert!(
                N * T::BITS as usize == M * U::BITS as usize,
                "cast requires registers of equal total width"
            )
        };
        // SAFETY: both types are `repr(C, align(16))` arrays of the same byte
        // length, and every bit pattern is a valid element.
        unsafe { std::mem::transmute_copy(&self) }
    }
}

impl<T: Element, const N: usize, U: Element, const M: usize> Widen<Native<U, M>> for Native<T, N> {
    #[inline(always)]
    fn widen(self) -> Native<U, M> {
        const {
            assert!(
                2 * N * T::BITS as usize == M * U::BITS as usize,
                "widen requires a destination twice as wide"
            )
        };
        let mut out = Native::<U, M>::zero();
        // SAFETY: the destination is twice the size of `self`, the two do not
        // overlap, and every bit pattern is a valid element.
        unsafe {
            std::ptr::copy_nonoverlapping(
                (&self as *const Self).cast::<u8>(),
                (&mut out as *mut Native<U, M>).cast::<u8>(),
                std::mem::size_of::<Self>(),
            );
        }
        out
    }
}

impl<T: Element, const N: usize, U: Element, const M: usize> Narrow<Native<U, M>>
    for Native<T, N>
{
    #[inline(always)]
    fn narrow(self) -> Native<U, M> {
        const {
            assert!(
                N * T::BITS as usize == 2 * M * U::BITS as usize,
                "narrow requires a destination half as wide"
            )
        };
        // SAFETY: the destination is half the size of `self`; its bytes are
        // the leading half of `self`, and every bit pattern is valid.
        unsafe { std::mem::transmute_copy(&self) }
    }
}

register_ops!(impl[T: Element, const N: usize] Native<T, N> where [T: Element]);
float_register_ops!(impl[T: FloatElement, const N: usize] Native<T, N> where [T: FloatElement]);
