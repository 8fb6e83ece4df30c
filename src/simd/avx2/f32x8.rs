//! AVX2 register of eight `f32` elements.
//!
//! [`F32x8`] wraps one `__m256`. Arithmetic, comparisons, selection and the
//! halving-tree reductions run as AVX2/FMA instructions; the transcendental
//! functions go through the same element routine as every other `f32`
//! register, so results match [`Native<f32, 8>`](crate::simd::Native) bit for
//! bit.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use super::{mask_from_bits, sign_bits};
use crate::simd::{
    capability::Width,
    math::{MathElement, MathOp},
    traits::{float_register_ops, register_ops, SimdFloat, SimdMath, SimdRegister},
};

const LANES: usize = 8;

/// Eight packed `f32` values in one AVX2 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x8 {
    elements: __m256,
}

impl F32x8 {
    #[inline(always)]
    fn wrap(elements: __m256) -> Self {
        Self { elements }
    }

    /// Builds a register from its elements, element `i` from `elements[i]`.
    #[inline(always)]
    pub fn from_array(elements: [f32; LANES]) -> Self {
        // SAFETY: `elements` holds eight values and `loadu` has no alignment
        // requirement.
        Self::wrap(unsafe { _mm256_loadu_ps(elements.as_ptr()) })
    }

    /// Elements in index order.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANES] {
        let mut out = [0.0f32; LANES];
        // SAFETY: `out` has room for eight values.
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.elements) };
        out
    }

    /// The underlying register.
    #[inline(always)]
    pub fn as_m256(self) -> __m256 {
        self.elements
    }
}

impl fmt::Debug for F32x8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x8").field(&self.to_array()).finish()
    }
}

impl PartialEq for F32x8 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Default for F32x8 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; LANES]> for F32x8 {
    fn from(elements: [f32; LANES]) -> Self {
        Self::from_array(elements)
    }
}

/// Round half away from zero.
///
/// Truncates, then steps one unit away from zero where the dropped fraction
/// is at least one half. The input sign is or-ed back so `-0.4` rounds to
/// `-0.0`.
#[inline]
#[target_feature(enable = "avx")]
unsafe fn round_half_away(x: __m256) -> __m256 {
    let sign_mask = _mm256_set1_ps(-0.0);
    let sign = _mm256_and_ps(x, sign_mask);

    let truncated = _mm256_round_ps(x, _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC);
    let fraction = _mm256_andnot_ps(sign_mask, _mm256_sub_ps(x, truncated));
    let carry = _mm256_cmp_ps(fraction, _mm256_set1_ps(0.5), _CMP_GE_OQ);
    let step = _mm256_and_ps(carry, _mm256_or_ps(_mm256_set1_ps(1.0), sign));

    _mm256_or_ps(_mm256_add_ps(truncated, step), sign)
}

// element i meets element i + 4, then i + 2, then i + 1
macro_rules! tree_reduce_ps {
    ($name:ident, $pairs:ident, $single:ident) => {
        #[inline]
        #[target_feature(enable = "avx")]
        unsafe fn $name(x: __m256) -> f32 {
            let half = $pairs(_mm256_castps256_ps128(x), _mm256_extractf128_ps(x, 1));
            let quarter = $pairs(half, _mm_movehl_ps(half, half));
            _mm_cvtss_f32($single(quarter, _mm_shuffle_ps(quarter, quarter, 0b01)))
        }
    };
}

tree_reduce_ps!(reduce_sum_ps, _mm_add_ps, _mm_add_ss);
tree_reduce_ps!(reduce_min_ps, _mm_min_ps, _mm_min_ss);
tree_reduce_ps!(reduce_max_ps, _mm_max_ps, _mm_max_ss);

// Every `unsafe` block below calls AVX, AVX2 or FMA intrinsics, which the
// build machine reported (see the module docs of `avx2`).
impl SimdRegister for F32x8 {
    type Elem = f32;

    const LANES: usize = LANES;
    const WIDTH: Width = Width::W256;
    const NATIVE: bool = true;

    #[inline(always)]
    fn zero() -> Self {
        Self::wrap(unsafe { _mm256_setzero_ps() })
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::wrap(unsafe { _mm256_set1_ps(value) })
    }

    #[inline(always)]
    fn set(values: &[f32]) -> Self {
        assert_eq!(values.len(), LANES, "set expects one value per element");
        Self::wrap(unsafe { _mm256_loadu_ps(values.as_ptr()) })
    }

    #[inline(always)]
    fn setr(values: &[f32]) -> Self {
        assert_eq!(values.len(), LANES, "setr expects one value per element");
        Self::from_array(std::array::from_fn(|i| values[LANES - 1 - i]))
    }

    #[inline(always)]
    fn set_masked(mask: u64) -> Self {
        Self::wrap(unsafe { _mm256_castsi256_ps(mask_from_bits(mask)) })
    }

    #[inline(always)]
    fn load(values: &[f32]) -> Self {
        if values.len() >= LANES {
            return Self::wrap(unsafe { _mm256_loadu_ps(values.as_ptr()) });
        }
        let mut elements = [0.0f32; LANES];
        elements[..values.len()].copy_from_slice(values);
        Self::from_array(elements)
    }

    #[inline(always)]
    fn store(self, out: &mut [f32]) {
        if out.len() >= LANES {
            unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.elements) };
            return;
        }
        let count = out.len();
        out.copy_from_slice(&self.to_array()[..count]);
    }

    #[inline(always)]
    fn extract(self, index: usize) -> f32 {
        assert!(index < LANES, "element index {index} out of range for {LANES} elements");
        self.to_array()[index]
    }

    #[inline(always)]
    fn insert(self, index: usize, value: f32) -> Self {
        assert!(index < LANES, "element index {index} out of range for {LANES} elements");
        let mut elements = self.to_array();
        elements[index] = value;
        Self::from_array(elements)
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_add_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_sub_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_mul_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::wrap(unsafe { _mm256_xor_ps(self.elements, _mm256_set1_ps(-0.0)) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::wrap(unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.elements) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_min_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_max_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self::wrap(unsafe { _mm256_fmadd_ps(self.elements, b.elements, c.elements) })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_and_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_or_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_xor_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_andnot_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_EQ_OQ) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_LT_OQ) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_LE_OQ) })
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: Self) -> Self {
        Self::wrap(unsafe { _mm256_blendv_ps(self.elements, other.elements, mask.elements) })
    }

    #[inline(always)]
    fn move_mask(self) -> u64 {
        unsafe { sign_bits(self.elements) }
    }

    #[inline(always)]
    fn reduce_min(self) -> f32 {
        unsafe { reduce_min_ps(self.elements) }
    }

    #[inline(always)]
    fn reduce_max(self) -> f32 {
        unsafe { reduce_max_ps(self.elements) }
    }

    #[inline(always)]
    fn reduce_sum(self) -> f32 {
        unsafe { reduce_sum_ps(self.elements) }
    }
}

impl SimdFloat for F32x8 {
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_div_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::wrap(unsafe { _mm256_floor_ps(self.elements) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::wrap(unsafe { _mm256_ceil_ps(self.elements) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::wrap(unsafe {
            _mm256_round_ps(self.elements, _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC)
        })
    }

    #[inline(always)]
    fn round(self) -> Self {
        Self::wrap(unsafe { round_half_away(self.elements) })
    }
}

impl SimdMath for F32x8 {
    #[inline(always)]
    fn math(self, op: MathOp) -> Self {
        let mut elements = self.to_array();
        f32::math_in_place(op, &mut elements);
        Self::from_array(elements)
    }
}

register_ops!(impl[] F32x8 where []);
float_register_ops!(impl[] F32x8 where []);
