//! AVX2 register of eight `i32` elements.
//!
//! Arithmetic wraps, as on every integer register. Shifts take their count
//! from a register (`vpslld`/`vpsrad`) since the count is a const generic
//! of the trait method.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use super::{mask_from_bits, sign_bits};
use crate::simd::{
    capability::Width,
    math::{MathElement, MathOp},
    traits::{register_ops, SimdInt, SimdMath, SimdRegister},
};

const LANES: usize = 8;

/// Eight packed `i32` values in one AVX2 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct I32x8 {
    elements: __m256i,
}

impl I32x8 {
    #[inline(always)]
    fn wrap(elements: __m256i) -> Self {
        Self { elements }
    }

    /// Builds a register from its elements, element `i` from `elements[i]`.
    #[inline(always)]
    pub fn from_array(elements: [i32; LANES]) -> Self {
        // SAFETY: `elements` is 32 bytes and `loadu` has no alignment
        // requirement.
        Self::wrap(unsafe { _mm256_loadu_si256(elements.as_ptr().cast()) })
    }

    /// Elements in index order.
    #[inline(always)]
    pub fn to_array(self) -> [i32; LANES] {
        let mut out = [0i32; LANES];
        // SAFETY: `out` is 32 bytes.
        unsafe { _mm256_storeu_si256(out.as_mut_ptr().cast(), self.elements) };
        out
    }

    /// The underlying register.
    #[inline(always)]
    pub fn as_m256i(self) -> __m256i {
        self.elements
    }
}

impl fmt::Debug for I32x8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("I32x8").field(&self.to_array()).finish()
    }
}

impl PartialEq for I32x8 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Eq for I32x8 {}

impl Default for I32x8 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[i32; LANES]> for I32x8 {
    fn from(elements: [i32; LANES]) -> Self {
        Self::from_array(elements)
    }
}

// element i meets element i + 4, then i + 2, then i + 1
macro_rules! tree_reduce_epi32 {
    ($name:ident, $pairs:ident) => {
        #[inline]
        #[target_feature(enable = "avx,avx2")]
        unsafe fn $name(x: __m256i) -> i32 {
            let half = $pairs(_mm256_castsi256_si128(x), _mm256_extracti128_si256(x, 1));
            let quarter = $pairs(half, _mm_unpackhi_epi64(half, half));
            _mm_cvtsi128_si32($pairs(quarter, _mm_shuffle_epi32(quarter, 0b01)))
        }
    };
}

tree_reduce_epi32!(reduce_sum_epi32, _mm_add_epi32);
tree_reduce_epi32!(reduce_min_epi32, _mm_min_epi32);
tree_reduce_epi32!(reduce_max_epi32, _mm_max_epi32);

#[inline]
#[target_feature(enable = "avx,avx2")]
unsafe fn all_ones() -> __m256i {
    _mm256_set1_epi32(-1)
}

// Every `unsafe` block below calls AVX or AVX2 intrinsics, which the build
// machine reported (see the module docs of `avx2`).
impl SimdRegister for I32x8 {
    type Elem = i32;

    const LANES: usize = LANES;
    const WIDTH: Width = Width::W256;
    const NATIVE: bool = true;

    #[inline(always)]
    fn zero() -> Self {
        Self::wrap(unsafe { _mm256_setzero_si256() })
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        Self::wrap(unsafe { _mm256_set1_epi32(value) })
    }

    #[inline(always)]
    fn set(values: &[i32]) -> Self {
        assert_eq!(values.len(), LANES, "set expects one value per element");
        Self::wrap(unsafe { _mm256_loadu_si256(values.as_ptr().cast()) })
    }

    #[inline(always)]
    fn setr(values: &[i32]) -> Self {
        assert_eq!(values.len(), LANES, "setr expects one value per element");
        Self::from_array(std::array::from_fn(|i| values[LANES - 1 - i]))
    }

    #[inline(always)]
    fn set_masked(mask: u64) -> Self {
        Self::wrap(unsafe { mask_from_bits(mask) })
    }

    #[inline(always)]
    fn load(values: &[i32]) -> Self {
        if values.len() >= LANES {
            return Self::wrap(unsafe { _mm256_loadu_si256(values.as_ptr().cast()) });
        }
        let mut elements = [0i32; LANES];
        elements[..values.len()].copy_from_slice(values);
        Self::from_array(elements)
    }

    #[inline(always)]
    fn store(self, out: &mut [i32]) {
        if out.len() >= LANES {
            unsafe { _mm256_storeu_si256(out.as_mut_ptr().cast(), self.elements) };
            return;
        }
        let count = out.len();
        out.copy_from_slice(&self.to_array()[..count]);
    }

    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        assert!(index < LANES, "element index {index} out of range for {LANES} elements");
        self.to_array()[index]
    }

    #[inline(always)]
    fn insert(self, index: usize, value: i32) -> Self {
        assert!(index < LANES, "element index {index} out of range for {LANES} elements");
        let mut elements = self.to_array();
        elements[index] = value;
        Self::from_array(elements)
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_add_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_sub_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_mullo_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::wrap(unsafe { _mm256_sub_epi32(_mm256_setzero_si256(), self.elements) })
    }

    /// `i32::MIN` stays `i32::MIN`.
    #[inline(always)]
    fn abs(self) -> Self {
        Self::wrap(unsafe { _mm256_abs_epi32(self.elements) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_min_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_max_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self::wrap(unsafe {
            _mm256_add_epi32(_mm256_mullo_epi32(self.elements, b.elements), c.elements)
        })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_and_si256(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_or_si256(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_xor_si256(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_andnot_si256(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn not(self) -> Self {
        Self::wrap(unsafe { _mm256_xor_si256(self.elements, all_ones()) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmpeq_epi32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmpgt_epi32(rhs.elements, self.elements) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        Self::wrap(unsafe {
            _mm256_andnot_si256(_mm256_cmpgt_epi32(self.elements, rhs.elements), all_ones())
        })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        Self::wrap(unsafe { _mm256_cmpgt_epi32(self.elements, rhs.elements) })
    }

    /// Selects on the top bit of each 32-bit mask element, like
    /// `vblendvps`, not on every byte.
    #[inline(always)]
    fn blend(self, other: Self, mask: Self) -> Self {
        Self::wrap(unsafe {
            _mm256_castps_si256(_mm256_blendv_ps(
                _mm256_castsi256_ps(self.elements),
                _mm256_castsi256_ps(other.elements),
                _mm256_castsi256_ps(mask.elements),
            ))
        })
    }

    #[inline(always)]
    fn move_mask(self) -> u64 {
        unsafe { sign_bits(_mm256_castsi256_ps(self.elements)) }
    }

    #[inline(always)]
    fn reduce_min(self) -> i32 {
        unsafe { reduce_min_epi32(self.elements) }
    }

    #[inline(always)]
    fn reduce_max(self) -> i32 {
        unsafe { reduce_max_epi32(self.elements) }
    }

    #[inline(always)]
    fn reduce_sum(self) -> i32 {
        unsafe { reduce_sum_epi32(self.elements) }
    }
}

impl SimdInt for I32x8 {
    #[inline(always)]
    fn shl<const SHIFT: u32>(self) -> Self {
        const {
            assert!(
                SHIFT < i32::BITS,
                "shift count must be smaller than the element width"
            )
        };
        Self::wrap(unsafe {
            _mm256_sll_epi32(self.elements, _mm_cvtsi32_si128(SHIFT as i32))
        })
    }

    /// Arithmetic shift: the sign bit is replicated.
    #[inline(always)]
    fn shr<const SHIFT: u32>(self) -> Self {
        const {
            assert!(
                SHIFT < i32::BITS,
                "shift count must be smaller than the element width"
            )
        };
        Self::wrap(unsafe {
            _mm256_sra_epi32(self.elements, _mm_cvtsi32_si128(SHIFT as i32))
        })
    }
}

impl SimdMath for I32x8 {
    #[inline(always)]
    fn math(self, op: MathOp) -> Self {
        let mut elements = self.to_array();
        i32::math_in_place(op, &mut elements);
        Self::from_array(elements)
    }
}

register_ops!(impl[] I32x8 where []);
