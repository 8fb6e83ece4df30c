//! Buffer drivers for the AVX2 `f32` kernels.
//!
//! A buffer is processed in full 8-element blocks followed by one partial
//! block. The partial block is copied into a zero-padded stack array so the
//! kernel always sees a full register, which keeps every element's result
//! independent of how the buffer was split.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::math::{_mm256_acos_ps, _mm256_asin_ps, _mm256_atan_ps};
use crate::simd::math::MathOp;

/// Number of `f32` elements in one `__m256`.
pub(crate) const LANE_COUNT: usize = 8;

fn has_kernel(op: MathOp) -> bool {
    matches!(op, MathOp::Asin | MathOp::Acos | MathOp::Atan)
}

/// Applies `op` to `values` in place with an AVX2 kernel.
///
/// Returns `false`, leaving `values` untouched, when no kernel exists for `op`.
pub(crate) fn apply(op: MathOp, values: &mut [f32]) -> bool {
    if !has_kernel(op) {
        return false;
    }

    let mut blocks = values.chunks_exact_mut(LANE_COUNT);
    for block in &mut blocks {
        // SAFETY: `block` holds exactly LANE_COUNT elements, and this module
        // is only compiled when build.rs detected both AVX2 and FMA.
        unsafe { apply_block(op, block) };
    }

    let tail = blocks.into_remainder();
    if !tail.is_empty() {
        let mut padded = [0.0f32; LANE_COUNT];
        padded[..tail.len()].copy_from_slice(tail);
        // SAFETY: `padded` holds exactly LANE_COUNT elements.
        unsafe { apply_block(op, &mut padded) };
        let len = tail.len();
        tail.copy_from_slice(&padded[..len]);
    }

    true
}

#[inline]
#[target_feature(enable = "avx,avx2,fma")]
unsafe fn apply_block(op: MathOp, block: &mut [f32]) {
    debug_assert_eq!(block.len(), LANE_COUNT);

    let x = _mm256_loadu_ps(block.as_ptr());
    let y = match op {
        MathOp::Asin => _mm256_asin_ps(x),
        MathOp::Acos => _mm256_acos_ps(x),
        _ => _mm256_atan_ps(x),
    };
    _mm256_storeu_ps(block.as_mut_ptr(), y);
}
