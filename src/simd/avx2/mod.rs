//! AVX2 registers and kernels.
//!
//! Compiled only when `build.rs` detected AVX2 and FMA on an x86 build
//! machine, so every intrinsic called in this module is available to the
//! final binary. The 256-bit `f32` and `i32` aliases resolve to
//! [`F32x8`] and [`I32x8`] here, each one `__m256`/`__m256i` with
//! arithmetic, comparison and reduction lowered to AVX2 instructions. Both
//! produce the same bits as [`Native`] of the same shape, which stays the
//! backing of every other element type.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::mem::size_of;
use std::ptr::copy_nonoverlapping;

use crate::simd::{
    element::Element,
    native::Native,
    traits::{Cast, Narrow, SimdRegister, Widen},
};

mod f32x8;
mod i32x8;

pub(crate) mod kernels;
pub(crate) mod math;

pub use f32x8::F32x8;
pub use i32x8::I32x8;

/// Per-element mask from the low eight bits of a BitMask.
///
/// Element `i` is all ones when bit `i` is set: each element keeps only its
/// own bit of the broadcast mask and compares it against that bit.
#[inline]
#[target_feature(enable = "avx,avx2")]
pub(crate) unsafe fn mask_from_bits(mask: u64) -> __m256i {
    let bits = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
    let selected = _mm256_and_si256(_mm256_set1_epi32((mask & 0xFF) as i32), bits);
    _mm256_cmpeq_epi32(selected, bits)
}

/// BitMask of the sign bit of each 32-bit element.
#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn sign_bits(x: __m256) -> u64 {
    (_mm256_movemask_ps(x) as u32 & 0xFF) as u64
}

/// Bytes of `src` copied over the front of a zeroed `D`, truncated to the
/// smaller of the two.
#[inline(always)]
fn reinterpret<S: SimdRegister, D: SimdRegister>(src: S) -> D {
    let mut out = D::zero();
    let count = size_of::<S>().min(size_of::<D>());
    // SAFETY: `count` bytes fit in both values, which do not overlap, and
    // every bit pattern is a valid element.
    unsafe {
        copy_nonoverlapping(
            (&src as *const S).cast::<u8>(),
            (&mut out as *mut D).cast::<u8>(),
            count,
        );
    }
    out
}

/// Reinterpretation between an AVX2 register and array-backed registers.
macro_rules! native_interop {
    ($hw:ty) => {
        impl<T: Element, const N: usize> Cast<$hw> for Native<T, N> {
            #[inline(always)]
            fn cast(self) -> $hw {
                const {
                    assert!(
                        N * T::BITS as usize == 256,
                        "cast requires registers of equal total width"
                    )
                };
                reinterpret(self)
            }
        }

        impl<T: Element, const N: usize> Widen<$hw> for Native<T, N> {
            #[inline(always)]
            fn widen(self) -> $hw {
                const {
                    assert!(
                        N * T::BITS as usize == 128,
                        "widen requires a destination twice as wide"
                    )
                };
                reinterpret(self)
            }
        }

        impl<T: Element, const N: usize> Narrow<$hw> for Native<T, N> {
            #[inline(always)]
            fn narrow(self) -> $hw {
                const {
                    assert!(
                        N * T::BITS as usize == 512,
                        "narrow requires a destination half as wide"
                    )
                };
                reinterpret(self)
            }
        }

        impl<U: Element, const M: usize> Cast<Native<U, M>> for $hw {
            #[inline(always)]
            fn cast(self) -> Native<U, M> {
                const {
                    assert!(
                        M * U::BITS as usize == 256,
                        "cast requires registers of equal total width"
                    )
                };
                reinterpret(self)
            }
        }

        impl<U: Element, const M: usize> Widen<Native<U, M>> for $hw {
            #[inline(always)]
            fn widen(self) -> Native<U, M> {
                const {
                    assert!(
                        M * U::BITS as usize == 512,
                        "widen requires a destination twice as wide"
                    )
                };
                reinterpret(self)
            }
        }

        impl<U: Element, const M: usize> Narrow<Native<U, M>> for $hw {
            #[inline(always)]
            fn narrow(self) -> Native<U, M> {
                const {
                    assert!(
                        M * U::BITS as usize == 128,
                        "narrow requires a destination half as wide"
                    )
                };
                reinterpret(self)
            }
        }

        impl Cast<F32x8> for $hw {
            #[inline(always)]
            fn cast(self) -> F32x8 {
                reinterpret(self)
            }
        }

        impl Cast<I32x8> for $hw {
            #[inline(always)]
            fn cast(self) -> I32x8 {
                reinterpret(self)
            }
        }
    };
}

native_interop!(F32x8);
native_interop!(I32x8);
