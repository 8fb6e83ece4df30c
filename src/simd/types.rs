//! Register aliases per (element kind, width).
//!
//! Each alias resolves at compile time to either a hardware-width register
//! or a [`Composite`](crate::simd::Composite) of the next narrower alias,
//! following the capability cfgs emitted by `build.rs`. Code written against
//! `F32x16` therefore compiles to one 512-bit register on AVX-512, two
//! 256-bit lanes on AVX2 and four 128-bit lanes elsewhere, with identical
//! results.
//!
//! The hardware-width register is [`Native`], except for `F32x8` and `I32x8`
//! on AVX2 builds, which are the `__m256`-backed `avx2::F32x8` and
//! `avx2::I32x8`.

use crate::simd::{
    element::Element,
    native::Native,
    traits::{SimdMath, SimdRegister},
};

// 256-bit `f32` and `i32` registers backed by `__m256`/`__m256i` on AVX2
#[cfg(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) type Backed256F32 = crate::simd::avx2::F32x8;
#[cfg(not(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64"))))]
pub(crate) type Backed256F32 = Native<f32, 8>;

#[cfg(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) type Backed256I32 = crate::simd::avx2::I32x8;
#[cfg(not(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64"))))]
pub(crate) type Backed256I32 = Native<i32, 8>;

macro_rules! register_aliases {
    ($t:ty, $r128:ident = $n128:literal, $r256:ident = $n256:literal, $r512:ident = $n512:literal) => {
        register_aliases!($t, $r128 = $n128, $r256 = $n256 in Native<$t, $n256>, $r512 = $n512);
    };
    ($t:ty, $r128:ident = $n128:literal, $r256:ident = $n256:literal in $b256:ty, $r512:ident = $n512:literal) => {
        #[doc = concat!("128-bit register of ", stringify!($n128), " `", stringify!($t), "` elements.")]
        pub type $r128 = Native<$t, $n128>;

        #[doc = concat!("256-bit register of ", stringify!($n256), " `", stringify!($t), "` elements.")]
        #[cfg(native256)]
        pub type $r256 = $b256;
        #[doc = concat!("256-bit register of ", stringify!($n256), " `", stringify!($t), "` elements.")]
        #[cfg(not(native256))]
        pub type $r256 = crate::simd::composite::Composite<$r128>;

        #[doc = concat!("512-bit register of ", stringify!($n512), " `", stringify!($t), "` elements.")]
        #[cfg(native512)]
        pub type $r512 = Native<$t, $n512>;
        #[doc = concat!("512-bit register of ", stringify!($n512), " `", stringify!($t), "` elements.")]
        #[cfg(not(native512))]
        pub type $r512 = crate::simd::composite::Composite<$r256>;

        impl ElementRegisters for $t {
            type R128 = $r128;
            type R256 = $r256;
            type R512 = $r512;

            #[cfg(native512)]
            type Preferred = $r512;
            #[cfg(all(native256, not(native512)))]
            type Preferred = $r256;
            #[cfg(not(native256))]
            type Preferred = $r128;
        }
    };
}

/// The registers of every width for one element type.
pub trait ElementRegisters: Element {
    type R128: SimdMath<Elem = Self>;
    type R256: SimdMath<Elem = Self>;
    type R512: SimdMath<Elem = Self>;

    /// Widest natively backed register, the one slice helpers iterate with.
    type Preferred: SimdMath<Elem = Self>;
}

register_aliases!(i8, I8x16 = 16, I8x32 = 32, I8x64 = 64);
register_aliases!(i16, I16x8 = 8, I16x16 = 16, I16x32 = 32);
register_aliases!(i32, I32x4 = 4, I32x8 = 8 in Backed256I32, I32x16 = 16);
register_aliases!(i64, I64x2 = 2, I64x4 = 4, I64x8 = 8);
register_aliases!(u8, U8x16 = 16, U8x32 = 32, U8x64 = 64);
register_aliases!(u16, U16x8 = 8, U16x16 = 16, U16x32 = 32);
register_aliases!(u32, U32x4 = 4, U32x8 = 8, U32x16 = 16);
register_aliases!(u64, U64x2 = 2, U64x4 = 4, U64x8 = 8);
register_aliases!(f32, F32x4 = 4, F32x8 = 8 in Backed256F32, F32x16 = 16);
register_aliases!(f64, F64x2 = 2, F64x4 = 4, F64x8 = 8);

/// Generic 128-bit integer register.
///
/// Carries raw bits; element kind and width are chosen by
/// [`cast`](crate::simd::Cast::cast)ing into a typed register at the use site.
pub type Raw128 = U64x2;

/// Generic 256-bit integer register.
pub type Raw256 = U64x4;

/// Generic 512-bit integer register.
pub type Raw512 = U64x8;

/// Whether the register type `R` is a single hardware-width register.
pub const fn is_single_register<R: SimdRegister>() -> bool {
    R::NATIVE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::capability::{is_native, Width};

    #[test]
    fn test_aliases_follow_capabilities() {
        assert!(is_single_register::<F32x4>());
        assert_eq!(is_single_register::<F32x8>(), is_native(Width::W256));
        assert_eq!(is_single_register::<I8x64>(), is_native(Width::W512));
        assert_eq!(is_single_register::<U16x16>(), is_native(Width::W256));
    }

    #[test]
    fn test_alias_shapes() {
        assert_eq!(I8x64::LANES, 64);
        assert_eq!(I8x64::WIDTH, Width::W512);
        assert_eq!(F64x4::LANES, 4);
        assert_eq!(Raw256::WIDTH, Width::W256);
        assert_eq!(
            <<f32 as ElementRegisters>::Preferred as SimdRegister>::WIDTH,
            widest()
        );
    }

    fn widest() -> Width {
        crate::simd::capability::Capabilities::current().widest_native()
    }
}
