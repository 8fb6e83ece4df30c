//! Compile-time capability model.
//!
//! `build.rs` inspects the build machine and emits the `native256` and
//! `native512` cfgs when 256-bit (AVX2, AVX-512) or 512-bit (AVX-512) vector
//! units are available. 128-bit registers are always native: SSE2 and NEON
//! cover them on the mainstream targets and the portable backend handles the
//! rest. Everything in this module is `const`, so the answer is fixed for the
//! whole build and costs nothing at run time.
//!
//! The `force-emulation` feature (or `SIMDREG_FORCE_EMULATION=1`) turns
//! every 256 and 512-bit width into a composite of narrower lanes.

/// Nominal register width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    /// 128-bit register (SSE2 / NEON class).
    W128,
    /// 256-bit register (AVX2 class).
    W256,
    /// 512-bit register (AVX-512 class).
    W512,
}

impl Width {
    /// Every nominal width, narrowest first.
    pub const ALL: [Width; 3] = [Width::W128, Width::W256, Width::W512];

    /// Total number of bits in a register of this width.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        match self {
            Width::W128 => 128,
            Width::W256 => 256,
            Width::W512 => 512,
        }
    }

    /// Total number of bytes in a register of this width.
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Maps a bit count back to a nominal width.
    pub const fn from_bits(bits: u32) -> Option<Width> {
        match bits {
            128 => Some(Width::W128),
            256 => Some(Width::W256),
            512 => Some(Width::W512),
            _ => None,
        }
    }

    /// Width of one lane when a register of this width is split in two.
    pub const fn half(self) -> Option<Width> {
        match self {
            Width::W128 => None,
            Width::W256 => Some(Width::W128),
            Width::W512 => Some(Width::W256),
        }
    }

    /// Width of a register made of two lanes of this width.
    pub const fn double(self) -> Option<Width> {
        match self {
            Width::W128 => Some(Width::W256),
            Width::W256 => Some(Width::W512),
            Width::W512 => None,
        }
    }

    /// Whether registers of this width are backed by hardware on this build.
    #[inline(always)]
    pub const fn is_native(self) -> bool {
        is_native(self)
    }
}

/// Whether `width` is natively backed on the current build target.
///
/// Exactly one of native or composite applies to a width for the whole
/// build; the register aliases in [`crate::simd::types`] follow this answer.
#[inline(always)]
pub const fn is_native(width: Width) -> bool {
    match width {
        Width::W128 => true,
        Width::W256 => cfg!(native256),
        Width::W512 => cfg!(native512),
    }
}

/// Validity predicate for a register of `bits` total bits.
///
/// Evaluated in const context by the register types, so an invalid element
/// count stops the build instead of producing a register of the wrong size.
pub(crate) const fn width_of_bits(bits: usize) -> Width {
    match bits {
        128 => Width::W128,
        256 => Width::W256,
        512 => Width::W512,
        _ => panic!("register width must be 128, 256 or 512 bits"),
    }
}

/// Summary of the register capabilities compiled into this build.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Name of the highest instruction set detected by `build.rs`.
    pub backend: &'static str,
    /// 128-bit registers are native (always true).
    pub native_128: bool,
    /// 256-bit registers are native.
    pub native_256: bool,
    /// 512-bit registers are native.
    pub native_512: bool,
    /// `F32x8` and `I32x8` are `__m256`/`__m256i`-backed AVX2 registers.
    pub avx2_registers: bool,
}

impl Capabilities {
    /// Capabilities of the current build.
    pub const fn current() -> Self {
        Self {
            backend: backend_name(),
            native_128: is_native(Width::W128),
            native_256: is_native(Width::W256),
            native_512: is_native(Width::W512),
            avx2_registers: cfg!(all(
                native256,
                avx2,
                fma,
                any(target_arch = "x86", target_arch = "x86_64")
            )),
        }
    }

    /// Widest natively backed width.
    pub const fn widest_native(&self) -> Width {
        if self.native_512 {
            Width::W512
        } else if self.native_256 {
            Width::W256
        } else {
            Width::W128
        }
    }

    /// Reports the capability summary through the `log` facade.
    pub fn log(&self) {
        log::info!(
            "simdreg backend: {} (128-bit: {}, 256-bit: {}, 512-bit: {}, avx2 registers: {})",
            self.backend,
            mode(self.native_128),
            mode(self.native_256),
            mode(self.native_512),
            self.avx2_registers
        );
    }
}

fn mode(native: bool) -> &'static str {
    if native {
        "native"
    } else {
        "composite"
    }
}

const fn backend_name() -> &'static str {
    if cfg!(avx512) {
        "avx512"
    } else if cfg!(avx2) {
        "avx2"
    } else if cfg!(sse) {
        "sse"
    } else if cfg!(neon) {
        "neon"
    } else {
        "portable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_128_is_always_native() {
        assert!(is_native(Width::W128));
        assert!(Capabilities::current().native_128);
    }

    #[test]
    fn test_avx2_registers_imply_native_256() {
        let caps = Capabilities::current();
        if caps.avx2_registers {
            assert!(caps.native_256);
            assert!(matches!(caps.backend, "avx2" | "avx512"));
        }
    }

    #[test]
    fn test_512_native_implies_256_native() {
        if is_native(Width::W512) {
            assert!(is_native(Width::W256));
        }
    }

    #[test]
    fn test_width_halving_and_doubling() {
        for width in Width::ALL {
            if let Some(half) = width.half() {
                assert_eq!(half.bits() * 2, width.bits());
                assert_eq!(half.double(), Some(width));
            }
            assert_eq!(Width::from_bits(width.bits()), Some(width));
        }
        assert_eq!(Width::from_bits(64), None);
        assert_eq!(Width::W512.bytes(), 64);
    }

    #[test]
    fn test_widest_native_matches_flags() {
        let caps = Capabilities::current();
        let widest = caps.widest_native();
        assert!(widest.is_native());
        if let Some(wider) = widest.double() {
            assert!(!wider.is_native());
        }
    }
}
