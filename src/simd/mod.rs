//! Register types, traits and the emulation layer.
//!
//! - [`Native`]: one hardware-width register as an element array.
//! - `avx2`: `__m256`-backed `F32x8`/`I32x8` and the inverse-trig kernels,
//!   present on AVX2+FMA x86 builds.
//! - [`Composite`]: two half-width lanes standing in for a width the target
//!   lacks, built on the [`combinator`].
//! - [`fallback`]: transcendental functions on integer registers through
//!   float registers.
//! - [`types`]: the per-(kind, width) aliases (`I8x16` .. `F64x8`) that pick
//!   between the two representations at compile time.
//! - [`slice`]: slice-level helpers and [`SliceMath`].

#[cfg(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2;

pub mod capability;
pub mod combinator;
pub mod composite;
pub mod element;
pub mod fallback;
pub mod mask;
pub mod math;
pub mod native;
pub mod slice;
pub mod traits;
pub mod types;

pub use capability::{is_native, Capabilities, Width};
pub use composite::Composite;
pub use element::{Element, ElementDesc, ElementKind, FloatElement, IntElement};
pub use math::{MathElement, MathOp};
pub use native::Native;
pub use slice::SliceMath;
pub use traits::{Cast, Narrow, SimdFloat, SimdInt, SimdMath, SimdRegister, Widen};
pub use types::*;
