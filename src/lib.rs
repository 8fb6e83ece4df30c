//! # simdreg
//!
//! Fixed-width SIMD registers with one operation set across 128, 256 and
//! 512-bit widths and every integer (`i8`..`u64`) and float (`f32`, `f64`)
//! element kind.
//!
//! Widths the build target backs in hardware are [`Native`](simd::Native)
//! registers. Widths it does not back are [`Composite`](simd::Composite)
//! registers: a pair of half-width lanes, recursively, down to a native
//! width. Which one a given alias such as [`I32x16`](simd::I32x16) resolves
//! to is decided at compile time by `build.rs`; callers see the same
//! behavior either way.
//!
//! ```rust
//! use simdreg::simd::{I32x16, SimdRegister};
//!
//! let values: Vec<i32> = (0..16).collect();
//! let v = I32x16::load(&values);
//! let doubled = v + v;
//!
//! assert_eq!(doubled.extract(15), 30);
//! assert_eq!(doubled.reduce_max(), 30);
//! ```

pub mod error;
pub mod simd;

/// Below this many elements the slice helpers run a plain scalar loop.
pub const SIMD_THRESHOLD: usize = 256;

/// From this many elements on the slice helpers split work across rayon threads.
pub const PARALLEL_SIMD_THRESHOLD: usize = 131_072;

/// Number of elements handed to one rayon task by the parallel slice helpers.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

pub use error::{Result, SimdregError};
