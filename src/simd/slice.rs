//! Slice operations built on registers.
//!
//! The helpers here walk a slice one register at a time: every complete
//! block of `R::LANES` elements is loaded, transformed and stored, then the
//! remainder is handled as one partial block (zero-padded load, prefix
//! store). The `par_` variants split the output into chunks that are a whole
//! number of blocks and hand them to rayon.
//!
//! Functions taking more than one input check the lengths and return
//! [`SimdregError::LengthMismatch`](crate::SimdregError::LengthMismatch)
//! instead of panicking.
//!
//! # Examples
//!
//! ```rust
//! use simdreg::simd::{slice, F32x8};
//!
//! let a: Vec<f32> = (0..1000).map(|i| i as f32).collect();
//! let b: Vec<f32> = (0..1000).map(|i| (i * 2) as f32).collect();
//!
//! let sum = slice::zip_map::<F32x8, _>(&a, &b, |x, y| x + y).unwrap();
//! assert_eq!(sum[999], 2997.0);
//! ```

use rayon::prelude::*;

use crate::{
    error::{length_mismatch, validation_error, Result},
    simd::{
        element::Element,
        mask,
        math::{MathElement, MathOp},
        traits::{SimdMath, SimdRegister},
        types::ElementRegisters,
    },
    PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD, SIMD_THRESHOLD,
};

// ================================================================================================
// BLOCK HELPERS
// ================================================================================================

/// Runs `f` over `input` block by block, writing to the same positions of `out`.
#[inline(always)]
fn map_blocks<R, F>(input: &[R::Elem], out: &mut [R::Elem], f: &F)
where
    R: SimdRegister,
    F: Fn(R) -> R,
{
    debug_assert_eq!(input.len(), out.len());

    let step = R::LANES;
    let complete_blocks = (input.len() / step) * step;

    for i in (0..complete_blocks).step_by(step) {
        f(R::load(&input[i..i + step])).store(&mut out[i..i + step]);
    }

    // Handle the remaining elements with one zero-padded register
    if input.len() > complete_blocks {
        f(R::load(&input[complete_blocks..])).store(&mut out[complete_blocks..]);
    }
}

#[inline(always)]
fn zip_blocks<R, F>(a: &[R::Elem], b: &[R::Elem], out: &mut [R::Elem], f: &F)
where
    R: SimdRegister,
    F: Fn(R, R) -> R,
{
    debug_assert!(a.len() == b.len() && a.len() == out.len());

    let step = R::LANES;
    let complete_blocks = (a.len() / step) * step;

    for i in (0..complete_blocks).step_by(step) {
        let range = i..i + step;
        f(R::load(&a[range.clone()]), R::load(&b[range.clone()])).store(&mut out[range]);
    }

    if a.len() > complete_blocks {
        let tail = complete_blocks..;
        f(R::load(&a[tail.clone()]), R::load(&b[tail.clone()])).store(&mut out[tail]);
    }
}

#[inline(always)]
fn zip3_blocks<R, F>(a: &[R::Elem], b: &[R::Elem], c: &[R::Elem], out: &mut [R::Elem], f: &F)
where
    R: SimdRegister,
    F: Fn(R, R, R) -> R,
{
    let step = R::LANES;
    let complete_blocks = (a.len() / step) * step;

    for i in (0..complete_blocks).step_by(step) {
        let range = i..i + step;
        f(
            R::load(&a[range.clone()]),
            R::load(&b[range.clone()]),
            R::load(&c[range.clone()]),
        )
        .store(&mut out[range]);
    }

    if a.len() > complete_blocks {
        let tail = complete_blocks..;
        f(
            R::load(&a[tail.clone()]),
            R::load(&b[tail.clone()]),
            R::load(&c[tail.clone()]),
        )
        .store(&mut out[tail]);
    }
}

/// Chunk length for the parallel helpers: a whole number of registers.
#[inline(always)]
fn parallel_chunk_size(step: usize) -> usize {
    ((PARALLEL_CHUNK_SIZE / step) * step).max(step)
}

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        log::debug!("rejecting slice operation: lengths {} and {} differ", left, right);
        return Err(length_mismatch(left, right));
    }
    Ok(())
}

fn check_not_empty(len: usize, what: &str) -> Result<()> {
    if len == 0 {
        log::debug!("rejecting {} of an empty slice", what);
        return Err(validation_error(format!("{} requires a non-empty slice", what)));
    }
    Ok(())
}

// ================================================================================================
// ELEMENTWISE
// ================================================================================================

/// Applies `f` to `input` one register of type `R` at a time.
pub fn map<R, F>(input: &[R::Elem], f: F) -> Vec<R::Elem>
where
    R: SimdRegister,
    F: Fn(R) -> R,
{
    let mut out = vec![R::Elem::ZERO; input.len()];
    map_blocks(input, &mut out, &f);
    out
}

/// Applies `f` to matching registers of `a` and `b`.
///
/// # Errors
///
/// [`LengthMismatch`](crate::SimdregError::LengthMismatch) if the slices
/// differ in length.
pub fn zip_map<R, F>(a: &[R::Elem], b: &[R::Elem], f: F) -> Result<Vec<R::Elem>>
where
    R: SimdRegister,
    F: Fn(R, R) -> R,
{
    check_lengths(a.len(), b.len())?;

    let mut out = vec![R::Elem::ZERO; a.len()];
    zip_blocks(a, b, &mut out, &f);
    Ok(out)
}

/// Applies `f` to matching registers of `a`, `b` and `c`, e.g. a fused
/// multiply-add over three slices.
///
/// # Errors
///
/// [`LengthMismatch`](crate::SimdregError::LengthMismatch) if the slices
/// differ in length.
pub fn zip3_map<R, F>(a: &[R::Elem], b: &[R::Elem], c: &[R::Elem], f: F) -> Result<Vec<R::Elem>>
where
    R: SimdRegister,
    F: Fn(R, R, R) -> R,
{
    check_lengths(a.len(), b.len())?;
    check_lengths(a.len(), c.len())?;

    let mut out = vec![R::Elem::ZERO; a.len()];
    zip3_blocks(a, b, c, &mut out, &f);
    Ok(out)
}

/// Parallel [`map`]. Inputs up to [`PARALLEL_SIMD_THRESHOLD`] elements run
/// on the calling thread.
pub fn par_map<R, F>(input: &[R::Elem], f: F) -> Vec<R::Elem>
where
    R: SimdRegister,
    F: Fn(R) -> R + Sync,
{
    if input.len() <= PARALLEL_SIMD_THRESHOLD {
        log::trace!("par_map over {} elements: single thread", input.len());
        return map(input, f);
    }

    let chunk_size = parallel_chunk_size(R::LANES);
    log::trace!(
        "par_map over {} elements: rayon chunks of {}",
        input.len(),
        chunk_size
    );

    let mut out = vec![R::Elem::ZERO; input.len()];
    out.par_chunks_mut(chunk_size)
        .zip(input.par_chunks(chunk_size))
        .for_each(|(out_chunk, in_chunk)| map_blocks(in_chunk, out_chunk, &f));
    out
}

/// Parallel [`zip_map`].
///
/// # Errors
///
/// [`LengthMismatch`](crate::SimdregError::LengthMismatch) if the slices
/// differ in length.
pub fn par_zip_map<R, F>(a: &[R::Elem], b: &[R::Elem], f: F) -> Result<Vec<R::Elem>>
where
    R: SimdRegister,
    F: Fn(R, R) -> R + Sync,
{
    check_lengths(a.len(), b.len())?;

    if a.len() <= PARALLEL_SIMD_THRESHOLD {
        log::trace!("par_zip_map over {} elements: single thread", a.len());
        return zip_map(a, b, f);
    }

    let chunk_size = parallel_chunk_size(R::LANES);
    log::trace!(
        "par_zip_map over {} elements: rayon chunks of {}",
        a.len(),
        chunk_size
    );

    let mut out = vec![R::Elem::ZERO; a.len()];
    out.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, out_chunk)| {
            let start = chunk_idx * chunk_size;
            let end = start + out_chunk.len();
            zip_blocks(&a[start..end], &b[start..end], out_chunk, &f);
        });
    Ok(out)
}

// ================================================================================================
// REDUCTIONS
// ================================================================================================

/// Sum of all elements, accumulated one register at a time.
///
/// # Errors
///
/// [`ValidationError`](crate::SimdregError::ValidationError) on an empty slice.
pub fn reduce_sum<R: SimdRegister>(values: &[R::Elem]) -> Result<R::Elem> {
    check_not_empty(values.len(), "sum")?;

    // zero padding is neutral for a sum
    let acc = values
        .chunks(R::LANES)
        .fold(R::zero(), |acc, chunk| acc.add(R::load(chunk)));
    Ok(acc.reduce_sum())
}

/// Minimum over all elements.
///
/// # Errors
///
/// [`ValidationError`](crate::SimdregError::ValidationError) on an empty slice.
pub fn reduce_min<R: SimdRegister>(values: &[R::Elem]) -> Result<R::Elem> {
    check_not_empty(values.len(), "min")?;
    Ok(fold_padded::<R>(values, R::min).reduce_min())
}

/// Maximum over all elements.
///
/// # Errors
///
/// [`ValidationError`](crate::SimdregError::ValidationError) on an empty slice.
pub fn reduce_max<R: SimdRegister>(values: &[R::Elem]) -> Result<R::Elem> {
    check_not_empty(values.len(), "max")?;
    Ok(fold_padded::<R>(values, R::max).reduce_max())
}

/// Folds `values` with `f`, padding the last register with `values[0]`
/// instead of zero so the padding never wins a min or max.
fn fold_padded<R: SimdRegister>(values: &[R::Elem], f: impl Fn(R, R) -> R) -> R {
    let filler = R::splat(values[0]);

    values.chunks(R::LANES).fold(filler, |acc, chunk| {
        let loaded = R::load(chunk);
        let block = if chunk.len() == R::LANES {
            loaded
        } else {
            filler.blend(loaded, R::set_masked(mask::low_bits(chunk.len())))
        };
        f(acc, block)
    })
}

// ================================================================================================
// TRANSCENDENTAL FUNCTIONS
// ================================================================================================

fn simd_math<T: ElementRegisters + MathElement>(values: &[T], op: MathOp) -> Vec<T> {
    if values.len() < SIMD_THRESHOLD {
        log::trace!("{} over {} elements: element loop", op.name(), values.len());
        let mut out = values.to_vec();
        T::math_in_place(op, &mut out);
        return out;
    }

    log::trace!(
        "{} over {} elements: {}-wide registers",
        op.name(),
        values.len(),
        <T::Preferred as SimdRegister>::LANES
    );
    map::<T::Preferred, _>(values, |r| r.math(op))
}

fn par_simd_math<T: ElementRegisters + MathElement>(values: &[T], op: MathOp) -> Vec<T> {
    if values.len() <= PARALLEL_SIMD_THRESHOLD {
        return simd_math(values, op);
    }
    par_map::<T::Preferred, _>(values, |r| r.math(op))
}

/// Transcendental functions over whole slices.
///
/// Each call picks a strategy by length: an element loop below
/// [`SIMD_THRESHOLD`], the element's preferred register up to
/// [`PARALLEL_SIMD_THRESHOLD`], and rayon above it for the `par_` variants.
/// The strategy never changes the result.
///
/// ```rust
/// use simdreg::simd::SliceMath;
///
/// let angles: Vec<f32> = (0..1000).map(|i| i as f32 * 0.001).collect();
/// let sines = angles.sin();
/// assert!((sines[500] - 0.5f32.sin()).abs() < 1e-6);
///
/// let squares = [0u32, 1, 4, 9, 16];
/// assert_eq!(squares.sqrt(), vec![0, 1, 2, 3, 4]);
/// ```
pub trait SliceMath<T> {
    /// Applies `op` to every element.
    fn math(&self, op: MathOp) -> Vec<T>;

    /// Parallel [`math`](SliceMath::math).
    fn par_math(&self, op: MathOp) -> Vec<T>;

    fn sin(&self) -> Vec<T> {
        self.math(MathOp::Sin)
    }

    fn cos(&self) -> Vec<T> {
        self.math(MathOp::Cos)
    }

    fn tan(&self) -> Vec<T> {
        self.math(MathOp::Tan)
    }

    fn asin(&self) -> Vec<T> {
        self.math(MathOp::Asin)
    }

    fn acos(&self) -> Vec<T> {
        self.math(MathOp::Acos)
    }

    fn atan(&self) -> Vec<T> {
        self.math(MathOp::Atan)
    }

    fn sqrt(&self) -> Vec<T> {
        self.math(MathOp::Sqrt)
    }

    fn cbrt(&self) -> Vec<T> {
        self.math(MathOp::Cbrt)
    }

    fn exp(&self) -> Vec<T> {
        self.math(MathOp::Exp)
    }

    fn ln(&self) -> Vec<T> {
        self.math(MathOp::Ln)
    }

    fn par_sin(&self) -> Vec<T> {
        self.par_math(MathOp::Sin)
    }

    fn par_cos(&self) -> Vec<T> {
        self.par_math(MathOp::Cos)
    }

    fn par_tan(&self) -> Vec<T> {
        self.par_math(MathOp::Tan)
    }

    fn par_asin(&self) -> Vec<T> {
        self.par_math(MathOp::Asin)
    }

    fn par_acos(&self) -> Vec<T> {
        self.par_math(MathOp::Acos)
    }

    fn par_atan(&self) -> Vec<T> {
        self.par_math(MathOp::Atan)
    }

    fn par_sqrt(&self) -> Vec<T> {
        self.par_math(MathOp::Sqrt)
    }

    fn par_cbrt(&self) -> Vec<T> {
        self.par_math(MathOp::Cbrt)
    }

    fn par_exp(&self) -> Vec<T> {
        self.par_math(MathOp::Exp)
    }

    fn par_ln(&self) -> Vec<T> {
        self.par_math(MathOp::Ln)
    }
}

impl<T: ElementRegisters + MathElement> SliceMath<T> for [T] {
    #[inline(always)]
    fn math(&self, op: MathOp) -> Vec<T> {
        simd_math(self, op)
    }

    #[inline(always)]
    fn par_math(&self, op: MathOp) -> Vec<T> {
        par_simd_math(self, op)
    }
}
