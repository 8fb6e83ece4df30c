//! Transcendental functions on integer registers.
//!
//! Integer registers have no hardware sine, root or logarithm. Instead the
//! elements are widened into the element's float type
//! ([`IntElement::Float`]), processed a float register at a time, and
//! truncated back toward zero. Nothing here computes a function itself: the
//! float register's own [`SimdMath`] does the work.

use crate::simd::{
    element::{scratch, FloatElement, IntElement},
    math::MathOp,
    native::Native,
    traits::{SimdMath, SimdRegister},
};

/// Float element with a register to run integer fallbacks through.
pub trait FallbackFloat: FloatElement {
    /// 128-bit float register, always native.
    type Register: SimdMath<Elem = Self>;
}

impl FallbackFloat for f32 {
    type Register = Native<f32, 4>;
}

impl FallbackFloat for f64 {
    type Register = Native<f64, 2>;
}

/// Applies `op` to integer `values` in place through float registers.
///
/// Each group of `Register::LANES` values is widened, loaded (a short last
/// group is zero padded), transformed, stored and narrowed with
/// [`IntElement::from_float`], which truncates toward zero and saturates.
pub fn via_float<T>(op: MathOp, values: &mut [T])
where
    T: IntElement,
    T::Float: FallbackFloat,
{
    let group = <<T::Float as FallbackFloat>::Register as SimdRegister>::LANES;
    let mut floats = scratch::<T::Float>();

    for chunk in values.chunks_mut(group) {
        let len = chunk.len();
        for (f, v) in floats[..len].iter_mut().zip(chunk.iter()) {
            *f = v.to_float();
        }

        <T::Float as FallbackFloat>::Register::load(&floats[..len])
            .math(op)
            .store(&mut floats[..len]);

        for (v, f) in chunk.iter_mut().zip(floats[..len].iter()) {
            *v = T::from_float(*f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_group() {
        // three i64 values against a two-element f64 register
        let mut values = [16i64, 81, 144];
        via_float(MathOp::Sqrt, &mut values);
        assert_eq!(values, [4, 9, 12]);
    }

    #[test]
    fn test_negative_results_truncate_toward_zero() {
        let mut values = [4i16, 5, 6, 2];
        via_float(MathOp::Sin, &mut values);
        // sin(4) = -0.757, sin(5) = -0.959, sin(6) = -0.279, sin(2) = 0.909
        assert_eq!(values, [0, 0, 0, 0]);

        let mut values = [-100i32, 100];
        via_float(MathOp::Atan, &mut values);
        assert_eq!(values, [-1, 1]);
    }

    #[test]
    fn test_unsigned_saturates() {
        let mut values = [200u8, 1, 0];
        via_float(MathOp::Exp, &mut values);
        // exp(200) overflows u8, exp(1) = 2.718, exp(0) = 1
        assert_eq!(values, [u8::MAX, 2, 1]);
    }
}
