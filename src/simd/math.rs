//! Elementwise transcendental operations.
//!
//! [`MathOp`] names the ten functions every register offers through
//! [`SimdMath`](crate::simd::SimdMath). [`MathElement`] is the per-element
//! entry point the register types call with a buffer of their elements:
//!
//! - `f32` uses the AVX2 polynomial kernels for `asin`, `acos` and `atan`
//!   when the build machine has AVX2 and FMA, and the scalar `num::Float` routines
//!   otherwise.
//! - `f64` always uses the scalar routines.
//! - Integer elements have no hardware form at all and go through
//!   [`fallback::via_float`](crate::simd::fallback::via_float).

use num::traits::Float;

use crate::simd::{element::Element, fallback};

/// Elementwise transcendental function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MathOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Cbrt,
    Exp,
    /// Natural logarithm.
    Ln,
}

impl MathOp {
    /// Every operation, in declaration order.
    pub const ALL: [MathOp; 10] = [
        MathOp::Sin,
        MathOp::Cos,
        MathOp::Tan,
        MathOp::Asin,
        MathOp::Acos,
        MathOp::Atan,
        MathOp::Sqrt,
        MathOp::Cbrt,
        MathOp::Exp,
        MathOp::Ln,
    ];

    /// Lower-case function name.
    pub const fn name(self) -> &'static str {
        match self {
            MathOp::Sin => "sin",
            MathOp::Cos => "cos",
            MathOp::Tan => "tan",
            MathOp::Asin => "asin",
            MathOp::Acos => "acos",
            MathOp::Atan => "atan",
            MathOp::Sqrt => "sqrt",
            MathOp::Cbrt => "cbrt",
            MathOp::Exp => "exp",
            MathOp::Ln => "ln",
        }
    }

    /// Scalar reference routine for one value.
    #[inline(always)]
    pub fn apply_scalar<F: Float>(self, x: F) -> F {
        match self {
            MathOp::Sin => x.sin(),
            MathOp::Cos => x.cos(),
            MathOp::Tan => x.tan(),
            MathOp::Asin => x.asin(),
            MathOp::Acos => x.acos(),
            MathOp::Atan => x.atan(),
            MathOp::Sqrt => x.sqrt(),
            MathOp::Cbrt => x.cbrt(),
            MathOp::Exp => x.exp(),
            MathOp::Ln => x.ln(),
        }
    }
}

/// Elements that can be run through a [`MathOp`].
pub trait MathElement: Element {
    /// Replaces every value in `values` by `op(value)`.
    fn math_in_place(op: MathOp, values: &mut [Self]);
}

#[inline(always)]
fn scalar_in_place<F: Float>(op: MathOp, values: &mut [F]) {
    for value in values.iter_mut() {
        *value = op.apply_scalar(*value);
    }
}

impl MathElement for f32 {
    #[inline(always)]
    fn math_in_place(op: MathOp, values: &mut [f32]) {
        #[cfg(all(avx2, fma, any(target_arch = "x86", target_arch = "x86_64")))]
        {
            if crate::simd::avx2::kernels::apply(op, values) {
                return;
            }
        }

        scalar_in_place(op, values);
    }
}

impl MathElement for f64 {
    #[inline(always)]
    fn math_in_place(op: MathOp, values: &mut [f64]) {
        scalar_in_place(op, values);
    }
}

macro_rules! int_math_element {
    ($($t:ty),*) => {
        $(
            impl MathElement for $t {
                #[inline(always)]
                fn math_in_place(op: MathOp, values: &mut [$t]) {
                    fallback::via_float(op, values);
                }
            }
        )*
    };
}

int_math_element!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = MathOp::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MathOp::ALL.len());
    }

    #[test]
    fn test_f64_matches_scalar_exactly() {
        let mut values = [0.25f64, 0.5, 0.75, 1.0];
        for op in MathOp::ALL {
            let mut out = values;
            f64::math_in_place(op, &mut out);
            for (o, v) in out.iter().zip(values.iter()) {
                assert_eq!(o.to_bits(), op.apply_scalar(*v).to_bits(), "{}", op.name());
            }
        }
        f64::math_in_place(MathOp::Sqrt, &mut values);
        assert_eq!(values[0], 0.5);
    }

    #[test]
    fn test_f32_close_to_scalar() {
        let inputs: Vec<f32> = (0..19).map(|i| -0.9 + i as f32 * 0.1).collect();
        for op in [MathOp::Asin, MathOp::Acos, MathOp::Atan, MathOp::Sin] {
            let mut out = inputs.clone();
            f32::math_in_place(op, &mut out);
            for (o, v) in out.iter().zip(inputs.iter()) {
                let expected = op.apply_scalar(*v);
                assert!(
                    (o - expected).abs() < 1e-4,
                    "{}({}) = {}, expected {}",
                    op.name(),
                    v,
                    o,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_integer_elements_truncate() {
        let mut values = [0i32, 1, 4, 10, 99, 100, 1_000_000, -4];
        i32::math_in_place(MathOp::Sqrt, &mut values);
        assert_eq!(&values[..7], &[0, 1, 2, 3, 9, 10, 1000]);
        // sqrt(-4) is NaN, which truncates to zero
        assert_eq!(values[7], 0);

        let mut bytes = [1u8, 8, 16, 225, 255];
        u8::math_in_place(MathOp::Sqrt, &mut bytes);
        assert_eq!(bytes, [1, 2, 4, 15, 15]);
    }
}
