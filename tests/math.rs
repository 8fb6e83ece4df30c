//! Precision of register transcendental functions against the scalar routines.

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdreg::simd::{
    Composite, F32x16, F32x4, F32x8, F64x4, I16x8, I32x8, MathOp, Native, SimdMath, SimdRegister,
    U8x16,
};

fn assert_close(input: f32, expected: f32, actual: f32, what: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{what}({input}) should be NaN, got {actual}");
        return;
    }

    let absolute_error = (expected - actual).abs();
    let relative_error = if expected != 0.0 {
        absolute_error / expected.abs()
    } else {
        absolute_error
    };

    assert!(
        absolute_error < 1e-4 || relative_error < 1e-4,
        "Precision error too large for {what}({input}): scalar={expected}, simd={actual}, abs_error={absolute_error:.2e}, rel_error={relative_error:.2e}"
    );
}

fn check_f32<R>(inputs: &[f32], op: MathOp)
where
    R: SimdMath<Elem = f32>,
{
    for chunk in inputs.chunks(R::LANES) {
        let out = R::load(chunk).math(op).to_vec();
        for (input, actual) in chunk.iter().zip(out.iter()) {
            assert_close(*input, op.apply_scalar(*input), *actual, op.name());
        }
    }
}

#[test]
fn test_inverse_trig_precision() {
    let inputs = [
        -1.0f32, -0.99, -0.75, -0.5, -0.49, -0.25, -0.01, 0.0, 0.01, 0.25, 0.49, 0.5, 0.75, 0.99,
        1.0, 0.3,
    ];

    for op in [MathOp::Asin, MathOp::Acos, MathOp::Atan] {
        check_f32::<F32x4>(&inputs, op);
        check_f32::<F32x8>(&inputs, op);
        check_f32::<F32x16>(&inputs, op);
    }
}

#[test]
fn test_inverse_trig_out_of_domain() {
    let reg = F32x8::set(&[1.5, -1.5, 2.0, -100.0, f32::NAN, 0.5, 0.0, -0.5]);
    let asin = reg.asin().to_vec();
    let acos = reg.acos().to_vec();
    for i in 0..5 {
        assert!(asin[i].is_nan(), "asin lane {i} = {}", asin[i]);
        assert!(acos[i].is_nan(), "acos lane {i} = {}", acos[i]);
    }
    assert!((asin[5] - 0.5f32.asin()).abs() < 1e-5);
}

#[test]
fn test_random_inputs_all_ops() {
    let mut rng = StdRng::seed_from_u64(7);

    let wide: Vec<f32> = (0..256)
        .map(|_| rng.random_range(-4.0 * PI..=4.0 * PI))
        .collect();
    let unit: Vec<f32> = (0..256).map(|_| rng.random_range(-1.0..=1.0)).collect();
    let positive: Vec<f32> = (0..256).map(|_| rng.random_range(0.001..=50.0)).collect();

    for op in [MathOp::Sin, MathOp::Cos, MathOp::Atan] {
        check_f32::<F32x16>(&wide, op);
    }
    for op in [MathOp::Asin, MathOp::Acos] {
        check_f32::<F32x8>(&unit, op);
    }
    for op in [MathOp::Sqrt, MathOp::Cbrt, MathOp::Exp, MathOp::Ln] {
        check_f32::<Composite<F32x4>>(&positive, op);
    }
}

#[test]
fn test_f64_matches_scalar_exactly() {
    let values = [0.1f64, 1.0, 2.5, 100.0];
    let reg = F64x4::set(&values);

    for op in MathOp::ALL {
        let out = reg.math(op).to_vec();
        for (value, actual) in values.iter().zip(out.iter()) {
            let expected = op.apply_scalar(*value);
            assert!(
                expected.to_bits() == actual.to_bits() || (expected.is_nan() && actual.is_nan()),
                "{}({value}) = {actual}, expected {expected}",
                op.name()
            );
        }
    }
}

#[test]
fn test_tan_tracks_sin_over_cos() {
    let reg = F32x8::set(&[0.1, 0.2, 0.4, 0.8, -0.1, -0.2, -0.4, -0.8]);
    let tan = reg.tan().to_vec();
    let ratio: Vec<f32> = reg
        .sin()
        .to_vec()
        .iter()
        .zip(reg.cos().to_vec().iter())
        .map(|(s, c)| s / c)
        .collect();
    for (t, r) in tan.iter().zip(ratio.iter()) {
        assert!((t - r).abs() < 1e-5);
    }
}

// ================================================================================================
// INTEGER FALLBACK
// ================================================================================================

#[test]
fn test_integer_sqrt_truncates() {
    let reg = I32x8::set(&[0, 1, 2, 3, 15, 16, 17, 2_000_000_000]);
    assert_eq!(reg.sqrt().to_vec(), [0, 1, 1, 1, 3, 4, 4, 44_721]);
}

#[test]
fn test_integer_trig_truncates_toward_zero() {
    // atan(x) for |x| >= 2 lies in (1.1, 1.58)
    let reg = I16x8::set(&[-3, -2, -1, 0, 1, 2, 3, i16::MAX]);
    assert_eq!(reg.atan().to_vec(), [-1, -1, 0, 0, 0, 1, 1, 1]);

    // cos(k) for these k is in (-1, 1), truncating to 0
    let reg = Native::<i64, 2>::set(&[2, 5]);
    assert_eq!(reg.cos().to_array(), [0, 0]);
}

#[test]
fn test_unsigned_fallback_saturates() {
    let values: Vec<u8> = (0..16).map(|i| i * 16).collect();
    let out = U8x16::load(&values).exp().to_vec();
    assert_eq!(out[0], 1);
    assert_eq!(out[1], u8::MAX);
    assert!(out[2..].iter().all(|v| *v == u8::MAX));

    let ln = U8x16::load(&values).ln().to_vec();
    // ln(0) = -inf saturates to 0, ln(16) = 2.77
    assert_eq!(ln[0], 0);
    assert_eq!(ln[1], 2);
}

#[test]
fn test_integer_fallback_matches_across_paths() {
    let values: Vec<i32> = (0..8).map(|i| i * i * 1000 - 7).collect();
    let native = Native::<i32, 8>::load(&values);
    let emulated = Composite::<Native<i32, 4>>::load(&values);

    for op in MathOp::ALL {
        assert_eq!(
            native.math(op).to_vec(),
            emulated.math(op).to_vec(),
            "{}",
            op.name()
        );
    }
}
