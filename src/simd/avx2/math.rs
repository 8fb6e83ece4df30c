//! AVX2 polynomial approximations for 8 packed `f32` values.
//!
//! These back the native `f32` inverse trigonometric functions on AVX2
//! builds. They operate on whole `__m256` registers; the block helpers in
//! [`kernels`](super::kernels) feed them from element buffers.
//!
//! | Function | Domain | Range | Accuracy |
//! |----------|--------|-------|----------|
//! | `_mm256_abs_ps` | All reals | [0, +∞) | Exact |
//! | `_mm256_asin_ps` | [-1, 1] | [-π/2, π/2] | < 1 ULP |
//! | `_mm256_acos_ps` | [-1, 1] | [0, π] | < 1 ULP |
//! | `_mm256_atan_ps` | All reals | (-π/2, π/2) | < 1 ULP |
//!
//! Inputs outside the domain produce NaN. NaN inputs propagate.
//!
//! # Safety
//!
//! All functions require AVX2 and FMA. The module is only compiled when
//! `build.rs` detected both on the build machine.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Clears the sign bit of each element.
///
/// # Safety
///
/// Requires AVX2.
#[inline(always)]
pub(crate) unsafe fn _mm256_abs_ps(f: __m256) -> __m256 {
    // -0.0f32 has bit pattern 0x80000000
    let sign_mask = _mm256_set1_ps(-0.0f32);

    _mm256_castsi256_ps(_mm256_andnot_si256(
        _mm256_castps_si256(sign_mask),
        _mm256_castps_si256(f),
    ))
}

//  Polynomial for (asin(x)/x - 1)/x² on [0, 0.5], Horner form in z = x².
//  Coefficients follow the Taylor series of asin with Remez refinement of the
//  high-order terms.

#[allow(clippy::excessive_precision)]
const ASIN_P0: f32 = 0.16666666666666665741_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P1: f32 = 0.075000000000000000000_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P2: f32 = 0.044642857142857144673_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P3: f32 = 0.030381944444444445175_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P4: f32 = 0.022372159090909091422_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P5: f32 = 0.017352764423076923436_f32;
#[allow(clippy::excessive_precision)]
const ASIN_P6: f32 = 0.013964843750000001053_f32;

/// Arcsine of 8 packed `f32` values.
///
/// For |x| < 0.5 evaluates `x + x³·P(x²)` directly. For |x| ≥ 0.5 uses
/// `asin(x) = sign(x) · (π/2 - 2·asin(√((1-|x|)/2)))`, which brings the
/// polynomial argument back into [0, 0.5].
///
/// # Safety
///
/// Requires AVX2 and FMA.
#[inline(always)]
pub(crate) unsafe fn _mm256_asin_ps(d: __m256) -> __m256 {
    let sign_mask = _mm256_set1_ps(-0.0f32);
    let ones = _mm256_set1_ps(1.0f32);
    let half = _mm256_set1_ps(0.5f32);
    let two = _mm256_set1_ps(2.0f32);
    let pi_2 = _mm256_set1_ps(std::f32::consts::FRAC_PI_2);
    let nan = _mm256_set1_ps(f32::NAN);

    // magnitude only, the sign is restored at the end
    let abs_d = _mm256_andnot_ps(sign_mask, d);

    // |x| > 1 is outside the domain
    let nan_mask = _mm256_cmp_ps(abs_d, ones, _CMP_GT_OS);

    // range reduction keeps the polynomial argument in [0, 0.5]
    let is_ge_05_mask = _mm256_cmp_ps(abs_d, half, _CMP_GE_OS);

    // √((1-|x|)/2) for |x| ≥ 0.5
    let reduced_val = _mm256_sqrt_ps(_mm256_div_ps(_mm256_sub_ps(ones, abs_d), two));

    let x = _mm256_blendv_ps(abs_d, reduced_val, is_ge_05_mask);
    let x2 = _mm256_mul_ps(x, x);

    // Horner: p = p·x² + next coefficient
    let mut p = _mm256_set1_ps(ASIN_P6);
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P5));
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P4));
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P3));
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P2));
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P1));
    p = _mm256_fmadd_ps(p, x2, _mm256_set1_ps(ASIN_P0));

    // x(1 + x²·P(x²))
    let poly_result = _mm256_fmadd_ps(_mm256_mul_ps(p, x2), x, x);

    // π/2 - 2·asin(√((1-|d|)/2))
    let reconstructed_res = _mm256_fnmadd_ps(two, poly_result, pi_2);

    // pick the branch by the original magnitude
    let abs_res = _mm256_blendv_ps(poly_result, reconstructed_res, is_ge_05_mask);

    // asin is odd: put the input sign back
    let sign_bits = _mm256_and_ps(d, sign_mask);
    let signed_res = _mm256_or_ps(abs_res, sign_bits);

    // domain errors win over the computed value
    _mm256_blendv_ps(signed_res, nan, nan_mask)
}

/// Arccosine of 8 packed `f32` values, as `π/2 - asin(x)`.
///
/// Domain handling is inherited from [`_mm256_asin_ps`].
///
/// # Safety
///
/// Requires AVX2 and FMA.
#[inline(always)]
pub(crate) unsafe fn _mm256_acos_ps(d: __m256) -> __m256 {
    let pi_2 = _mm256_set1_ps(std::f32::consts::FRAC_PI_2);

    _mm256_sub_ps(pi_2, _mm256_asin_ps(d))
}

// atan(x) ≈ x · (P1 + x²·(P2 + x²·(... + x²·P9))) on [0, 1]
const ATAN_POLY_1_F: f32 = 0.999_999_9_f32;
const ATAN_POLY_2_F: f32 = -0.333_325_24_f32;
const ATAN_POLY_3_F: f32 = 0.199_848_85_f32;
const ATAN_POLY_4_F: f32 = -0.141_548_07_f32;
const ATAN_POLY_5_F: f32 = 0.104_775_39_f32;
const ATAN_POLY_6_F: f32 = -0.071_943_84_f32;
const ATAN_POLY_7_F: f32 = 0.039_345_413_f32;
const ATAN_POLY_8_F: f32 = -0.014_152_348_f32;
const ATAN_POLY_9_F: f32 = 0.002_398_139_f32;

/// Arctangent of 8 packed `f32` values.
///
/// For |x| ≥ 1 uses `atan(x) = π/2 - atan(1/x)` so the polynomial only sees
/// arguments in [0, 1]; the sign is restored at the end.
///
/// # Safety
///
/// Requires AVX2 and FMA.
#[inline(always)]
pub(crate) unsafe fn _mm256_atan_ps(x: __m256) -> __m256 {
    let zero = _mm256_setzero_ps();
    let one = _mm256_set1_ps(1.0f32);
    let pi_2 = _mm256_set1_ps(std::f32::consts::FRAC_PI_2);

    // keep the sign aside and work on |x|
    let negative_mask = _mm256_cmp_ps(x, zero, _CMP_LT_OS);
    let abs_x = _mm256_abs_ps(x);

    // range reduction: for |x| ≥ 1, atan(x) = π/2 - atan(1/x)
    let more_than_one_mask = _mm256_cmp_ps(abs_x, one, _CMP_GE_OS);
    let reduced_x = _mm256_blendv_ps(abs_x, _mm256_div_ps(one, abs_x), more_than_one_mask);

    let x2 = _mm256_mul_ps(reduced_x, reduced_x);

    // Horner in x², highest order first
    let mut poly = _mm256_set1_ps(ATAN_POLY_9_F);
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_8_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_7_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_6_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_5_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_4_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_3_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_2_F));
    poly = _mm256_fmadd_ps(poly, x2, _mm256_set1_ps(ATAN_POLY_1_F));

    let result = _mm256_mul_ps(poly, reduced_x);

    // undo the range reduction
    let transformed = _mm256_blendv_ps(result, _mm256_sub_ps(pi_2, result), more_than_one_mask);

    // restore the input sign
    _mm256_blendv_ps(transformed, _mm256_sub_ps(zero, transformed), negative_mask)
}
