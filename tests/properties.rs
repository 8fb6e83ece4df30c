//! Property tests for masks, reinterpretation, conversion and lane layout.

use proptest::prelude::*;

use simdreg::index_mask;
use simdreg::simd::{
    mask, Cast, Composite, Element, F32x8, F64x4, I32x16, I32x8, I8x64, Narrow, Native,
    SimdRegister, U16x16, U8x32, Widen,
};

fn bits<R: SimdRegister>(reg: R) -> Vec<u64> {
    reg.to_vec().into_iter().map(Element::to_bits).collect()
}

proptest! {
    #[test]
    fn mask_round_trip_native(m in 0u64..=0xFFFF) {
        prop_assert_eq!(Native::<i8, 16>::set_masked(m).move_mask(), m);
        prop_assert_eq!(Native::<f32, 4>::set_masked(m & 0xF).move_mask(), m & 0xF);
    }

    #[test]
    fn mask_round_trip_composite(m in any::<u64>()) {
        prop_assert_eq!(I8x64::set_masked(m).move_mask(), m);
        prop_assert_eq!(Composite::<Composite<Native<i8, 16>>>::set_masked(m).move_mask(), m);

        let m32 = m & mask::low_bits(32);
        prop_assert_eq!(U8x32::set_masked(m32).move_mask(), m32);

        let m8 = m & 0xFF;
        prop_assert_eq!(F32x8::set_masked(m8).move_mask(), m8);
        prop_assert_eq!(Composite::<Native<f64, 2>>::set_masked(m & 0xF).move_mask(), m & 0xF);
    }

    #[test]
    fn mask_elements_are_all_or_nothing(m in 0u64..=0xFF) {
        let reg = I32x8::set_masked(m);
        for i in 0..8 {
            let expected = if (m >> i) & 1 == 1 { -1 } else { 0 };
            prop_assert_eq!(reg.extract(i), expected);
        }
    }

    #[test]
    fn cast_round_trip(values in prop::array::uniform8(any::<u32>())) {
        let original = Native::<u32, 8>::from_array(values);
        let as_bytes: Native<u8, 32> = original.cast();
        let as_floats: Native<f32, 8> = as_bytes.cast();
        let back: Native<u32, 8> = as_floats.cast();
        prop_assert_eq!(back, original);

        let emulated = Composite::<Native<u32, 4>>::set(&values);
        let as_f64: Composite<Native<f64, 2>> = emulated.cast();
        let back: Composite<Native<u32, 4>> = as_f64.cast();
        prop_assert_eq!(back, emulated);
    }

    #[test]
    fn widen_then_narrow_is_identity(values in prop::array::uniform4(any::<i32>())) {
        let reg = Native::<i32, 4>::from_array(values);

        let native_wide: Native<i32, 8> = reg.widen();
        let native_back: Native<i32, 4> = native_wide.narrow();
        prop_assert_eq!(native_back, reg);

        let emulated_wide: Composite<Native<i32, 4>> = reg.widen();
        prop_assert_eq!(emulated_wide.lane_1(), Native::zero());
        let emulated_back: Native<i32, 4> = emulated_wide.narrow();
        prop_assert_eq!(emulated_back, reg);

        prop_assert_eq!(bits(native_wide), bits(emulated_wide));
    }

    #[test]
    fn convert_round_trip_exact_integers(values in prop::array::uniform8(-(1i32 << 24)..=(1 << 24))) {
        // every integer of magnitude up to 2^24 is exact in an f32 mantissa
        let ints = I32x8::set(&values);
        let floats: F32x8 = ints.convert();
        let back: I32x8 = floats.convert();
        prop_assert_eq!(back.to_vec(), values.to_vec());
    }

    #[test]
    fn convert_round_trip_through_f64(values in prop::array::uniform4(any::<i32>())) {
        let ints = Native::<i32, 4>::from_array(values);
        let doubles: F64x4 = ints.convert();
        let back: Native<i32, 4> = doubles.convert();
        prop_assert_eq!(back.to_array(), values);
    }

    #[test]
    fn lane_split_invariant(values in prop::collection::vec(any::<i32>(), 16)) {
        let reg = Composite::<Composite<Native<i32, 4>>>::set(&values);
        prop_assert_eq!(reg.lane_0().to_vec(), values[..8].to_vec());
        prop_assert_eq!(reg.lane_1().to_vec(), values[8..].to_vec());
        prop_assert_eq!(reg.lane_0().lane_1().to_vec(), values[4..8].to_vec());
        prop_assert_eq!(reg.lane_1().lane_0().to_vec(), values[8..12].to_vec());

        let loaded = Composite::<Native<i32, 8>>::load(&values);
        prop_assert_eq!(loaded.lane_0().to_vec(), values[..8].to_vec());
        prop_assert_eq!(loaded.lane_1().to_vec(), values[8..].to_vec());
    }

    #[test]
    fn horizontal_reductions(values in prop::collection::vec(any::<u16>(), 16)) {
        let reg = U16x16::set(&values);
        let min = *values.iter().min().unwrap();
        let max = *values.iter().max().unwrap();

        prop_assert_eq!(reg.reduce_min(), min);
        prop_assert_eq!(reg.reduce_max(), max);
        prop_assert_eq!(reg.hmin(), U16x16::splat(min));
        prop_assert_eq!(reg.hmax(), U16x16::splat(max));
        prop_assert_eq!(reg.reduce_min_as::<u64>(), min as u64);

        let sum = values.iter().fold(0u16, |acc, v| acc.wrapping_add(*v));
        prop_assert_eq!(reg.reduce_sum(), sum);
    }

    #[test]
    fn setr_reverses_set(values in prop::collection::vec(any::<i32>(), 16)) {
        let reversed: Vec<i32> = values.iter().rev().copied().collect();
        prop_assert_eq!(I32x16::setr(&values), I32x16::set(&reversed));
        prop_assert_eq!(
            Composite::<Composite<Native<i32, 4>>>::setr(&values),
            Composite::<Composite<Native<i32, 4>>>::set(&reversed)
        );
    }

    #[test]
    fn partial_load_zero_pads(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let reg = I32x16::load(&values);
        for i in 0..16 {
            let expected = values.get(i).copied().unwrap_or(0);
            prop_assert_eq!(reg.extract(i), expected);
        }
    }
}

#[test]
fn zero_masks_are_zero_registers() {
    assert_eq!(I32x8::set_masked(0), I32x8::zero());
    assert_eq!(I32x8::set_masked_const::<0>(), I32x8::zero());
    assert_eq!(
        Composite::<Composite<Native<i32, 4>>>::set_masked_const::<0>(),
        Composite::zero()
    );
    assert_eq!(
        index_mask!(I32x8; false, false, false, false, false, false, false, false),
        I32x8::zero()
    );
}

#[test]
fn index_mask_matches_runtime_mask() {
    let from_flags = index_mask!(I32x8; true, false, true, true, false, false, false, true);
    assert_eq!(from_flags, I32x8::set_masked(0b1000_1101));
    assert_eq!(from_flags.move_mask(), 0b1000_1101);

    let emulated = index_mask!(Composite<Native<f64, 2>>; false, true, true, false);
    assert_eq!(emulated.move_mask(), 0b0110);
}
