//! BitMask helpers.
//!
//! A BitMask is a `u64` whose bit `i` gates element `i` of a register. The
//! register types turn BitMasks into mask registers through
//! [`SimdRegister::set_masked`](crate::simd::SimdRegister::set_masked); this
//! module holds the pieces shared by them and the compile-time
//! [`index_mask!`](crate::index_mask) builder.

/// BitMask with the low `count` bits set.
#[inline(always)]
pub const fn low_bits(count: usize) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

/// Splits `mask` for a register made of two lanes of `lane_count` elements.
///
/// Returns `(low, high)`: `low` gates `lane_0` and `high`, shifted down by
/// `lane_count`, gates `lane_1`.
#[inline(always)]
pub const fn split(mask: u64, lane_count: usize) -> (u64, u64) {
    let low = mask & low_bits(lane_count);
    let high = if lane_count >= 64 {
        0
    } else {
        mask >> lane_count
    };
    (low, high)
}

/// Whether `mask` fits a register of `count` elements.
#[inline(always)]
pub const fn fits(mask: u64, count: usize) -> bool {
    mask & !low_bits(count) == 0
}

/// BitMask from one flag per element, element `0` first.
///
/// ```
/// use simdreg::simd::mask::bitmask_from_flags;
///
/// assert_eq!(bitmask_from_flags([true, false, true, true]), 0b1101);
/// ```
pub const fn bitmask_from_flags<const N: usize>(flags: [bool; N]) -> u64 {
    assert!(N <= 64, "a BitMask holds at most 64 flags");

    let mut mask = 0u64;
    let mut i = 0;
    while i < N {
        if flags[i] {
            mask |= 1 << i;
        }
        i += 1;
    }
    mask
}

/// Mask register from compile-time per-element flags.
///
/// `index_mask!(Reg; f0, f1, ...)` takes exactly `Reg::LANES` boolean
/// constants, element `0` first, and expands to
/// [`set_masked_const`](crate::simd::SimdRegister::set_masked_const). A flag
/// count that does not match the register fails to compile, and all-false
/// flags produce the zero register.
///
/// ```
/// use simdreg::index_mask;
/// use simdreg::simd::{I32x4, SimdRegister};
///
/// let mask = index_mask!(I32x4; true, false, false, true);
/// assert_eq!(mask.move_mask(), 0b1001);
/// assert_eq!(index_mask!(I32x4; false, false, false, false), I32x4::zero());
/// ```
///
/// Three flags for a four-element register:
///
/// ```compile_fail
/// use simdreg::index_mask;
/// use simdreg::simd::{I32x4, SimdRegister};
///
/// let _ = index_mask!(I32x4; true, false, true);
/// ```
#[macro_export]
macro_rules! index_mask {
    ($reg:ty; $($flag:expr),+ $(,)?) => {{
        const FLAGS: &[bool] = &[$($flag),+];
        const _: () = assert!(
            FLAGS.len() == <$reg as $crate::simd::SimdRegister>::LANES,
            "index_mask! needs exactly one flag per element"
        );
        <$reg as $crate::simd::SimdRegister>::set_masked_const::<
            { $crate::simd::mask::bitmask_from_flags([$($flag),+]) },
        >()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_bits() {
        assert_eq!(low_bits(0), 0);
        assert_eq!(low_bits(4), 0xF);
        assert_eq!(low_bits(64), u64::MAX);
    }

    #[test]
    fn test_split() {
        assert_eq!(split(0b1011_0110, 4), (0b0110, 0b1011));
        assert_eq!(split(u64::MAX, 32), (0xFFFF_FFFF, 0xFFFF_FFFF));
        assert_eq!(split(u64::MAX, 64), (u64::MAX, 0));
    }

    #[test]
    fn test_fits() {
        assert!(fits(0xFF, 8));
        assert!(!fits(0x100, 8));
        assert!(fits(u64::MAX, 64));
    }

    #[test]
    fn test_bitmask_from_flags() {
        assert_eq!(bitmask_from_flags([false; 8]), 0);
        assert_eq!(bitmask_from_flags([true; 64]), u64::MAX);
        assert_eq!(bitmask_from_flags([false, true]), 0b10);
    }
}
