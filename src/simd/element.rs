//! Element types that can live inside a register.
//!
//! [`Element`] is sealed and implemented for exactly the ten supported kinds:
//! `i8 i16 i32 i64 u8 u16 u32 u64 f32 f64`. Asking for a register of any other
//! element type fails to compile because the impl does not exist, and each
//! impl checks its own width against [`is_valid_element_bits`] in a const
//! assertion.
//!
//! Every element exposes a 64-bit bit image (`to_bits` / `from_bits`) so that
//! bitwise operations, masks and reinterpretation can be written once for all
//! kinds.

use std::fmt::Debug;

use num::traits::Float;

mod sealed {
    pub trait Sealed {}
}

/// Element kind: the first half of the element-type descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Two's complement signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// IEEE 754 binary floating point.
    Float,
}

/// Element-type descriptor: kind, width and (derived) signedness.
///
/// Two registers with equal total width can be *cast* into each other
/// whatever their descriptors; a *convert* changes values and is only
/// meaningful when the descriptors differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementDesc {
    /// Kind of the element.
    pub kind: ElementKind,
    /// Width of the element in bits.
    pub bits: u32,
}

impl ElementDesc {
    /// Whether the element carries a sign.
    pub const fn is_signed(&self) -> bool {
        !matches!(self.kind, ElementKind::Unsigned)
    }

    /// Whether the element is a floating point number.
    pub const fn is_float(&self) -> bool {
        matches!(self.kind, ElementKind::Float)
    }
}

/// Validity predicate for an element width.
///
/// Integers may be 8, 16, 32 or 64 bits wide, floats 32 or 64.
pub const fn is_valid_element_bits(kind: ElementKind, bits: u32) -> bool {
    match kind {
        ElementKind::Float => matches!(bits, 32 | 64),
        ElementKind::Signed | ElementKind::Unsigned => matches!(bits, 8 | 16 | 32 | 64),
    }
}

/// Largest element count of any register: 512 bits of 8-bit elements.
pub(crate) const MAX_LANES: usize = 64;

/// Call-scoped scratch buffer large enough for any register.
pub(crate) type Scratch<T> = [T; MAX_LANES];

#[inline(always)]
pub(crate) fn scratch<T: Element>() -> Scratch<T> {
    [T::ZERO; MAX_LANES]
}

/// A scalar that can occupy one element of a register.
pub trait Element:
    sealed::Sealed + Copy + Debug + PartialEq + PartialOrd + Send + Sync + 'static
{
    /// Kind of the element.
    const KIND: ElementKind;
    /// Width of the element in bits.
    const BITS: u32;
    /// Descriptor built from kind and width.
    const DESC: ElementDesc = ElementDesc {
        kind: Self::KIND,
        bits: Self::BITS,
    };
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// All `BITS` low bits set: the bit image of an active mask element.
    const ALL_ONES: u64 = if Self::BITS == 64 {
        u64::MAX
    } else {
        (1u64 << Self::BITS) - 1
    };

    /// Bit image of the element, zero extended to 64 bits.
    fn to_bits(self) -> u64;

    /// Rebuilds an element from the low `BITS` bits of `bits`.
    fn from_bits(bits: u64) -> Self;

    /// Wrapping for integers, IEEE for floats.
    fn simd_add(self, rhs: Self) -> Self;
    fn simd_sub(self, rhs: Self) -> Self;
    fn simd_mul(self, rhs: Self) -> Self;
    fn simd_neg(self) -> Self;
    fn simd_abs(self) -> Self;

    /// `self * b + c`, fused for floats, wrapping for integers.
    fn simd_mul_add(self, b: Self, c: Self) -> Self;

    /// Hardware convention: `if self < rhs { self } else { rhs }`.
    #[inline(always)]
    fn simd_min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    /// Hardware convention: `if self > rhs { self } else { rhs }`.
    #[inline(always)]
    fn simd_max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }

    /// Most significant bit of the bit image (the sign bit for signed kinds).
    #[inline(always)]
    fn msb(self) -> bool {
        (self.to_bits() >> (Self::BITS - 1)) & 1 == 1
    }

    /// All bits set when `active`, all bits clear otherwise.
    ///
    /// Computed as the all-ones constant multiplied by 0 or 1 so that no
    /// branch depends on the mask.
    #[inline(always)]
    fn mask_value(active: bool) -> Self {
        Self::from_bits(Self::ALL_ONES.wrapping_mul(active as u64))
    }
}

/// Integer elements.
pub trait IntElement: Element {
    /// Float type integer transcendental functions are computed in.
    type Float: FloatElement;

    /// Shift left by `shift` bits, `shift < BITS`.
    fn simd_shl(self, shift: u32) -> Self;

    /// Shift right by `shift` bits: arithmetic for signed, logical for unsigned.
    fn simd_shr(self, shift: u32) -> Self;

    /// Converts into the float type, exact for 8, 16 and 32-bit elements.
    fn to_float(self) -> Self::Float;

    /// Truncates toward zero, saturating at the integer range, NaN to zero.
    fn from_float(value: Self::Float) -> Self;
}

/// Floating point elements.
pub trait FloatElement: Element + Float {}

macro_rules! int_element {
    ($t:ty, $u:ty, $kind:expr, $float:ty, $abs:expr) => {
        impl sealed::Sealed for $t {}

        const _: () = assert!(is_valid_element_bits(
            $kind,
            (core::mem::size_of::<$t>() * 8) as u32
        ));

        impl Element for $t {
            const KIND: ElementKind = $kind;
            const BITS: u32 = (core::mem::size_of::<$t>() * 8) as u32;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as $u as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $u as $t
            }

            #[inline(always)]
            fn simd_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn simd_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn simd_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline(always)]
            fn simd_neg(self) -> Self {
                self.wrapping_neg()
            }

            #[inline(always)]
            fn simd_abs(self) -> Self {
                ($abs)(self)
            }

            #[inline(always)]
            fn simd_mul_add(self, b: Self, c: Self) -> Self {
                self.wrapping_mul(b).wrapping_add(c)
            }
        }

        impl IntElement for $t {
            type Float = $float;

            #[inline(always)]
            fn simd_shl(self, shift: u32) -> Self {
                self.wrapping_shl(shift)
            }

            #[inline(always)]
            fn simd_shr(self, shift: u32) -> Self {
                self.wrapping_shr(shift)
            }

            #[inline(always)]
            fn to_float(self) -> $float {
                self as $float
            }

            #[inline(always)]
            fn from_float(value: $float) -> Self {
                value as $t
            }
        }
    };
}

int_element!(i8, u8, ElementKind::Signed, f32, |x: i8| x.wrapping_abs());
int_element!(i16, u16, ElementKind::Signed, f32, |x: i16| x.wrapping_abs());
int_element!(i32, u32, ElementKind::Signed, f64, |x: i32| x.wrapping_abs());
int_element!(i64, u64, ElementKind::Signed, f64, |x: i64| x.wrapping_abs());
int_element!(u8, u8, ElementKind::Unsigned, f32, |x: u8| x);
int_element!(u16, u16, ElementKind::Unsigned, f32, |x: u16| x);
int_element!(u32, u32, ElementKind::Unsigned, f64, |x: u32| x);
int_element!(u64, u64, ElementKind::Unsigned, f64, |x: u64| x);

macro_rules! float_element {
    ($t:ty, $u:ty) => {
        impl sealed::Sealed for $t {}

        const _: () = assert!(is_valid_element_bits(
            ElementKind::Float,
            (core::mem::size_of::<$t>() * 8) as u32
        ));

        impl Element for $t {
            const KIND: ElementKind = ElementKind::Float;
            const BITS: u32 = (core::mem::size_of::<$t>() * 8) as u32;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                <$t>::to_bits(self) as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                <$t>::from_bits(bits as $u)
            }

            #[inline(always)]
            fn simd_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn simd_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn simd_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn simd_neg(self) -> Self {
                -self
            }

            #[inline(always)]
            fn simd_abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline(always)]
            fn simd_mul_add(self, b: Self, c: Self) -> Self {
                <$t>::mul_add(self, b, c)
            }
        }

        impl FloatElement for $t {}
    };
}

float_element!(f32, u32);
float_element!(f64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors() {
        assert_eq!(
            i16::DESC,
            ElementDesc {
                kind: ElementKind::Signed,
                bits: 16
            }
        );
        assert!(u64::DESC.bits == 64 && !u64::DESC.is_signed());
        assert!(f32::DESC.is_float() && f32::DESC.is_signed());
        assert!(!is_valid_element_bits(ElementKind::Float, 16));
        assert!(!is_valid_element_bits(ElementKind::Signed, 128));
    }

    #[test]
    fn test_bit_image_round_trip() {
        assert_eq!((-1i8).to_bits(), 0xFF);
        assert_eq!(i8::from_bits(0xFF), -1);
        assert_eq!((-2i32).to_bits(), 0xFFFF_FFFE);
        assert_eq!(<f32 as Element>::from_bits(Element::to_bits(1.5f32)), 1.5);
        assert_eq!(Element::to_bits(-0.0f64), 0x8000_0000_0000_0000);
    }

    #[test]
    fn test_mask_values() {
        assert_eq!(i32::mask_value(true), -1);
        assert_eq!(i32::mask_value(false), 0);
        assert_eq!(u16::mask_value(true), u16::MAX);
        assert_eq!(Element::to_bits(f32::mask_value(true)), 0xFFFF_FFFF);
        assert_eq!(Element::to_bits(f64::mask_value(false)), 0);
        assert!(u8::mask_value(true).msb());
        assert!(!u8::mask_value(false).msb());
    }

    #[test]
    fn test_wrapping_integer_arithmetic() {
        assert_eq!(i8::MAX.simd_add(1), i8::MIN);
        assert_eq!(0u32.simd_sub(1), u32::MAX);
        assert_eq!(i16::MIN.simd_abs(), i16::MIN);
        assert_eq!(5u8.simd_neg(), 251);
        assert_eq!(3i64.simd_mul_add(4, -5), 7);
    }

    #[test]
    fn test_shifts() {
        assert_eq!((-8i32).simd_shr(1), -4);
        assert_eq!(0x80u8.simd_shr(7), 1);
        assert_eq!(1u16.simd_shl(15), 0x8000);
    }

    #[test]
    fn test_float_conversion_truncates() {
        assert_eq!(i32::from_float(2.9), 2);
        assert_eq!(i32::from_float(-2.9), -2);
        assert_eq!(u8::from_float(-3.0), 0);
        assert_eq!(i8::from_float(1000.0), i8::MAX);
        assert_eq!(i64::from_float(f64::NAN), 0);
    }

    #[test]
    fn test_float_min_follows_hardware_operand_order() {
        assert!(f32::NAN.simd_min(1.0) == 1.0);
        assert!(1.0f32.simd_min(f32::NAN).is_nan());
        assert_eq!(2.0f64.simd_max(-3.0), 2.0);
    }
}
