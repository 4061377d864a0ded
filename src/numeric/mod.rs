//! Numeric capabilities shared by every primitive.
//!
//! Each primitive is written once against [`Numeric`] (and [`AtomicNumeric`]
//! where it needs shared accumulators) instead of once per element type. The
//! trait is implemented for the fixed-width integers from 8 to 64 bits and for
//! the three IEEE-754 widths: [`half::f16`], `f32` and `f64`.
//!
//! Besides arithmetic, a `Numeric` exposes its raw bit pattern through an
//! unsigned integer of the same width ([`Numeric::Bits`]) together with the
//! [`Encoding`] of that pattern. The radix ordering transforms in
//! [`crate::ops::ordering`] are built purely from these two pieces.

use std::fmt::Debug;

use half::f16;
use num::traits::{Bounded, One, PrimInt, Unsigned, Zero};

pub mod atomic;

pub use atomic::AtomicNumeric;

/// How the bits of a numeric type encode its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Plain binary; unsigned comparison of the bits is numeric order.
    Unsigned,
    /// Two's complement signed integer.
    TwosComplement,
    /// IEEE-754 sign / exponent / mantissa.
    Float,
}

/// A fixed-width numeric element type.
///
/// # Bounds
///
/// - `Copy + Send + Sync + 'static` - elements are moved freely between workers
/// - `Bounded + Zero + One` - identity and limit values from `num`
/// - `PartialOrd` - comparison for min/max combines
pub trait Numeric:
    Copy + Send + Sync + PartialOrd + Debug + Bounded + Zero + One + 'static
{
    /// Unsigned integer with exactly the same width as `Self`.
    type Bits: PrimInt + Unsigned + Into<u64> + Send + Sync + Debug + 'static;

    /// Width of the type in bits.
    const BITS: u32;

    /// Encoding of the bit pattern returned by [`Numeric::to_bits`].
    const ENCODING: Encoding;

    /// Short type name, used in log output.
    const NAME: &'static str;

    /// Smallest value in numeric order (`-inf` for floats).
    const LOWEST: Self;

    /// Largest value in numeric order (`+inf` for floats).
    const HIGHEST: Self;

    /// Reinterprets the value as its raw bit pattern.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets a raw bit pattern as a value.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Sum with two's complement wraparound for integers, IEEE addition for floats.
    fn wrapping_sum(self, rhs: Self) -> Self;

    /// The smaller of two values. A single NaN operand is ignored.
    fn min_of(self, rhs: Self) -> Self;

    /// The larger of two values. A single NaN operand is ignored.
    fn max_of(self, rhs: Self) -> Self;

    /// Converts a linear index with `as`-cast semantics (integers truncate).
    fn from_index(index: u64) -> Self;

    /// Lossy conversion to `f64`.
    fn to_f64(self) -> f64;

    /// Conversion to `i128`; exact for integers, truncating and saturating for floats.
    fn to_i128(self) -> i128;
}

macro_rules! impl_numeric_int {
    ($($t:ty => $bits:ty, $encoding:expr;)*) => {$(
        impl Numeric for $t {
            type Bits = $bits;

            const BITS: u32 = <$t>::BITS;
            const ENCODING: Encoding = $encoding;
            const NAME: &'static str = stringify!($t);
            const LOWEST: Self = <$t>::MIN;
            const HIGHEST: Self = <$t>::MAX;

            #[inline(always)]
            fn to_bits(self) -> $bits {
                self as $bits
            }

            #[inline(always)]
            fn from_bits(bits: $bits) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn wrapping_sum(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn min_of(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }

            #[inline(always)]
            fn max_of(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }

            #[inline(always)]
            fn from_index(index: u64) -> Self {
                index as $t
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn to_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

impl_numeric_int! {
    i8 => u8, Encoding::TwosComplement;
    i16 => u16, Encoding::TwosComplement;
    i32 => u32, Encoding::TwosComplement;
    i64 => u64, Encoding::TwosComplement;
    u8 => u8, Encoding::Unsigned;
    u16 => u16, Encoding::Unsigned;
    u32 => u32, Encoding::Unsigned;
    u64 => u64, Encoding::Unsigned;
}

macro_rules! impl_numeric_float {
    ($($t:ty => $bits:ty, $width:expr, $from_index:expr, $to_f64:expr;)*) => {$(
        impl Numeric for $t {
            type Bits = $bits;

            const BITS: u32 = $width;
            const ENCODING: Encoding = Encoding::Float;
            const NAME: &'static str = stringify!($t);
            const LOWEST: Self = <$t>::NEG_INFINITY;
            const HIGHEST: Self = <$t>::INFINITY;

            #[inline(always)]
            fn to_bits(self) -> $bits {
                <$t>::to_bits(self)
            }

            #[inline(always)]
            fn from_bits(bits: $bits) -> Self {
                <$t>::from_bits(bits)
            }

            #[inline(always)]
            fn wrapping_sum(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn min_of(self, rhs: Self) -> Self {
                if self.is_nan() || rhs < self {
                    rhs
                } else {
                    self
                }
            }

            #[inline(always)]
            fn max_of(self, rhs: Self) -> Self {
                if self.is_nan() || rhs > self {
                    rhs
                } else {
                    self
                }
            }

            #[inline(always)]
            fn from_index(index: u64) -> Self {
                ($from_index)(index)
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                ($to_f64)(self)
            }

            #[inline(always)]
            fn to_i128(self) -> i128 {
                ($to_f64)(self) as i128
            }
        }
    )*};
}

impl_numeric_float! {
    f16 => u16, 16, |index: u64| f16::from_f64(index as f64), f64::from;
    f32 => u32, 32, |index: u64| index as f32, |value: f32| value as f64;
    f64 => u64, 64, |index: u64| index as f64, |value: f64| value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_roundtrip_preserves_pattern() {
        assert_eq!((-1i8).to_bits(), 0xFF);
        assert_eq!(<i8 as Numeric>::from_bits(0x80), i8::MIN);
        assert_eq!(Numeric::to_bits(-0.0f32), 0x8000_0000);
        assert_eq!(Numeric::to_bits(f16::NEG_INFINITY), 0xFC00);
        assert_eq!(<f64 as Numeric>::from_bits(0x3FF0_0000_0000_0000), 1.0);
    }

    #[test]
    fn test_bit_widths() {
        assert_eq!(<i8 as Numeric>::BITS, 8);
        assert_eq!(<u16 as Numeric>::BITS, 16);
        assert_eq!(<f16 as Numeric>::BITS, 16);
        assert_eq!(<f32 as Numeric>::BITS, 32);
        assert_eq!(<i64 as Numeric>::BITS, 64);
    }

    #[test]
    fn test_wrapping_sum_wraps_integers() {
        assert_eq!(i32::MAX.wrapping_sum(1), i32::MIN);
        assert_eq!(255u8.wrapping_sum(2), 1);
        assert_eq!(1.5f32.wrapping_sum(2.0), 3.5);
    }

    #[test]
    fn test_float_min_max_ignore_single_nan() {
        assert_eq!(f32::NAN.min_of(2.0), 2.0);
        assert_eq!(2.0f32.min_of(f32::NAN), 2.0);
        assert_eq!(f64::NAN.max_of(-3.0), -3.0);
        assert_eq!(f16::from_f32(1.0).max_of(f16::from_f32(4.0)), f16::from_f32(4.0));
    }

    #[test]
    fn test_from_index_truncates() {
        assert_eq!(<i8 as Numeric>::from_index(300), 44);
        assert_eq!(<u8 as Numeric>::from_index(300), 44);
        assert_eq!(<i16 as Numeric>::from_index(40_000), -25_536);
        assert_eq!(<f32 as Numeric>::from_index(5), 5.0);
        assert_eq!(<f16 as Numeric>::from_index(7), f16::from_f32(7.0));
    }

    #[test]
    fn test_to_i128_saturates_floats() {
        assert_eq!(u64::MAX.to_i128(), u64::MAX as i128);
        assert_eq!((-7i8).to_i128(), -7);
        assert_eq!(3.9f32.to_i128(), 3);
        assert_eq!(f64::NEG_INFINITY.to_i128(), i128::MIN);
        assert_eq!(f32::NAN.to_i128(), 0);
    }
}
