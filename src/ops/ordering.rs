//! Order-preserving radix keys.
//!
//! A radix sort compares unsigned digit slices, so every element is first
//! mapped to an unsigned key of the same width whose integer order matches
//! the numeric order of the element:
//!
//! | Encoding        | Ascending key                                        |
//! |-----------------|------------------------------------------------------|
//! | unsigned        | the bits unchanged                                   |
//! | two's complement| the bits with the sign bit flipped                   |
//! | IEEE-754        | sign bit flipped; all other bits too when negative   |
//!
//! The descending key is the bitwise complement of the ascending key. Since
//! [`Numeric::Bits`] has exactly the width of the element, the complement is
//! already masked to that width.
//!
//! No value is special-cased. NaNs order by their bit pattern: positive NaNs
//! after `+inf`, negative NaNs before `-inf`.

use num::traits::{Bounded, One, PrimInt, Zero};

use crate::numeric::{Encoding, Numeric};

/// A radix ordering over `T`.
pub trait RadixOrder<T: Numeric>: Copy + Send + Sync + 'static {
    /// The unsigned key of `value`. Integer order of the keys is the order
    /// this descriptor sorts by.
    fn key(&self, value: T) -> T::Bits;

    /// A value whose key is maximal, i.e. one that sorts last.
    fn default_value(&self) -> T;

    /// Number of key bits.
    #[inline(always)]
    fn bit_width(&self) -> u32 {
        T::BITS
    }

    /// Returns `(key(value) >> shift) & bit_mask`.
    ///
    /// Shifting past the key width yields zero.
    #[inline(always)]
    fn extract_bits(&self, value: T, shift: u32, bit_mask: u64) -> u64 {
        let key: u64 = self.key(value).into();
        key.checked_shr(shift).unwrap_or(0) & bit_mask
    }
}

/// Sorts from the smallest to the largest value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ascending;

/// Sorts from the largest to the smallest value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Descending;

#[inline(always)]
fn sign_bit<T: Numeric>() -> T::Bits {
    T::Bits::one() << (T::BITS as usize - 1)
}

impl Ascending {
    /// Maps a key back to the value it was computed from.
    pub fn decode<T: Numeric>(&self, key: T::Bits) -> T {
        let sign = sign_bit::<T>();
        let bits = match T::ENCODING {
            Encoding::Unsigned => key,
            Encoding::TwosComplement => key ^ sign,
            Encoding::Float => {
                // A set sign bit in the key marks a non-negative value.
                if key & sign != T::Bits::zero() {
                    key ^ sign
                } else {
                    !key
                }
            }
        };
        T::from_bits(bits)
    }
}

impl<T: Numeric> RadixOrder<T> for Ascending {
    #[inline(always)]
    fn key(&self, value: T) -> T::Bits {
        let bits = value.to_bits();
        let sign = sign_bit::<T>();
        match T::ENCODING {
            Encoding::Unsigned => bits,
            // Flipping the sign bit moves negatives below positives. Within
            // one sign two's complement already orders correctly.
            Encoding::TwosComplement => bits ^ sign,
            // The arithmetic shift smears the sign bit across the whole word:
            // all ones for negatives, all zeros otherwise. OR-ing the sign
            // back in always flips the sign bit, and additionally flips the
            // exponent and mantissa of negatives so larger magnitudes get
            // smaller keys.
            Encoding::Float => {
                let mask = bits.signed_shr(T::BITS - 1) | sign;
                bits ^ mask
            }
        }
    }

    #[inline(always)]
    fn default_value(&self) -> T {
        self.decode(T::Bits::max_value())
    }
}

impl<T: Numeric> RadixOrder<T> for Descending {
    #[inline(always)]
    fn key(&self, value: T) -> T::Bits {
        !Ascending.key(value)
    }

    #[inline(always)]
    fn default_value(&self) -> T {
        Ascending.decode(T::Bits::zero())
    }
}
