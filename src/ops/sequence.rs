//! Index-to-value generators.
//!
//! Generators take a 64-bit index so sequences longer than `u32::MAX` can be
//! produced. Conversion to a narrower `T` follows `as`-cast semantics, so an
//! 8-bit sequence wraps every 256 elements; callers that need a wraparound-free
//! sequence must keep indices in range themselves.

use crate::numeric::Numeric;

/// Maps a linear index to an element.
pub trait SequenceGenerator<T: Numeric>: Copy + Send + Sync + 'static {
    fn compute_sequence_element(&self, index: u64) -> T;
}

/// `index -> index as T`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Iota;

impl<T: Numeric> SequenceGenerator<T> for Iota {
    #[inline(always)]
    fn compute_sequence_element(&self, index: u64) -> T {
        T::from_index(index)
    }
}

/// `index -> (start + index * step) as T`, computed with 64-bit wraparound.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Strided {
    pub start: u64,
    pub step: u64,
}

impl Strided {
    pub const fn new(start: u64, step: u64) -> Self {
        Self { start, step }
    }
}

impl<T: Numeric> SequenceGenerator<T> for Strided {
    #[inline(always)]
    fn compute_sequence_element(&self, index: u64) -> T {
        T::from_index(self.start.wrapping_add(index.wrapping_mul(self.step)))
    }
}
