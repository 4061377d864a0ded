//! Equality-by-ordering comparators for consecutive-duplicate elimination.
//!
//! The unique kernel merges two adjacent elements exactly when
//! [`DeduplicationComparator::compare`] returns [`Ordering::Equal`]. For floats
//! that makes the NaN and signed-zero policy a property of the comparator, so
//! two are provided:
//!
//! - [`BitwiseOrder`] (the default): total order on the radix key. Two NaNs
//!   merge only if their bit patterns are identical; `-0.0` and `0.0` stay
//!   distinct.
//! - [`NaturalOrder`]: IEEE comparison. NaN never equals anything, so every
//!   NaN is kept; `-0.0` and `0.0` merge.

use std::cmp::Ordering;

use crate::numeric::Numeric;
use crate::ops::ordering::{Ascending, RadixOrder};

/// A total ordering comparator over `T`.
pub trait DeduplicationComparator<T: Numeric>: Copy + Send + Sync + 'static {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Compares ascending radix keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitwiseOrder;

impl<T: Numeric> DeduplicationComparator<T> for BitwiseOrder {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        Ascending.key(*a).cmp(&Ascending.key(*b))
    }
}

/// Compares with `PartialOrd`; unordered pairs count as distinct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Numeric> DeduplicationComparator<T> for NaturalOrder {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        // NaN on either side: not equal, and less keeps the order total
        // enough for adjacency checks.
        a.partial_cmp(b).unwrap_or(Ordering::Less)
    }
}
