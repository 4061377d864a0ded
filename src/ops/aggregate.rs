//! Associative aggregation operations for reductions and scans.
//!
//! Each descriptor is a zero-sized value implementing
//! [`AggregationOperation<T>`] for every [`AtomicNumeric`] element type.
//! `combine` is associative and commutative for integers; for floats `Add` is
//! only associative up to rounding, so parallel float sums may differ from a
//! sequential fold in the last bits.

use crate::numeric::AtomicNumeric;

/// Identity, pairwise combine and atomic in-place combine over `T`.
pub trait AggregationOperation<T: AtomicNumeric>: Copy + Send + Sync + 'static {
    /// Two-sided identity of [`AggregationOperation::combine`].
    fn identity(&self) -> T;

    fn combine(&self, a: T, b: T) -> T;

    /// Combines `value` into `target` without losing concurrent updates.
    fn atomic_combine(&self, target: &T::Atomic, value: T);
}

/// Sum. Integers wrap on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Add;

/// Minimum. Identity is the largest value of `T` (`+inf` for floats).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Min;

/// Maximum. Identity is the smallest value of `T` (`-inf` for floats).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Max;

impl<T: AtomicNumeric> AggregationOperation<T> for Add {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.wrapping_sum(b)
    }

    #[inline(always)]
    fn atomic_combine(&self, target: &T::Atomic, value: T) {
        T::atomic_fetch_add(target, value);
    }
}

impl<T: AtomicNumeric> AggregationOperation<T> for Min {
    #[inline(always)]
    fn identity(&self) -> T {
        T::HIGHEST
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.min_of(b)
    }

    #[inline(always)]
    fn atomic_combine(&self, target: &T::Atomic, value: T) {
        T::atomic_fetch_min(target, value);
    }
}

impl<T: AtomicNumeric> AggregationOperation<T> for Max {
    #[inline(always)]
    fn identity(&self) -> T {
        T::LOWEST
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.max_of(b)
    }

    #[inline(always)]
    fn atomic_combine(&self, target: &T::Atomic, value: T) {
        T::atomic_fetch_max(target, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use half::f16;

    fn assert_identity<T, Op>(op: Op, x: T)
    where
        T: AtomicNumeric,
        Op: AggregationOperation<T>,
    {
        assert_eq!(op.combine(op.identity(), x), x);
        assert_eq!(op.combine(x, op.identity()), x);
    }

    #[test]
    fn test_identity_law_for_every_type() {
        macro_rules! check {
            ($($value:expr),*) => {$(
                assert_identity(Add, $value);
                assert_identity(Min, $value);
                assert_identity(Max, $value);
            )*};
        }
        check!(7i8, 7i16, 7i32, 7i64, 7u8, 7u16, 7u32, 7u64, 7.0f32, 7.0f64);
        check!(f16::from_f32(7.0), -3i32, i64::MIN, u64::MAX, f64::NEG_INFINITY);
    }

    #[test]
    fn test_max_identity_is_minimum() {
        assert_eq!(AggregationOperation::<i32>::identity(&Max), i32::MIN);
        assert_eq!(AggregationOperation::<u16>::identity(&Min), u16::MAX);
        assert_eq!(AggregationOperation::<f32>::identity(&Max), f32::NEG_INFINITY);
    }

    #[test]
    fn test_add_wraps() {
        assert_eq!(Add.combine(i8::MAX, 1i8), i8::MIN);
    }

    #[test]
    fn test_atomic_combine() {
        let cell = i32::new_atomic(AggregationOperation::<i32>::identity(&Max));
        Max.atomic_combine(&cell, -5);
        Max.atomic_combine(&cell, 3);
        Max.atomic_combine(&cell, 1);
        assert_eq!(i32::atomic_load(&cell), 3);

        let cell = f32::new_atomic(AggregationOperation::<f32>::identity(&Min));
        Min.atomic_combine(&cell, 2.5f32);
        Min.atomic_combine(&cell, -0.5f32);
        assert_eq!(f32::atomic_load(&cell), -0.5);
    }
}
