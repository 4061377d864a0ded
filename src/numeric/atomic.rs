//! Atomic storage for numeric accumulators.
//!
//! Integer types map onto the matching `std::sync::atomic` integer and use the
//! native read-modify-write instructions. Floats have no atomic arithmetic in
//! the standard library, so they are stored as their bit pattern in the
//! unsigned atomic of the same width and updated with a compare-exchange loop.
//!
//! All operations use `Relaxed` ordering: they only need per-cell atomicity.
//! Visibility of the final values to the caller comes from the join at the end
//! of a launch.

use std::fmt::Debug;
use std::sync::atomic::{
    AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicU16, AtomicU32, AtomicU64, AtomicU8,
    Ordering,
};

use half::f16;

use super::Numeric;

/// A [`Numeric`] type with a lock-free atomic cell of the same width.
///
/// Every `atomic_fetch_*` returns the value the cell held before the update.
pub trait AtomicNumeric: Numeric {
    /// The shared cell type.
    type Atomic: Send + Sync + Debug;

    fn new_atomic(value: Self) -> Self::Atomic;

    fn atomic_load(cell: &Self::Atomic) -> Self;

    fn atomic_store(cell: &Self::Atomic, value: Self);

    /// Adds `value` with [`Numeric::wrapping_sum`] semantics.
    fn atomic_fetch_add(cell: &Self::Atomic, value: Self) -> Self;

    fn atomic_fetch_min(cell: &Self::Atomic, value: Self) -> Self;

    fn atomic_fetch_max(cell: &Self::Atomic, value: Self) -> Self;

    /// Applies `update` atomically, retrying until no other writer interferes.
    fn atomic_fetch_update<F>(cell: &Self::Atomic, update: F) -> Self
    where
        F: FnMut(Self) -> Self;

    /// Consumes a cell and returns its final value.
    fn into_inner(cell: Self::Atomic) -> Self;
}

macro_rules! impl_atomic_int {
    ($($t:ty => $atomic:ty;)*) => {$(
        impl AtomicNumeric for $t {
            type Atomic = $atomic;

            #[inline(always)]
            fn new_atomic(value: Self) -> $atomic {
                <$atomic>::new(value)
            }

            #[inline(always)]
            fn atomic_load(cell: &$atomic) -> Self {
                cell.load(Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_store(cell: &$atomic, value: Self) {
                cell.store(value, Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_fetch_add(cell: &$atomic, value: Self) -> Self {
                cell.fetch_add(value, Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_fetch_min(cell: &$atomic, value: Self) -> Self {
                cell.fetch_min(value, Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_fetch_max(cell: &$atomic, value: Self) -> Self {
                cell.fetch_max(value, Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_fetch_update<F>(cell: &$atomic, mut update: F) -> Self
            where
                F: FnMut(Self) -> Self,
            {
                match cell.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |old| Some(update(old))) {
                    Ok(previous) | Err(previous) => previous,
                }
            }

            #[inline(always)]
            fn into_inner(cell: $atomic) -> Self {
                cell.into_inner()
            }
        }
    )*};
}

impl_atomic_int! {
    i8 => AtomicI8;
    i16 => AtomicI16;
    i32 => AtomicI32;
    i64 => AtomicI64;
    u8 => AtomicU8;
    u16 => AtomicU16;
    u32 => AtomicU32;
    u64 => AtomicU64;
}

macro_rules! impl_atomic_float {
    ($($t:ty => $atomic:ty;)*) => {$(
        impl AtomicNumeric for $t {
            type Atomic = $atomic;

            #[inline(always)]
            fn new_atomic(value: Self) -> $atomic {
                <$atomic>::new(Numeric::to_bits(value))
            }

            #[inline(always)]
            fn atomic_load(cell: &$atomic) -> Self {
                <$t as Numeric>::from_bits(cell.load(Ordering::Relaxed))
            }

            #[inline(always)]
            fn atomic_store(cell: &$atomic, value: Self) {
                cell.store(Numeric::to_bits(value), Ordering::Relaxed)
            }

            #[inline(always)]
            fn atomic_fetch_add(cell: &$atomic, value: Self) -> Self {
                Self::atomic_fetch_update(cell, |old| old + value)
            }

            #[inline(always)]
            fn atomic_fetch_min(cell: &$atomic, value: Self) -> Self {
                Self::atomic_fetch_update(cell, |old| old.min_of(value))
            }

            #[inline(always)]
            fn atomic_fetch_max(cell: &$atomic, value: Self) -> Self {
                Self::atomic_fetch_update(cell, |old| old.max_of(value))
            }

            #[inline(always)]
            fn atomic_fetch_update<F>(cell: &$atomic, mut update: F) -> Self
            where
                F: FnMut(Self) -> Self,
            {
                let result = cell.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                    Some(Numeric::to_bits(update(<$t as Numeric>::from_bits(bits))))
                });
                match result {
                    Ok(previous) | Err(previous) => <$t as Numeric>::from_bits(previous),
                }
            }

            #[inline(always)]
            fn into_inner(cell: $atomic) -> Self {
                <$t as Numeric>::from_bits(cell.into_inner())
            }
        }
    )*};
}

impl_atomic_float! {
    f16 => AtomicU16;
    f32 => AtomicU32;
    f64 => AtomicU64;
}
