//! Slice extension traits.
//!
//! Every primitive comes in three flavours:
//!
//! - `scalar_*`: sequential reference implementation on the calling thread
//! - `par_*`: chunked Rayon implementation on the current thread pool
//! - the plain name: picks one of the two from the input length
//!
//! All three use the default [`ExecutionConfig`]. Use a
//! [`Stream`](crate::stream::Stream) for a custom configuration or a dedicated
//! thread pool.

use crate::config::ExecutionConfig;
use crate::error::Result;
use crate::kernels::{histogram, reduce, sort, unique};
use crate::kernels::reduce::ScanKind;
use crate::numeric::{AtomicNumeric, Numeric};
use crate::ops::aggregate::AggregationOperation;
use crate::ops::histogram::{
    BinLocator, HistogramAggregator, HistogramCounter, HistogramResult, Increment,
    MultiBinLocator,
};
use crate::ops::ordering::RadixOrder;
use crate::ops::unique::DeduplicationComparator;

/// Forces the parallel path regardless of input length.
fn parallel_config() -> ExecutionConfig {
    ExecutionConfig::default().with_parallel_threshold(0)
}

pub trait RadixSort<T: Numeric> {
    fn radix_sort<O: RadixOrder<T>>(&mut self, order: O);
    fn par_radix_sort<O: RadixOrder<T>>(&mut self, order: O);
    fn scalar_radix_sort<O: RadixOrder<T>>(&mut self, order: O);
}

impl<T: Numeric> RadixSort<T> for [T] {
    fn radix_sort<O: RadixOrder<T>>(&mut self, order: O) {
        let mut units = vec![(); self.len()];
        sort::radix_sort_pairs(self, &mut units, &order, &ExecutionConfig::default());
    }

    fn par_radix_sort<O: RadixOrder<T>>(&mut self, order: O) {
        let mut units = vec![(); self.len()];
        sort::par_radix_sort_pairs(self, &mut units, &order, &parallel_config());
    }

    fn scalar_radix_sort<O: RadixOrder<T>>(&mut self, order: O) {
        let mut units = vec![(); self.len()];
        sort::scalar_radix_sort_pairs(self, &mut units, &order, &ExecutionConfig::default());
    }
}

/// Sorts `keys` by `order` and applies the same permutation to `values`.
///
/// # Errors
///
/// Returns [`PrimlyError::LengthMismatch`](crate::error::PrimlyError::LengthMismatch)
/// before touching either slice if their lengths differ.
pub fn radix_sort_pairs<T, V, O>(keys: &mut [T], values: &mut [V], order: O) -> Result<()>
where
    T: Numeric,
    V: Copy + Send + Sync,
    O: RadixOrder<T>,
{
    check_pair_lengths(keys.len(), values.len())?;
    sort::radix_sort_pairs(keys, values, &order, &ExecutionConfig::default());
    Ok(())
}

pub(crate) fn check_pair_lengths(keys: usize, values: usize) -> Result<()> {
    if keys != values {
        return Err(crate::error::length_mismatch(
            keys,
            values,
            "sort values must match keys",
        ));
    }
    Ok(())
}

pub trait Reduce<T: AtomicNumeric> {
    fn reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T;
    fn par_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T;
    fn scalar_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T;

    /// Parallel reduction whose partials meet in a single atomic cell.
    fn atomic_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T;
}

impl<T: AtomicNumeric> Reduce<T> for [T] {
    fn reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T {
        reduce::reduce(self, &op, &ExecutionConfig::default())
    }

    fn par_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T {
        reduce::par_reduce(self, &op, &parallel_config())
    }

    fn scalar_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T {
        reduce::scalar_reduce(self, &op)
    }

    fn atomic_reduce<Op: AggregationOperation<T>>(&self, op: Op) -> T {
        reduce::atomic_reduce(self, &op, &parallel_config())
    }
}

pub trait Scan<T: AtomicNumeric> {
    fn inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
    fn exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
    fn par_inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
    fn par_exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
    fn scalar_inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
    fn scalar_exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T>;
}

impl<T: AtomicNumeric> Scan<T> for [T] {
    fn inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::scan(self, &op, ScanKind::Inclusive, &ExecutionConfig::default())
    }

    fn exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::scan(self, &op, ScanKind::Exclusive, &ExecutionConfig::default())
    }

    fn par_inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::par_scan(self, &op, ScanKind::Inclusive, &parallel_config())
    }

    fn par_exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::par_scan(self, &op, ScanKind::Exclusive, &parallel_config())
    }

    fn scalar_inclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::scalar_scan(self, &op, ScanKind::Inclusive)
    }

    fn scalar_exclusive_scan<Op: AggregationOperation<T>>(&self, op: Op) -> Vec<T> {
        reduce::scalar_scan(self, &op, ScanKind::Exclusive)
    }
}

pub trait Histogram<T: Numeric> {
    /// Counts every element into one of `bin_count` zeroed bins.
    fn histogram<C, L>(&self, bin_count: usize, locator: L) -> Result<HistogramResult<C>>
    where
        C: HistogramCounter,
        L: BinLocator<T>;

    /// Like [`Histogram::histogram`] for locators that update several bins.
    fn multi_bin_histogram<C, M>(&self, bin_count: usize, locator: M) -> Result<HistogramResult<C>>
    where
        C: HistogramCounter,
        M: MultiBinLocator<T>;

    /// Accumulates onto existing counts and returns whether a counter overflowed.
    fn histogram_into<C, L>(&self, bins: &mut [C], locator: L) -> Result<bool>
    where
        C: HistogramCounter,
        L: BinLocator<T>;
}

impl<T: Numeric> Histogram<T> for [T] {
    fn histogram<C, L>(&self, bin_count: usize, locator: L) -> Result<HistogramResult<C>>
    where
        C: HistogramCounter,
        L: BinLocator<T>,
    {
        self.multi_bin_histogram(bin_count, HistogramAggregator::new(locator))
    }

    fn multi_bin_histogram<C, M>(&self, bin_count: usize, locator: M) -> Result<HistogramResult<C>>
    where
        C: HistogramCounter,
        M: MultiBinLocator<T>,
    {
        histogram::histogram(self, bin_count, &locator, &Increment, &ExecutionConfig::default())
    }

    fn histogram_into<C, L>(&self, bins: &mut [C], locator: L) -> Result<bool>
    where
        C: HistogramCounter,
        L: BinLocator<T>,
    {
        histogram::histogram_into(
            self,
            bins,
            &HistogramAggregator::new(locator),
            &Increment,
            &ExecutionConfig::default(),
        )
    }
}

pub trait Unique<T: Numeric> {
    /// Collapses runs of equal elements to their first element, compacting the
    /// survivors to the front. Returns the new length; elements past it are
    /// unspecified.
    fn unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize;
    fn par_unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize;
    fn scalar_unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize;
}

impl<T: Numeric> Unique<T> for [T] {
    fn unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize {
        unique::unique(self, &comparator, &ExecutionConfig::default())
    }

    fn par_unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize {
        unique::par_unique(self, &comparator, &parallel_config())
    }

    fn scalar_unique<C: DeduplicationComparator<T>>(&mut self, comparator: C) -> usize {
        unique::scalar_unique(self, &comparator)
    }
}
