//! Histogram binning contracts.
//!
//! The histogram kernel only understands one shape, [`MultiBinLocator`]: given
//! a value, increment whichever bins it contributes to. Most policies only ever
//! pick a single bin, so they implement the much smaller [`BinLocator`] and are
//! wrapped in a [`HistogramAggregator`], which calls the locator once and hands
//! the resulting index to the increment policy. This keeps one kernel for every
//! locator.
//!
//! Counters are incremented through an [`IncrementOperation`]. Overflow is
//! detected and reported, not prevented: an integer counter at its maximum
//! wraps, a float counter at its precision limit stops growing, and in both
//! cases the increment reports `true`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{validation_error, Result, UNREPRESENTABLE_BIN};
use crate::numeric::{AtomicNumeric, Numeric};

/// Marker stored in a [`BinsView`] violation slot while no locator misbehaved.
const NO_VIOLATION: usize = usize::MAX;

/// A counter type usable for histogram bins.
pub trait HistogramCounter: AtomicNumeric {
    /// Atomically adds one and returns whether this increment overflowed.
    fn increment(cell: &Self::Atomic) -> bool;
}

macro_rules! impl_int_counter {
    ($($t:ty),*) => {$(
        impl HistogramCounter for $t {
            #[inline(always)]
            fn increment(cell: &Self::Atomic) -> bool {
                let old = Self::atomic_fetch_add(cell, 1);
                old == <$t>::MAX
            }
        }
    )*};
}

impl_int_counter!(i32, i64, u32, u64);

macro_rules! impl_float_counter {
    ($($t:ty),*) => {$(
        impl HistogramCounter for $t {
            /// Reports overflow once adding one no longer changes the count,
            /// which covers `MAX` as well as every count past the mantissa's
            /// exact integer range.
            #[inline(always)]
            fn increment(cell: &Self::Atomic) -> bool {
                let old = Self::atomic_fetch_add(cell, 1.0);
                old + 1.0 == old
            }
        }
    )*};
}

impl_float_counter!(f32, f64);

/// Increment policy applied to a single bin.
pub trait IncrementOperation<C: HistogramCounter>: Copy + Send + Sync + 'static {
    /// Increments `target` and returns whether the counter overflowed.
    fn atomic_increment(&self, target: &C::Atomic) -> bool;
}

/// Atomic `+= 1` with overflow detection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Increment;

impl<C: HistogramCounter> IncrementOperation<C> for Increment {
    #[inline(always)]
    fn atomic_increment(&self, target: &C::Atomic) -> bool {
        C::increment(target)
    }
}

/// A shared, write-once-true overflow signal.
#[derive(Debug, Default)]
pub struct OverflowFlag(AtomicBool);

impl OverflowFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. There is no way to clear it.
    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The bins of a histogram as seen by a locator during a launch.
///
/// Indices outside the view never reach memory: the first one seen is
/// recorded and reported by the launch as a contract violation.
pub struct BinsView<'a, C: HistogramCounter> {
    bins: &'a [C::Atomic],
    violation: &'a AtomicUsize,
}

impl<'a, C: HistogramCounter> BinsView<'a, C> {
    pub(crate) fn new(bins: &'a [C::Atomic], violation: &'a AtomicUsize) -> Self {
        Self { bins, violation }
    }

    /// A fresh violation slot for [`BinsView::new`].
    pub(crate) fn violation_slot() -> AtomicUsize {
        AtomicUsize::new(NO_VIOLATION)
    }

    /// Reads back a violation slot after the launch joined.
    pub(crate) fn take_violation(slot: &AtomicUsize) -> Option<usize> {
        match slot.load(Ordering::Relaxed) {
            NO_VIOLATION => None,
            index => Some(index),
        }
    }

    /// Number of bins.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Applies `op` to bin `index`, raising `overflow` if the counter overflowed.
    #[inline(always)]
    pub fn increment<I: IncrementOperation<C>>(&self, index: usize, op: &I, overflow: &mut bool) {
        match self.bins.get(index) {
            Some(cell) => {
                if op.atomic_increment(cell) {
                    *overflow = true;
                }
            }
            None => {
                // `usize::MAX` is the no-violation marker.
                let index = index.min(UNREPRESENTABLE_BIN);
                let _ = self.violation.compare_exchange(
                    NO_VIOLATION,
                    index,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                );
            }
        }
    }
}

/// Picks the single bin a value belongs to.
///
/// Must return an index in `[0, bin_count)` for every reachable input.
pub trait BinLocator<T: Numeric>: Copy + Send + Sync + 'static {
    fn compute_bin(&self, value: T, bin_count: usize) -> usize;
}

/// The shape the histogram kernel runs: update every bin `value` contributes to.
pub trait MultiBinLocator<T: Numeric>: Copy + Send + Sync + 'static {
    fn compute_histogram_bins<C, I>(
        &self,
        value: T,
        bins: &BinsView<'_, C>,
        op: &I,
        overflow: &mut bool,
    ) where
        C: HistogramCounter,
        I: IncrementOperation<C>;
}

/// Adapts a [`BinLocator`] into a [`MultiBinLocator`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistogramAggregator<L> {
    locator: L,
}

impl<L> HistogramAggregator<L> {
    pub const fn new(locator: L) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }
}

impl<T: Numeric, L: BinLocator<T>> MultiBinLocator<T> for HistogramAggregator<L> {
    #[inline(always)]
    fn compute_histogram_bins<C, I>(
        &self,
        value: T,
        bins: &BinsView<'_, C>,
        op: &I,
        overflow: &mut bool,
    ) where
        C: HistogramCounter,
        I: IncrementOperation<C>,
    {
        let index = self.locator.compute_bin(value, bins.len());
        bins.increment(index, op, overflow);
    }
}

/// The value itself is the bin index; floats are truncated. Values outside
/// `[0, bin_count)` violate the locator contract; negative values are
/// reported as [`UNREPRESENTABLE_BIN`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IdentityBin;

impl<T: Numeric> BinLocator<T> for IdentityBin {
    #[inline(always)]
    fn compute_bin(&self, value: T, _bin_count: usize) -> usize {
        usize::try_from(value.to_i128()).unwrap_or(usize::MAX)
    }
}

/// `value mod bin_count`, always non-negative. Floats are truncated first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModuloBin;

impl<T: Numeric> BinLocator<T> for ModuloBin {
    #[inline(always)]
    fn compute_bin(&self, value: T, bin_count: usize) -> usize {
        value.to_i128().rem_euclid(bin_count as i128) as usize
    }
}

/// Equal-width buckets over `[lower, upper]`.
///
/// Values below `lower` land in the first bin and values at or above `upper`
/// in the last one. NaN lands in the first bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBin<T> {
    lower: T,
    upper: T,
}

impl<T: Numeric> LinearBin<T> {
    /// Fails unless `lower < upper`.
    pub fn new(lower: T, upper: T) -> Result<Self> {
        if !(lower < upper) {
            return Err(validation_error(format!(
                "linear bin range requires lower < upper, got [{lower:?}, {upper:?}]"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }
}

impl<T: Numeric> BinLocator<T> for LinearBin<T> {
    #[inline(always)]
    fn compute_bin(&self, value: T, bin_count: usize) -> usize {
        let lower = self.lower.to_f64();
        let width = self.upper.to_f64() - lower;
        let position = (value.to_f64() - lower) / width * bin_count as f64;
        // Saturating cast: negatives and NaN become 0.
        (position as usize).min(bin_count.saturating_sub(1))
    }
}

/// Counts of a finished histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramResult<C> {
    /// One counter per bin.
    pub bins: Vec<C>,
    /// Whether any counter overflowed during the launch.
    pub overflow: bool,
}

impl<C: HistogramCounter> HistogramResult<C> {
    /// Sum of all bin counts.
    pub fn total(&self) -> C {
        self.bins
            .iter()
            .fold(C::zero(), |acc, &count| acc.wrapping_sum(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atomic_bins<C: HistogramCounter>(values: &[C]) -> Vec<C::Atomic> {
        values.iter().map(|&v| C::new_atomic(v)).collect()
    }

    #[test]
    fn test_int_increment_reports_overflow_at_max() {
        let cell = u32::new_atomic(u32::MAX - 1);
        assert!(!IncrementOperation::<u32>::atomic_increment(&Increment, &cell));
        assert!(IncrementOperation::<u32>::atomic_increment(&Increment, &cell));
        assert_eq!(u32::atomic_load(&cell), 0);
    }

    #[test]
    fn test_float_increment_reports_saturation() {
        let cell = f32::new_atomic(16_777_216.0);
        assert!(IncrementOperation::<f32>::atomic_increment(&Increment, &cell));

        let cell = f64::new_atomic(f64::MAX);
        assert!(IncrementOperation::<f64>::atomic_increment(&Increment, &cell));

        let cell = f64::new_atomic(3.0);
        assert!(!IncrementOperation::<f64>::atomic_increment(&Increment, &cell));
        assert_eq!(f64::atomic_load(&cell), 4.0);
    }

    #[test]
    fn test_overflow_flag_is_write_once() {
        let flag = OverflowFlag::new();
        assert!(!flag.is_raised());
        flag.raise();
        flag.raise();
        assert!(flag.is_raised());
    }

    #[test]
    fn test_aggregator_delegates_to_locator() {
        let bins = atomic_bins(&[0i32; 4]);
        let slot = BinsView::<i32>::violation_slot();
        let view = BinsView::<i32>::new(&bins, &slot);
        let aggregator = HistogramAggregator::new(ModuloBin);
        assert_eq!(*aggregator.locator(), ModuloBin);
        let mut overflow = false;

        for value in [1i64, 5, -1, 2] {
            aggregator.compute_histogram_bins(value, &view, &Increment, &mut overflow);
        }

        let counts: Vec<i32> = bins.iter().map(i32::atomic_load).collect();
        assert_eq!(counts, vec![0, 2, 1, 1]);
        assert!(!overflow);
        assert_eq!(BinsView::<i32>::take_violation(&slot), None);
    }

    #[test]
    fn test_out_of_range_index_is_recorded_not_written() {
        let bins = atomic_bins(&[0u64; 3]);
        let slot = BinsView::<u64>::violation_slot();
        let view = BinsView::<u64>::new(&bins, &slot);
        let mut overflow = false;

        HistogramAggregator::new(IdentityBin).compute_histogram_bins(7u8, &view, &Increment, &mut overflow);
        HistogramAggregator::new(IdentityBin).compute_histogram_bins(9u8, &view, &Increment, &mut overflow);

        assert_eq!(BinsView::<u64>::take_violation(&slot), Some(7));
        assert!(bins.iter().all(|cell| u64::atomic_load(cell) == 0));
    }

    #[test]
    fn test_identity_bin_rejects_negatives() {
        assert_eq!(IdentityBin.compute_bin(3i16, 8), 3);
        assert_eq!(IdentityBin.compute_bin(-3i16, 8), usize::MAX);
    }

    #[test]
    fn test_linear_bin_edges() {
        let locator = LinearBin::new(0.0f64, 10.0).unwrap();
        assert_eq!((locator.lower(), locator.upper()), (0.0, 10.0));
        assert_eq!(locator.compute_bin(0.0, 5), 0);
        assert_eq!(locator.compute_bin(1.99, 5), 0);
        assert_eq!(locator.compute_bin(2.0, 5), 1);
        assert_eq!(locator.compute_bin(10.0, 5), 4);
        assert_eq!(locator.compute_bin(-4.0, 5), 0);
        assert_eq!(locator.compute_bin(42.0, 5), 4);
        assert_eq!(locator.compute_bin(f64::NAN, 5), 0);
    }

    #[test]
    fn test_linear_bin_rejects_empty_range() {
        assert!(LinearBin::new(3i32, 3).is_err());
        assert!(LinearBin::new(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_result_total() {
        let result = HistogramResult {
            bins: vec![3u32, 0, 5],
            overflow: false,
        };
        assert_eq!(result.total(), 8);
    }
}
