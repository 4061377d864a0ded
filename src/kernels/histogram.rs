//! Multi-bin histogram kernel.
//!
//! One kernel serves every locator: it only ever calls
//! [`MultiBinLocator::compute_histogram_bins`]. Overflow is collected in a
//! per-chunk flag and published to the shared [`OverflowFlag`] once per chunk.

use log::warn;
use rayon::prelude::*;

use crate::config::ExecutionConfig;
use crate::error::{bin_out_of_range, validation_error, Result};
use crate::numeric::Numeric;
use crate::ops::histogram::{
    BinsView, HistogramCounter, HistogramResult, IncrementOperation, MultiBinLocator,
    OverflowFlag,
};

/// Runs `locator` over every element of `data`, accumulating into `bins`.
///
/// Returns whether any counter overflowed. An out-of-range bin index fails the
/// whole launch; the bins then hold partial counts and must be discarded.
pub(crate) fn histogram_kernel<T, C, M, I>(
    data: &[T],
    bins: &[C::Atomic],
    locator: &M,
    op: &I,
    config: &ExecutionConfig,
) -> Result<bool>
where
    T: Numeric,
    C: HistogramCounter,
    M: MultiBinLocator<T>,
    I: IncrementOperation<C>,
{
    if bins.is_empty() {
        return Err(validation_error("histogram requires at least one bin"));
    }

    let slot = BinsView::<C>::violation_slot();
    let view = BinsView::<C>::new(bins, &slot);
    let overflow = OverflowFlag::new();

    let run = |piece: &[T]| {
        let mut local = false;
        for &value in piece {
            locator.compute_histogram_bins(value, &view, op, &mut local);
        }
        if local {
            overflow.raise();
        }
    };

    if config.use_parallel(data.len()) {
        data.par_chunks(config.chunk_size).for_each(run);
    } else {
        run(data);
    }

    if let Some(index) = BinsView::<C>::take_violation(&slot) {
        return Err(bin_out_of_range(index, bins.len()));
    }

    let overflowed = overflow.is_raised();
    if overflowed {
        warn!(
            "histogram over {} {} values overflowed a {} counter",
            data.len(),
            T::NAME,
            C::NAME
        );
    }
    Ok(overflowed)
}

/// Fresh zeroed counters, histogrammed.
pub(crate) fn histogram<T, C, M, I>(
    data: &[T],
    bin_count: usize,
    locator: &M,
    op: &I,
    config: &ExecutionConfig,
) -> Result<HistogramResult<C>>
where
    T: Numeric,
    C: HistogramCounter,
    M: MultiBinLocator<T>,
    I: IncrementOperation<C>,
{
    let bins: Vec<C::Atomic> = (0..bin_count).map(|_| C::new_atomic(C::zero())).collect();
    let overflow = histogram_kernel(data, &bins, locator, op, config)?;
    Ok(HistogramResult {
        bins: bins.into_iter().map(C::into_inner).collect(),
        overflow,
    })
}

/// Accumulates onto existing counts. `bins` is left untouched on error.
pub(crate) fn histogram_into<T, C, M, I>(
    data: &[T],
    bins: &mut [C],
    locator: &M,
    op: &I,
    config: &ExecutionConfig,
) -> Result<bool>
where
    T: Numeric,
    C: HistogramCounter,
    M: MultiBinLocator<T>,
    I: IncrementOperation<C>,
{
    let cells: Vec<C::Atomic> = bins.iter().map(|&count| C::new_atomic(count)).collect();
    let overflow = histogram_kernel(data, &cells, locator, op, config)?;
    for (count, cell) in bins.iter_mut().zip(cells) {
        *count = C::into_inner(cell);
    }
    Ok(overflow)
}
