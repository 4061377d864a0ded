//! Reductions and prefix scans over any [`AggregationOperation`].
//!
//! The parallel scan is the classic three-phase scheme: reduce every chunk,
//! scan the (few) chunk totals sequentially, then scan each chunk locally
//! starting from its prefix. Only associativity of `combine` is relied on;
//! partial results are combined in left-to-right chunk order.

use rayon::prelude::*;

use crate::config::ExecutionConfig;
use crate::numeric::AtomicNumeric;
use crate::ops::aggregate::AggregationOperation;

/// Whether a scan includes the element at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    /// `out[i] = a[0] ⊕ … ⊕ a[i]`
    Inclusive,
    /// `out[i] = identity ⊕ a[0] ⊕ … ⊕ a[i - 1]`
    Exclusive,
}

#[inline(always)]
pub(crate) fn scalar_reduce<T, Op>(data: &[T], op: &Op) -> T
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    data.iter().fold(op.identity(), |acc, &x| op.combine(acc, x))
}

pub(crate) fn par_reduce<T, Op>(data: &[T], op: &Op, config: &ExecutionConfig) -> T
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    data.par_chunks(config.chunk_size)
        .map(|piece| scalar_reduce(piece, op))
        .reduce(|| op.identity(), |a, b| op.combine(a, b))
}

/// Folds each chunk locally, then merges the partials into one shared cell
/// through [`AggregationOperation::atomic_combine`].
pub(crate) fn atomic_reduce<T, Op>(data: &[T], op: &Op, config: &ExecutionConfig) -> T
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    let cell = T::new_atomic(op.identity());
    data.par_chunks(config.chunk_size)
        .for_each(|piece| op.atomic_combine(&cell, scalar_reduce(piece, op)));
    T::into_inner(cell)
}

pub(crate) fn reduce<T, Op>(data: &[T], op: &Op, config: &ExecutionConfig) -> T
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    if config.use_parallel(data.len()) {
        par_reduce(data, op, config)
    } else {
        scalar_reduce(data, op)
    }
}

/// Scans `input` into `output` starting from `carry`.
#[inline(always)]
fn scan_into<T, Op>(input: &[T], output: &mut [T], mut carry: T, op: &Op, kind: ScanKind)
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    match kind {
        ScanKind::Inclusive => {
            for (out, &x) in output.iter_mut().zip(input) {
                carry = op.combine(carry, x);
                *out = carry;
            }
        }
        ScanKind::Exclusive => {
            for (out, &x) in output.iter_mut().zip(input) {
                *out = carry;
                carry = op.combine(carry, x);
            }
        }
    }
}

pub(crate) fn scalar_scan<T, Op>(data: &[T], op: &Op, kind: ScanKind) -> Vec<T>
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    let mut output = vec![op.identity(); data.len()];
    scan_into(data, &mut output, op.identity(), op, kind);
    output
}

pub(crate) fn par_scan<T, Op>(data: &[T], op: &Op, kind: ScanKind, config: &ExecutionConfig) -> Vec<T>
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    let chunk = config.chunk_size;

    let totals: Vec<T> = data
        .par_chunks(chunk)
        .map(|piece| scalar_reduce(piece, op))
        .collect();

    let mut prefixes = Vec::with_capacity(totals.len());
    let mut running = op.identity();
    for total in totals {
        prefixes.push(running);
        running = op.combine(running, total);
    }

    let mut output = vec![op.identity(); data.len()];
    output
        .par_chunks_mut(chunk)
        .zip(data.par_chunks(chunk))
        .zip(prefixes.into_par_iter())
        .for_each(|((out, piece), prefix)| scan_into(piece, out, prefix, op, kind));
    output
}

pub(crate) fn scan<T, Op>(data: &[T], op: &Op, kind: ScanKind, config: &ExecutionConfig) -> Vec<T>
where
    T: AtomicNumeric,
    Op: AggregationOperation<T>,
{
    if config.use_parallel(data.len()) {
        par_scan(data, op, kind, config)
    } else {
        scalar_scan(data, op, kind)
    }
}
