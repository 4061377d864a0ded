//! Consecutive-duplicate elimination.
//!
//! The parallel path is a stream compaction: flag the first element of every
//! run, exclusive-scan the flags with [`Add`] to get each survivor's
//! destination, then scatter the survivors. Survivors keep their relative
//! order and every run keeps its first element.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::config::ExecutionConfig;
use crate::kernels::reduce::{par_scan, ScanKind};
use crate::numeric::Numeric;
use crate::ops::aggregate::Add;
use crate::ops::unique::DeduplicationComparator;
use crate::utils::SharedSlice;

pub(crate) fn scalar_unique<T, C>(data: &mut [T], comparator: &C) -> usize
where
    T: Numeric,
    C: DeduplicationComparator<T>,
{
    if data.is_empty() {
        return 0;
    }

    let mut write = 1;
    for read in 1..data.len() {
        if comparator.compare(&data[read - 1], &data[read]) != Ordering::Equal {
            data[write] = data[read];
            write += 1;
        }
    }
    write
}

pub(crate) fn par_unique<T, C>(data: &mut [T], comparator: &C, config: &ExecutionConfig) -> usize
where
    T: Numeric,
    C: DeduplicationComparator<T>,
{
    let n = data.len();
    if n == 0 {
        return 0;
    }

    let source: &[T] = data;
    let flags: Vec<u64> = (0..n)
        .into_par_iter()
        .map(|i| (i == 0 || comparator.compare(&source[i - 1], &source[i]) != Ordering::Equal) as u64)
        .collect();
    let positions = par_scan(&flags, &Add, ScanKind::Exclusive, config);
    let count = (positions[n - 1] + flags[n - 1]) as usize;

    let mut compacted = source.to_vec();
    {
        let out = SharedSlice::new(&mut compacted);
        source
            .par_iter()
            .zip(flags.par_iter())
            .zip(positions.par_iter())
            .for_each(|((&value, &keep), &position)| {
                if keep == 1 {
                    // SAFETY: exclusive scan of 0/1 flags gives every kept
                    // element a distinct position below `count`.
                    unsafe { out.write(position as usize, value) };
                }
            });
    }

    data[..count].copy_from_slice(&compacted[..count]);
    count
}

pub(crate) fn unique<T, C>(data: &mut [T], comparator: &C, config: &ExecutionConfig) -> usize
where
    T: Numeric,
    C: DeduplicationComparator<T>,
{
    if config.use_parallel(data.len()) {
        par_unique(data, comparator, config)
    } else {
        scalar_unique(data, comparator)
    }
}
