//! LSD radix sort.
//!
//! Each pass extracts one `radix_bits`-wide digit from the radix key of every
//! element (least significant digit first) and performs a stable counting sort
//! on it. After `ceil(BITS / radix_bits)` passes the data is ordered by the
//! full key, and therefore by the [`RadixOrder`] the key came from.
//!
//! # Parallel pass
//!
//! 1. **Histogram**: every chunk counts its digits independently
//! 2. **Offsets**: exclusive prefix over the histograms in digit-major,
//!    chunk-minor order, so chunk `c` writes its digit-`d` elements after every
//!    digit-`d` element of chunks `0..c` (stability)
//! 3. **Scatter**: every chunk moves its elements to their destinations; the
//!    destination ranges of different chunks never overlap
//!
//! A pass in which every element has the same digit would be the identity
//! permutation and is skipped.
//!
//! Keys and an optional payload move together; a key-only sort uses `()` as the
//! payload, which costs nothing.

use log::trace;
use rayon::prelude::*;

use crate::config::ExecutionConfig;
use crate::numeric::Numeric;
use crate::ops::ordering::RadixOrder;
use crate::utils::{chunk_count, SharedSlice};

#[inline(always)]
fn digit<T: Numeric, O: RadixOrder<T>>(order: &O, value: T, shift: u32, mask: u64) -> usize {
    order.extract_bits(value, shift, mask) as usize
}

fn pass_count<T: Numeric, O: RadixOrder<T>>(order: &O, radix_bits: u32) -> u32 {
    order.bit_width().div_ceil(radix_bits)
}

/// Sorts `keys` by `order` on the calling thread, permuting `values` alongside.
pub(crate) fn scalar_radix_sort_pairs<T, V, O>(
    keys: &mut [T],
    values: &mut [V],
    order: &O,
    config: &ExecutionConfig,
) where
    T: Numeric,
    V: Copy + Send + Sync,
    O: RadixOrder<T>,
{
    debug_assert_eq!(keys.len(), values.len());
    let n = keys.len();
    if n < 2 {
        return;
    }

    let radix = 1usize << config.radix_bits;
    let mask = (radix - 1) as u64;

    let mut src_keys = keys.to_vec();
    let mut src_values = values.to_vec();
    let mut dst_keys = src_keys.clone();
    let mut dst_values = src_values.clone();
    let mut counts = vec![0usize; radix];

    for pass in 0..pass_count(order, config.radix_bits) {
        let shift = pass * config.radix_bits;

        counts.iter_mut().for_each(|count| *count = 0);
        for &key in &src_keys {
            counts[digit(order, key, shift, mask)] += 1;
        }
        if counts.iter().any(|&count| count == n) {
            trace!("radix pass {pass} skipped: single digit bucket");
            continue;
        }

        let mut offset = 0;
        for count in counts.iter_mut() {
            let bucket = *count;
            *count = offset;
            offset += bucket;
        }

        for (&key, &value) in src_keys.iter().zip(src_values.iter()) {
            let slot = &mut counts[digit(order, key, shift, mask)];
            dst_keys[*slot] = key;
            dst_values[*slot] = value;
            *slot += 1;
        }

        std::mem::swap(&mut src_keys, &mut dst_keys);
        std::mem::swap(&mut src_values, &mut dst_values);
    }

    keys.copy_from_slice(&src_keys);
    values.copy_from_slice(&src_values);
}

/// Sorts `keys` by `order` with Rayon, permuting `values` alongside.
pub(crate) fn par_radix_sort_pairs<T, V, O>(
    keys: &mut [T],
    values: &mut [V],
    order: &O,
    config: &ExecutionConfig,
) where
    T: Numeric,
    V: Copy + Send + Sync,
    O: RadixOrder<T>,
{
    debug_assert_eq!(keys.len(), values.len());
    let n = keys.len();
    if n < 2 {
        return;
    }

    let chunk = config.chunk_size;
    let chunks = chunk_count(n, chunk);
    let radix = 1usize << config.radix_bits;
    let mask = (radix - 1) as u64;

    let mut src_keys = keys.to_vec();
    let mut src_values = values.to_vec();
    let mut dst_keys = src_keys.clone();
    let mut dst_values = src_values.clone();

    for pass in 0..pass_count(order, config.radix_bits) {
        let shift = pass * config.radix_bits;

        let histograms: Vec<Vec<usize>> = src_keys
            .par_chunks(chunk)
            .map(|piece| {
                let mut counts = vec![0usize; radix];
                for &key in piece {
                    counts[digit(order, key, shift, mask)] += 1;
                }
                counts
            })
            .collect();

        let skip = (0..radix).any(|d| histograms.iter().map(|h| h[d]).sum::<usize>() == n);
        if skip {
            trace!("radix pass {pass} skipped: single digit bucket");
            continue;
        }

        let mut offsets = vec![vec![0usize; radix]; chunks];
        let mut running = 0;
        for d in 0..radix {
            for (c, histogram) in histograms.iter().enumerate() {
                offsets[c][d] = running;
                running += histogram[d];
            }
        }
        trace!("radix pass {pass}: {chunks} chunks, shift {shift}");

        let out_keys = SharedSlice::new(&mut dst_keys);
        let out_values = SharedSlice::new(&mut dst_values);

        src_keys
            .par_chunks(chunk)
            .zip(src_values.par_chunks(chunk))
            .zip(offsets.into_par_iter())
            .for_each(|((piece_keys, piece_values), mut slots)| {
                for (&key, &value) in piece_keys.iter().zip(piece_values) {
                    let slot = &mut slots[digit(order, key, shift, mask)];
                    // SAFETY: the offsets partition 0..n; each chunk owns the
                    // slots handed to it and advances them monotonically.
                    unsafe {
                        out_keys.write(*slot, key);
                        out_values.write(*slot, value);
                    }
                    *slot += 1;
                }
            });

        std::mem::swap(&mut src_keys, &mut dst_keys);
        std::mem::swap(&mut src_values, &mut dst_values);
    }

    keys.par_chunks_mut(chunk)
        .zip(src_keys.par_chunks(chunk))
        .for_each(|(dst, src)| dst.copy_from_slice(src));
    values
        .par_chunks_mut(chunk)
        .zip(src_values.par_chunks(chunk))
        .for_each(|(dst, src)| dst.copy_from_slice(src));
}

/// Picks the scalar or the parallel sort by input length.
pub(crate) fn radix_sort_pairs<T, V, O>(
    keys: &mut [T],
    values: &mut [V],
    order: &O,
    config: &ExecutionConfig,
) where
    T: Numeric,
    V: Copy + Send + Sync,
    O: RadixOrder<T>,
{
    if config.use_parallel(keys.len()) {
        par_radix_sort_pairs(keys, values, order, config);
    } else {
        scalar_radix_sort_pairs(keys, values, order, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ops::ordering::{Ascending, Descending};

    fn small_chunks() -> ExecutionConfig {
        ExecutionConfig::new()
            .with_chunk_size(3)
            .with_parallel_threshold(0)
    }

    #[test]
    fn test_scalar_sort_signed() {
        let mut keys = [5i32, -3, 0, 2, -10];
        let mut units = [(); 5];
        scalar_radix_sort_pairs(&mut keys, &mut units, &Ascending, &ExecutionConfig::default());
        assert_eq!(keys, [-10, -3, 0, 2, 5]);
    }

    #[test]
    fn test_parallel_sort_matches_scalar() {
        let data: Vec<i16> = (0..200).map(|i| ((i * 7919) % 601 - 300) as i16).collect();

        let mut scalar = data.clone();
        let mut parallel = data.clone();
        let mut u1 = vec![(); data.len()];
        let mut u2 = vec![(); data.len()];
        scalar_radix_sort_pairs(&mut scalar, &mut u1, &Descending, &small_chunks());
        par_radix_sort_pairs(&mut parallel, &mut u2, &Descending, &small_chunks());

        assert_eq!(scalar, parallel);
        assert!(scalar.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_pairs_are_stable() {
        let mut keys = [3u8, 1, 3, 1, 2, 3];
        let mut values = [0usize, 1, 2, 3, 4, 5];
        par_radix_sort_pairs(&mut keys, &mut values, &Ascending, &small_chunks());
        assert_eq!(keys, [1, 1, 2, 3, 3, 3]);
        assert_eq!(values, [1, 3, 4, 0, 2, 5]);
    }

    #[test]
    fn test_narrow_digits_cover_partial_last_pass() {
        // 8-bit keys with 3-bit digits: passes at shifts 0, 3, 6
        let config = small_chunks().with_radix_bits(3);
        let mut keys: Vec<i8> = vec![127, -128, 0, -1, 64, -65, 1];
        let mut units = vec![(); keys.len()];
        par_radix_sort_pairs(&mut keys, &mut units, &Ascending, &config);
        assert_eq!(keys, vec![-128, -65, -1, 0, 1, 64, 127]);
    }

    #[test]
    fn test_trivial_inputs() {
        let mut empty: [u32; 0] = [];
        let mut units: [(); 0] = [];
        radix_sort_pairs(&mut empty, &mut units, &Ascending, &ExecutionConfig::default());

        let mut single = [42u32];
        let mut unit = [()];
        radix_sort_pairs(&mut single, &mut unit, &Ascending, &ExecutionConfig::default());
        assert_eq!(single, [42]);
    }
}
