//! CPU execution engine.
//!
//! Kernels are generic over the operation contracts in [`crate::ops`] and the
//! element traits in [`crate::numeric`]; Rayon supplies the workers. Inputs are
//! split into `chunk_size` pieces that run independently, and the only writes
//! to shared state go through atomics or through disjoint scatter positions.

pub(crate) mod histogram;
pub(crate) mod reduce;
pub(crate) mod sequence;
pub(crate) mod sort;
pub(crate) mod unique;

pub mod traits;

pub use reduce::ScanKind;
pub use traits::{radix_sort_pairs, Histogram, RadixSort, Reduce, Scan, Unique};

use crate::config::ExecutionConfig;
use crate::error::Result;
use crate::numeric::Numeric;
use crate::ops::sequence::SequenceGenerator;

/// Materializes `generator(0..len)`.
pub fn sequence<T, G>(len: usize, generator: G) -> Vec<T>
where
    T: Numeric,
    G: SequenceGenerator<T>,
{
    let mut output = vec![T::zero(); len];
    sequence::sequence_into(&mut output, &generator, &ExecutionConfig::default());
    output
}

/// Overwrites every element of `output` with `generator(index)`.
pub fn sequence_into<T, G>(output: &mut [T], generator: G)
where
    T: Numeric,
    G: SequenceGenerator<T>,
{
    sequence::sequence_into(output, &generator, &ExecutionConfig::default());
}

/// `len` elements of `generator((i / batch_length) % sequence_length)`.
///
/// # Errors
///
/// Returns a validation error if either length is zero.
pub fn batched_sequence<T, G>(
    len: usize,
    sequence_length: u64,
    batch_length: u64,
    generator: G,
) -> Result<Vec<T>>
where
    T: Numeric,
    G: SequenceGenerator<T>,
{
    let mut output = vec![T::zero(); len];
    sequence::batched_sequence_into(
        &mut output,
        sequence_length,
        batch_length,
        &generator,
        &ExecutionConfig::default(),
    )?;
    Ok(output)
}
