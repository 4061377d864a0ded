use rayon::prelude::*;

use crate::config::ExecutionConfig;
use crate::error::{validation_error, Result};
use crate::numeric::Numeric;
use crate::ops::sequence::SequenceGenerator;

/// Fills `output[i]` with `generator(index_of(i))`.
#[inline(always)]
fn fill<T, G, F>(output: &mut [T], generator: &G, config: &ExecutionConfig, index_of: F)
where
    T: Numeric,
    G: SequenceGenerator<T>,
    F: Fn(u64) -> u64 + Sync,
{
    if config.use_parallel(output.len()) {
        output
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| *out = generator.compute_sequence_element(index_of(i as u64)));
    } else {
        for (i, out) in output.iter_mut().enumerate() {
            *out = generator.compute_sequence_element(index_of(i as u64));
        }
    }
}

pub(crate) fn sequence_into<T, G>(output: &mut [T], generator: &G, config: &ExecutionConfig)
where
    T: Numeric,
    G: SequenceGenerator<T>,
{
    fill(output, generator, config, |i| i);
}

/// Each of the first `sequence_length` generator indices repeated
/// `batch_length` times, cycling: `output[i] = g((i / batch) % sequence)`.
pub(crate) fn batched_sequence_into<T, G>(
    output: &mut [T],
    sequence_length: u64,
    batch_length: u64,
    generator: &G,
    config: &ExecutionConfig,
) -> Result<()>
where
    T: Numeric,
    G: SequenceGenerator<T>,
{
    if sequence_length == 0 || batch_length == 0 {
        return Err(validation_error(format!(
            "batched sequence requires positive lengths, got sequence {sequence_length} and batch {batch_length}"
        )));
    }
    fill(output, generator, config, |i| (i / batch_length) % sequence_length);
    Ok(())
}
