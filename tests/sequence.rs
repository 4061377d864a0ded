//! Sequence and batched-sequence generation.

use half::f16;
use primly::{
    batched_sequence, sequence, sequence_into, ExecutionConfig, Iota, PrimlyError, Stream,
    Strided,
};

#[test]
fn test_iota_matches_index() {
    let values: Vec<i32> = sequence(6, Iota);
    assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_narrow_types_wrap() {
    let values: Vec<i8> = sequence(301, Iota);
    assert_eq!(values[127], 127);
    assert_eq!(values[128], -128);
    assert_eq!(values[300], 44);

    let unsigned: Vec<u8> = sequence(300, Iota);
    assert_eq!(unsigned[256], 0);
    assert_eq!(unsigned[299], 43);
}

#[test]
fn test_float_sequences() {
    let values: Vec<f64> = sequence(4, Strided::new(10, 5));
    assert_eq!(values, vec![10.0, 15.0, 20.0, 25.0]);

    let halves: Vec<f16> = sequence(3, Iota);
    assert_eq!(halves[2], f16::from_f32(2.0));
}

#[test]
fn test_large_parallel_sequence() {
    let values: Vec<u64> = sequence(300_000, Iota);
    assert!(values.iter().enumerate().all(|(i, &v)| v == i as u64));
}

#[test]
fn test_sequence_into_overwrites() {
    let mut output = [9u16; 5];
    sequence_into(&mut output, Strided::new(1, 2));
    assert_eq!(output, [1, 3, 5, 7, 9]);
}

#[test]
fn test_empty_sequence() {
    let values: Vec<u32> = sequence(0, Iota);
    assert!(values.is_empty());
}

#[test]
fn test_batched_sequence_repeats_and_cycles() {
    let values: Vec<u32> = batched_sequence(10, 3, 2, Iota).unwrap();
    assert_eq!(values, vec![0, 0, 1, 1, 2, 2, 0, 0, 1, 1]);
}

#[test]
fn test_batched_sequence_rejects_zero_lengths() {
    let zero_batch: primly::Result<Vec<u32>> = batched_sequence(4, 3, 0, Iota);
    let zero_sequence: primly::Result<Vec<u32>> = batched_sequence(4, 0, 1, Iota);
    assert!(matches!(zero_batch, Err(PrimlyError::ValidationError { .. })));
    assert!(matches!(zero_sequence, Err(PrimlyError::ValidationError { .. })));
}

#[test]
fn test_stream_sequences() {
    let config = ExecutionConfig::new()
        .with_chunk_size(16)
        .with_parallel_threshold(32)
        .with_num_threads(2);
    let stream = Stream::new(config).unwrap();

    let values: Vec<i64> = stream.sequence(1_000, Iota).unwrap();
    assert_eq!(values[999], 999);

    let batched: Vec<i16> = stream.batched_sequence(1_000, 4, 250, Iota).unwrap();
    assert_eq!(batched[249], 0);
    assert_eq!(batched[250], 1);
    assert_eq!(batched[999], 3);

    assert!(stream
        .batched_sequence::<i16, _>(10, 0, 1, Iota)
        .is_err());
}
