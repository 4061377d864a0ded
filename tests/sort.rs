//! End-to-end radix sort tests against the standard library sort.

use half::f16;
use primly::{
    radix_sort_pairs, Ascending, Descending, ExecutionConfig, PrimlyError, RadixSort, Stream,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_sort_signed_example() {
    let mut ascending = vec![5i32, -3, 0, 2, -10];
    ascending.radix_sort(Ascending);
    assert_eq!(ascending, vec![-10, -3, 0, 2, 5]);

    let mut descending = vec![5i32, -3, 0, 2, -10];
    descending.radix_sort(Descending);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

macro_rules! integer_parity_tests {
    ($($name:ident: $t:ty,)*) => {$(
        #[test]
        fn $name() {
            let mut rng = StdRng::seed_from_u64(12345);
            let data: Vec<$t> = (0..5_000).map(|_| rng.random()).collect();

            let mut expected = data.clone();
            expected.sort();

            let mut scalar = data.clone();
            scalar.scalar_radix_sort(Ascending);
            assert_eq!(scalar, expected);

            let mut parallel = data.clone();
            parallel.par_radix_sort(Ascending);
            assert_eq!(parallel, expected);

            expected.reverse();
            let mut descending = data.clone();
            descending.par_radix_sort(Descending);
            assert_eq!(descending, expected);
        }
    )*};
}

integer_parity_tests! {
    test_i8_matches_std_sort: i8,
    test_i16_matches_std_sort: i16,
    test_i32_matches_std_sort: i32,
    test_i64_matches_std_sort: i64,
    test_u8_matches_std_sort: u8,
    test_u16_matches_std_sort: u16,
    test_u32_matches_std_sort: u32,
    test_u64_matches_std_sort: u64,
}

#[test]
fn test_f32_matches_total_order_sort() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut data: Vec<f32> = (0..10_000)
        .map(|_| rng.random_range(-1.0e6f32..=1.0e6))
        .collect();
    data.extend([f32::INFINITY, f32::NEG_INFINITY, -0.0, 0.0, f32::MIN, f32::MAX]);

    let mut expected = data.clone();
    expected.sort_by(f32::total_cmp);

    let mut sorted = data.clone();
    sorted.par_radix_sort(Ascending);

    let expected_bits: Vec<u32> = expected.iter().map(|x| x.to_bits()).collect();
    let sorted_bits: Vec<u32> = sorted.iter().map(|x| x.to_bits()).collect();
    assert_eq!(sorted_bits, expected_bits);
}

#[test]
fn test_f64_descending() {
    let mut data = vec![2.5f64, -7.0, 1e-300, -1e300, 0.0, 3.25];
    data.radix_sort(Descending);
    assert_eq!(data, vec![3.25, 2.5, 1e-300, 0.0, -7.0, -1e300]);
}

#[test]
fn test_f16_sort() {
    let mut data: Vec<f16> = [3.0f32, -0.5, 65504.0, -2.0, 0.25]
        .iter()
        .map(|&x| f16::from_f32(x))
        .collect();
    data.radix_sort(Ascending);
    let values: Vec<f32> = data.iter().map(|x| x.to_f32()).collect();
    assert_eq!(values, vec![-2.0, -0.5, 0.25, 3.0, 65504.0]);
}

#[test]
fn test_large_parallel_sort_crosses_threshold() {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<i64> = (0..200_000).map(|_| rng.random_range(-1_000..1_000)).collect();

    let mut expected = data.clone();
    expected.sort();

    let mut sorted = data;
    sorted.radix_sort(Ascending);
    assert_eq!(sorted, expected);
}

#[test]
fn test_sort_pairs_is_stable() {
    let mut keys = vec![2u32, 1, 2, 0, 1, 2];
    let mut values = vec!['a', 'b', 'c', 'd', 'e', 'f'];
    radix_sort_pairs(&mut keys, &mut values, Ascending).unwrap();
    assert_eq!(keys, vec![0, 1, 1, 2, 2, 2]);
    assert_eq!(values, vec!['d', 'b', 'e', 'a', 'c', 'f']);
}

#[test]
fn test_sort_pairs_rejects_mismatched_lengths() {
    let mut keys = vec![3i32, 1, 2];
    let mut values = vec![0u8; 2];
    let error = radix_sort_pairs(&mut keys, &mut values, Ascending).unwrap_err();
    assert!(matches!(
        error,
        PrimlyError::LengthMismatch {
            expected: 3,
            found: 2,
            ..
        }
    ));
    assert_eq!(keys, vec![3, 1, 2]);
}

#[test]
fn test_stream_sort_with_narrow_digits() {
    let config = ExecutionConfig::new()
        .with_radix_bits(5)
        .with_chunk_size(64)
        .with_parallel_threshold(128)
        .with_num_threads(3);
    let stream = Stream::new(config).unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    let mut data: Vec<i32> = (0..10_000).map(|_| rng.random()).collect();
    let mut expected = data.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    stream.radix_sort(&mut data, Descending).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_already_sorted_and_constant_inputs() {
    let mut constant = vec![7u64; 1_000];
    constant.par_radix_sort(Ascending);
    assert!(constant.iter().all(|&x| x == 7));

    let mut sorted: Vec<u16> = (0..1_000).collect();
    sorted.par_radix_sort(Ascending);
    assert!(sorted.windows(2).all(|w| w[0] < w[1]));
}
