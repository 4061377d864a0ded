use primly::{Add, Ascending, BitwiseOrder, Descending, Max, RadixSort, Reduce, Scan, Unique};

#[test]
fn test_parallel_sort_small_array() {
    let mut data = vec![3.5f32, -1.0, 0.0, 2.25];
    data.as_mut_slice().par_radix_sort(Ascending);
    assert_eq!(data, vec![-1.0, 0.0, 2.25, 3.5], "par_radix_sort failed");
}

#[test]
fn test_parallel_sort_large_array() {
    let mut data: Vec<i32> = (0..100_000).map(|i| if i % 2 == 0 { i } else { -i }).collect();
    data.as_mut_slice().par_radix_sort(Descending);

    for pair in data.windows(2) {
        assert!(pair[0] >= pair[1], "par_radix_sort out of order: {} before {}", pair[0], pair[1]);
    }
    assert_eq!(data[0], 99_998);
    assert_eq!(data[data.len() - 1], -99_999);
}

#[test]
fn test_parallel_reduce_methods() {
    let data = vec![1u64, 2, 3, 4, 5];

    // Test slice method
    assert_eq!(data.as_slice().par_reduce(Add), 15);
    assert_eq!(data.as_slice().par_reduce(Max), 5);

    // Test Vec method
    assert_eq!(data.par_reduce(Add), 15);
}

#[test]
fn test_parallel_scan_methods() {
    let data = vec![2i16, -1, 4];

    let inclusive = data.as_slice().par_inclusive_scan(Add);
    assert_eq!(inclusive, vec![2, 1, 5]);

    let exclusive = data.par_exclusive_scan(Add);
    assert_eq!(exclusive, vec![0, 2, 1]);
}

#[test]
fn test_parallel_unique_small_array() {
    let mut data = vec![4u8, 4, 4, 9, 9, 4];
    let len = data.as_mut_slice().par_unique(BitwiseOrder);
    assert_eq!(&data[..len], &[4, 9, 4], "par_unique failed");
}

#[test]
fn test_parallel_unique_large_array() {
    let mut data: Vec<u32> = (0..100_000).map(|i| i / 3).collect();
    let len = data.par_unique(BitwiseOrder);

    assert_eq!(len, 33_334);
    for (i, &val) in data[..len].iter().enumerate() {
        assert_eq!(val, i as u32, "par_unique large array failed at index {}", i);
    }
}
