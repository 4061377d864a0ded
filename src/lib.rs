//! Generic data-parallel primitives.
//!
//! `primly` provides a small family of parallel algorithms, each written once
//! and instantiated for every fixed-width numeric type (`i8`..`i64`,
//! `u8`..`u64`, [`half::f16`], `f32`, `f64`):
//!
//! - **Radix sort** ([`RadixSort`], [`radix_sort_pairs`]) over order-preserving
//!   bit keys ([`Ascending`], [`Descending`])
//! - **Reduce and scan** ([`Reduce`], [`Scan`]) with [`Add`], [`Min`], [`Max`]
//! - **Histogram** ([`Histogram`]) driven by pluggable bin locators
//! - **Sequence** generation ([`sequence`], [`batched_sequence`])
//! - **Unique**: consecutive-duplicate elimination ([`Unique`])
//!
//! Every primitive is parameterized by a stateless operation descriptor from
//! [`ops`], and executed by the Rayon-based kernels in [`kernels`] either
//! directly on slices or through an ordered [`Stream`].
//!
//! # Example
//!
//! ```rust
//! use primly::{Add, Ascending, RadixSort, Scan};
//!
//! let mut data = vec![5i32, -3, 0, 2, -10];
//! data.radix_sort(Ascending);
//! assert_eq!(data, vec![-10, -3, 0, 2, 5]);
//!
//! let prefix = data.inclusive_scan(Add);
//! assert_eq!(prefix, vec![-10, -13, -13, -11, -6]);
//! ```
//!
//! # Choosing a variant
//!
//! Each slice trait offers `scalar_*`, `par_*` and an automatic variant that
//! switches to the parallel kernel at [`PARALLEL_THRESHOLD`] elements.

pub mod config;
pub mod error;
pub mod kernels;
pub mod numeric;
pub mod ops;
pub mod stream;

mod utils;

pub use config::ExecutionConfig;
pub use error::{PrimlyError, Result, UNREPRESENTABLE_BIN};
pub use kernels::{
    batched_sequence, radix_sort_pairs, sequence, sequence_into, Histogram, RadixSort, Reduce,
    Scan, ScanKind, Unique,
};
pub use numeric::{AtomicNumeric, Encoding, Numeric};
pub use ops::{
    Add, AggregationOperation, Ascending, BinLocator, BitwiseOrder, DeduplicationComparator,
    Descending, HistogramAggregator, HistogramCounter, HistogramResult, IdentityBin, Increment,
    IncrementOperation, Iota, LinearBin, Max, Min, ModuloBin, MultiBinLocator, NaturalOrder,
    RadixOrder, SequenceGenerator, Strided,
};
pub use stream::Stream;

/// Inputs with at least this many elements use the parallel kernels.
pub const PARALLEL_THRESHOLD: usize = 65_536;

/// Elements handed to one Rayon task.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

/// Radix digit width in bits (256 buckets per pass).
pub const RADIX_BITS: u32 = 8;
