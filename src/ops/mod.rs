//! Stateless operation descriptors.
//!
//! Every primitive is parameterized by a small `Copy` value that carries only
//! behavior. The kernels in [`crate::kernels`] are generic over these
//! contracts and get monomorphized per (descriptor, element type) pair.

pub mod aggregate;
pub mod histogram;
pub mod ordering;
pub mod sequence;
pub mod unique;

pub use aggregate::{Add, AggregationOperation, Max, Min};
pub use histogram::{
    BinLocator, BinsView, HistogramAggregator, HistogramCounter, HistogramResult, IdentityBin,
    Increment, IncrementOperation, LinearBin, ModuloBin, MultiBinLocator, OverflowFlag,
};
pub use ordering::{Ascending, Descending, RadixOrder};
pub use sequence::{Iota, SequenceGenerator, Strided};
pub use unique::{BitwiseOrder, DeduplicationComparator, NaturalOrder};
