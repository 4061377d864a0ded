//! Error types for primly operations.
//!
//! Per-element conditions (counter overflow, wrapping sums) are reported as
//! data and never show up here. This module only covers failures that concern
//! a whole launch: invalid static configuration detected before any work is
//! issued, contract violations observed while a kernel ran, and kernels that
//! died mid-launch.

use thiserror::Error;

/// Errors that can occur during primly operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimlyError {
    /// Input validation error.
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
    /// Two buffers that must be the same length were not.
    #[error("Length mismatch: {message} (expected {expected}, found {found})")]
    LengthMismatch {
        /// The length required by the operation.
        expected: usize,
        /// The length that was supplied.
        found: usize,
        /// Human-readable error message.
        message: String,
    },
    /// A bin locator produced an index outside `[0, bin_count)`.
    #[error("Bin locator returned {} for a histogram with {bin_count} bins", describe_bin_index(.index))]
    BinOutOfRange {
        /// The offending bin index, or [`UNREPRESENTABLE_BIN`] when the
        /// locator's value had no `usize` form (negative or too large).
        index: usize,
        /// Number of bins in the histogram.
        bin_count: usize,
    },
    /// The launch context could not be created.
    #[error("Failed to build launch context: {message}")]
    StreamError {
        /// Human-readable error message.
        message: String,
    },
    /// A kernel failed while running; no partial results are valid.
    #[error("Launch of `{kernel}` failed: {message}")]
    LaunchFailed {
        /// Name of the kernel that failed.
        kernel: String,
        /// Human-readable error message.
        message: String,
    },
}

/// Bin index reported for values that cannot be a `usize` at all, such as a
/// negative value under [`IdentityBin`](crate::ops::IdentityBin).
pub const UNREPRESENTABLE_BIN: usize = usize::MAX - 1;

fn describe_bin_index(index: &usize) -> String {
    if *index >= UNREPRESENTABLE_BIN {
        "a negative or unrepresentable index".to_string()
    } else {
        format!("index {index}")
    }
}

/// Result type alias for primly operations.
pub type Result<T> = std::result::Result<T, PrimlyError>;

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> PrimlyError {
    PrimlyError::ValidationError {
        message: message.into(),
    }
}

/// Creates a length mismatch error.
pub fn length_mismatch(expected: usize, found: usize, message: impl Into<String>) -> PrimlyError {
    PrimlyError::LengthMismatch {
        expected,
        found,
        message: message.into(),
    }
}

/// Creates a bin out of range error.
pub fn bin_out_of_range(index: usize, bin_count: usize) -> PrimlyError {
    PrimlyError::BinOutOfRange { index, bin_count }
}

/// Creates a stream construction error.
pub fn stream_error(message: impl Into<String>) -> PrimlyError {
    PrimlyError::StreamError {
        message: message.into(),
    }
}

/// Creates a launch failure error.
pub fn launch_failed(kernel: impl Into<String>, message: impl Into<String>) -> PrimlyError {
    PrimlyError::LaunchFailed {
        kernel: kernel.into(),
        message: message.into(),
    }
}
