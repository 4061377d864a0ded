//! Tuning knobs for the CPU kernels.
//!
//! [`ExecutionConfig::default`] uses the constants at the crate root. Every
//! field can be overridden through a builder method or the environment (see
//! [`ExecutionConfig::from_env`]).

use std::env;
use std::str::FromStr;

use log::debug;

use crate::error::{validation_error, Result};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_THRESHOLD, RADIX_BITS};

/// Largest supported radix digit width.
pub const MAX_RADIX_BITS: u32 = 16;

pub const ENV_NUM_THREADS: &str = "PRIMLY_NUM_THREADS";
pub const ENV_PARALLEL_THRESHOLD: &str = "PRIMLY_PARALLEL_THRESHOLD";
pub const ENV_CHUNK_SIZE: &str = "PRIMLY_CHUNK_SIZE";
pub const ENV_RADIX_BITS: &str = "PRIMLY_RADIX_BITS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Inputs shorter than this run on the calling thread.
    pub parallel_threshold: usize,
    /// Elements per parallel work item.
    pub chunk_size: usize,
    /// Radix digit width in bits, `1..=MAX_RADIX_BITS`.
    pub radix_bits: u32,
    /// Worker count for a [`crate::stream::Stream`]; `None` lets Rayon decide.
    pub num_threads: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_THRESHOLD,
            chunk_size: PARALLEL_CHUNK_SIZE,
            radix_bits: RADIX_BITS,
            num_threads: None,
        }
    }
}

impl ExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_radix_bits(mut self, radix_bits: u32) -> Self {
        self.radix_bits = radix_bits;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Defaults overridden by any `PRIMLY_*` variable that is set.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable does not parse or the
    /// resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = read_env::<usize>(ENV_NUM_THREADS)? {
            config.num_threads = Some(value);
        }
        if let Some(value) = read_env(ENV_PARALLEL_THRESHOLD)? {
            config.parallel_threshold = value;
        }
        if let Some(value) = read_env(ENV_CHUNK_SIZE)? {
            config.chunk_size = value;
        }
        if let Some(value) = read_env(ENV_RADIX_BITS)? {
            config.radix_bits = value;
        }

        config.validate()?;
        debug!("execution config from environment: {config:?}");
        Ok(config)
    }

    /// Checks that every field is usable by the kernels.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(validation_error("chunk size must be positive"));
        }
        if !(1..=MAX_RADIX_BITS).contains(&self.radix_bits) {
            return Err(validation_error(format!(
                "radix bits must be in 1..={MAX_RADIX_BITS}, got {}",
                self.radix_bits
            )));
        }
        if self.num_threads == Some(0) {
            return Err(validation_error("thread count must be positive"));
        }
        Ok(())
    }

    /// Whether an input of `len` elements should be split across workers.
    #[inline]
    pub fn use_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold && len > self.chunk_size
    }
}

fn read_env<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| validation_error(format!("{name}={raw:?} is not a valid value"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(validation_error(format!("{name} is not valid unicode")))
        }
    }
}
