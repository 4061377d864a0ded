//! Ordered launch context.
//!
//! A [`Stream`] owns a dedicated Rayon thread pool and runs every launch to
//! completion before returning, so launches issued to one stream complete in
//! program order and each launch sees the effects of the previous one. Two
//! streams share nothing; ordering between them is up to the caller.
//!
//! Static configuration is validated before a launch starts. A panic inside a
//! kernel is caught at the launch boundary and reported as
//! [`PrimlyError::LaunchFailed`](crate::error::PrimlyError::LaunchFailed); the
//! output buffers of a failed launch hold no valid results.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::ExecutionConfig;
use crate::error::{launch_failed, stream_error, validation_error, Result};
use crate::kernels::reduce::ScanKind;
use crate::kernels::traits::check_pair_lengths;
use crate::kernels::{histogram, reduce, sequence, sort, unique};
use crate::numeric::{AtomicNumeric, Numeric};
use crate::ops::aggregate::AggregationOperation;
use crate::ops::histogram::{
    BinLocator, HistogramAggregator, HistogramCounter, HistogramResult, Increment,
    IncrementOperation, MultiBinLocator,
};
use crate::ops::ordering::RadixOrder;
use crate::ops::sequence::SequenceGenerator;
use crate::ops::unique::DeduplicationComparator;

pub struct Stream {
    pool: ThreadPool,
    config: ExecutionConfig,
    launches: AtomicU64,
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("threads", &self.pool.current_num_threads())
            .field("config", &self.config)
            .field("launches", &self.launch_count())
            .finish()
    }
}

impl Stream {
    /// Builds a stream with its own worker pool.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid or the thread pool cannot be created.
    pub fn new(config: ExecutionConfig) -> Result<Self> {
        config.validate()?;

        let mut builder =
            ThreadPoolBuilder::new().thread_name(|index| format!("primly-worker-{index}"));
        if let Some(threads) = config.num_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|err| stream_error(err.to_string()))?;

        debug!(
            "created stream with {} workers: {config:?}",
            pool.current_num_threads()
        );
        Ok(Self {
            pool,
            config,
            launches: AtomicU64::new(0),
        })
    }

    /// A stream configured from `PRIMLY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ExecutionConfig::from_env()?)
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Number of launches issued so far, including failed ones.
    pub fn launch_count(&self) -> u64 {
        self.launches.load(Ordering::Relaxed)
    }

    /// Runs `kernel` on this stream's workers and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`PrimlyError::LaunchFailed`](crate::error::PrimlyError::LaunchFailed)
    /// if the kernel panicked.
    pub fn launch<R, F>(&self, name: &str, kernel: F) -> Result<R>
    where
        R: Send,
        F: FnOnce(&ExecutionConfig) -> R + Send,
    {
        let id = self.launches.fetch_add(1, Ordering::Relaxed);
        debug!("launch #{id}: {name}");

        let config = &self.config;
        self.pool
            .install(|| panic::catch_unwind(AssertUnwindSafe(|| kernel(config))))
            .map_err(|payload| {
                let message = panic_message(payload.as_ref());
                debug!("launch #{id} ({name}) failed: {message}");
                launch_failed(name, message)
            })
    }

    pub fn radix_sort<T, O>(&self, data: &mut [T], order: O) -> Result<()>
    where
        T: Numeric,
        O: RadixOrder<T>,
    {
        self.launch("radix_sort", |config| {
            let mut units = vec![(); data.len()];
            sort::radix_sort_pairs(data, &mut units, &order, config);
        })
    }

    pub fn radix_sort_pairs<T, V, O>(&self, keys: &mut [T], values: &mut [V], order: O) -> Result<()>
    where
        T: Numeric,
        V: Copy + Send + Sync,
        O: RadixOrder<T>,
    {
        check_pair_lengths(keys.len(), values.len())?;
        self.launch("radix_sort_pairs", |config| {
            sort::radix_sort_pairs(keys, values, &order, config)
        })
    }

    pub fn reduce<T, Op>(&self, data: &[T], op: Op) -> Result<T>
    where
        T: AtomicNumeric,
        Op: AggregationOperation<T>,
    {
        self.launch("reduce", |config| reduce::reduce(data, &op, config))
    }

    pub fn atomic_reduce<T, Op>(&self, data: &[T], op: Op) -> Result<T>
    where
        T: AtomicNumeric,
        Op: AggregationOperation<T>,
    {
        self.launch("atomic_reduce", |config| {
            reduce::atomic_reduce(data, &op, config)
        })
    }

    pub fn scan<T, Op>(&self, data: &[T], op: Op, kind: ScanKind) -> Result<Vec<T>>
    where
        T: AtomicNumeric,
        Op: AggregationOperation<T>,
    {
        self.launch("scan", |config| reduce::scan(data, &op, kind, config))
    }

    /// Counts `data` into `bin_count` zeroed bins of counter type `C`.
    ///
    /// # Errors
    ///
    /// Fails before launching if `bin_count` is zero, and fails the launch if
    /// `locator` returns an index outside `[0, bin_count)`.
    pub fn histogram<T, C, L>(
        &self,
        data: &[T],
        bin_count: usize,
        locator: L,
    ) -> Result<HistogramResult<C>>
    where
        T: Numeric,
        C: HistogramCounter,
        L: BinLocator<T>,
    {
        self.multi_bin_histogram(data, bin_count, HistogramAggregator::new(locator), Increment)
    }

    /// Histogram with an explicit multi-bin locator and increment policy.
    pub fn multi_bin_histogram<T, C, M, I>(
        &self,
        data: &[T],
        bin_count: usize,
        locator: M,
        op: I,
    ) -> Result<HistogramResult<C>>
    where
        T: Numeric,
        C: HistogramCounter,
        M: MultiBinLocator<T>,
        I: IncrementOperation<C>,
    {
        check_bin_count(bin_count)?;
        self.launch("histogram", |config| {
            histogram::histogram(data, bin_count, &locator, &op, config)
        })?
    }

    /// Accumulates onto `bins` and returns whether a counter overflowed.
    pub fn histogram_into<T, C, L>(&self, data: &[T], bins: &mut [C], locator: L) -> Result<bool>
    where
        T: Numeric,
        C: HistogramCounter,
        L: BinLocator<T>,
    {
        check_bin_count(bins.len())?;
        let locator = HistogramAggregator::new(locator);
        self.launch("histogram_into", |config| {
            histogram::histogram_into(data, bins, &locator, &Increment, config)
        })?
    }

    pub fn sequence<T, G>(&self, len: usize, generator: G) -> Result<Vec<T>>
    where
        T: Numeric,
        G: SequenceGenerator<T>,
    {
        self.launch("sequence", |config| {
            let mut output = vec![T::zero(); len];
            sequence::sequence_into(&mut output, &generator, config);
            output
        })
    }

    pub fn batched_sequence<T, G>(
        &self,
        len: usize,
        sequence_length: u64,
        batch_length: u64,
        generator: G,
    ) -> Result<Vec<T>>
    where
        T: Numeric,
        G: SequenceGenerator<T>,
    {
        if sequence_length == 0 || batch_length == 0 {
            return Err(validation_error(
                "batched sequence requires positive sequence and batch lengths",
            ));
        }
        self.launch("batched_sequence", |config| {
            let mut output = vec![T::zero(); len];
            sequence::batched_sequence_into(
                &mut output,
                sequence_length,
                batch_length,
                &generator,
                config,
            )
            .map(|()| output)
        })?
    }

    /// Collapses consecutive duplicates in place and returns the new length.
    pub fn unique<T, C>(&self, data: &mut [T], comparator: C) -> Result<usize>
    where
        T: Numeric,
        C: DeduplicationComparator<T>,
    {
        self.launch("unique", |config| unique::unique(data, &comparator, config))
    }
}

fn check_bin_count(bin_count: usize) -> Result<()> {
    if bin_count == 0 {
        return Err(validation_error("histogram requires at least one bin"));
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "kernel panicked".to_string()
    }
}
