//! Work partitioning and the fan-out/fan-in driver shared by every parallel
//! iterator.
//!
//! The input is split into contiguous ranges, one per worker. Each worker runs
//! on a scoped thread and produces a partial result for its range; partials are
//! joined in range order, which is what keeps traversal order stable.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use klotho_core::{KlothoError, Result};
use tracing::debug;

use crate::ParallelIterator;

/// Default minimum number of items handed to one worker.
pub const DEFAULT_MIN_CHUNK: usize = 1024;

/// Controls how a traversal is spread across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Upper bound on concurrently running workers.
    pub workers: usize,
    /// Inputs shorter than this per worker are not split further.
    pub min_chunk: usize,
}

impl ParallelConfig {
    /// Create a configuration with explicit limits.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::InvalidConfiguration`] if either limit is zero.
    pub fn new(workers: usize, min_chunk: usize) -> Result<Self> {
        let config = Self { workers, min_chunk };
        config.validate()?;
        Ok(config)
    }

    /// A configuration that never fans out.
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            workers: 1,
            min_chunk: DEFAULT_MIN_CHUNK,
        }
    }

    /// Check that both limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::InvalidConfiguration`] if either limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(KlothoError::config("workers must be at least 1"));
        }
        if self.min_chunk == 0 {
            return Err(KlothoError::config("min_chunk must be at least 1"));
        }
        Ok(())
    }

    /// Split `0..len` into at most `workers` contiguous, ordered ranges.
    #[must_use]
    pub fn split(&self, len: usize) -> Vec<Range<usize>> {
        if len == 0 {
            return Vec::new();
        }

        let by_size = len.div_ceil(self.min_chunk.max(1));
        let parts = by_size.min(self.workers.max(1)).max(1);
        let chunk = len.div_ceil(parts);

        (0..len)
            .step_by(chunk)
            .map(|start| start..(start + chunk).min(len))
            .collect()
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4);
        Self {
            workers,
            min_chunk: DEFAULT_MIN_CHUNK,
        }
    }
}

/// Run `work` once per range of `iter` and return the partials in range order.
///
/// A single range runs on the calling thread. A panic in `work` is reported as
/// [`KlothoError::WorkerPanicked`] on either path.
pub(crate) fn drive<I, R, F>(iter: &I, work: F) -> Result<Vec<R>>
where
    I: ParallelIterator,
    R: Send,
    F: Fn(Range<usize>) -> R + Sync,
{
    let len = iter.base_len();
    let ranges = iter.config().split(len);

    if ranges.len() <= 1 {
        return panic::catch_unwind(AssertUnwindSafe(|| ranges.into_iter().map(&work).collect()))
            .map_err(|_| KlothoError::WorkerPanicked);
    }

    debug!(len, workers = ranges.len(), "fanning out traversal");

    thread::scope(|scope| {
        let work = &work;
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| scope.spawn(move || work(range)))
            .collect();

        let mut partials = Vec::with_capacity(handles.len());
        let mut panicked = false;
        for handle in handles {
            match handle.join() {
                Ok(partial) => partials.push(partial),
                Err(_) => panicked = true,
            }
        }

        if panicked {
            Err(KlothoError::WorkerPanicked)
        } else {
            Ok(partials)
        }
    })
}

/// Combine `items` pairwise, left to right, until one value remains.
///
/// Neighbouring values are always combined in their original order, so any
/// associative `func` gives the same answer as a sequential fold.
pub fn tree_reduce<T, F>(mut items: Vec<T>, func: F) -> Option<T>
where
    F: Fn(T, T) -> T,
{
    while items.len() > 1 {
        let mut next = Vec::with_capacity(items.len().div_ceil(2));
        let mut pairs = items.into_iter();

        while let Some(left) = pairs.next() {
            match pairs.next() {
                Some(right) => next.push(func(left, right)),
                None => next.push(left),
            }
        }

        items = next;
    }

    items.pop()
}
