//! Order-preserving data-parallel iterators for the Klotho benchmarking toolkit.
//!
//! A parallel iterator describes a pipeline over an indexed source (a slice or
//! a generator function). Terminal operations split the source into contiguous
//! ranges, run the pipeline for each range on its own worker, and join the
//! partial results in range order. Results therefore come back in the same order
//! a sequential pass would produce them.
//!
//! ```
//! use klotho_iter::{par_iter, ParallelIterator};
//!
//! let words = vec!["ab", "ba", "cc", "abc"];
//! let with_a: Vec<&&str> = par_iter(&words).filter(|w| w.contains('a')).collect().unwrap();
//! assert_eq!(with_a, vec![&"ab", &"ba", &"abc"]);
//! ```

#![deny(missing_docs)]

pub mod base;

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Range;

use klotho_core::Result;

pub use base::{tree_reduce, ParallelConfig, DEFAULT_MIN_CHUNK};

/// A parallel iterator trait.
///
/// Implementors only describe how to produce the items of one range of their
/// source; splitting and joining is handled by the provided methods.
pub trait ParallelIterator: Sized + Sync {
    /// The type of items yielded by this iterator.
    type Item: Send;

    /// Length of the underlying indexed source, before any filtering.
    fn base_len(&self) -> usize;

    /// Partitioning settings inherited from the source.
    fn config(&self) -> &ParallelConfig;

    /// Feed the items produced by `range` of the source to `sink`, in order.
    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item);

    /// Apply a function to each item in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`klotho_core::KlothoError::WorkerPanicked`] if `func` panicked
    /// on a worker.
    fn for_each<F>(self, func: F) -> Result<()>
    where
        F: Fn(Self::Item) + Send + Sync,
    {
        base::drive(&self, |range| self.feed_range(range, &mut |item| func(item)))?;
        Ok(())
    }

    /// Transform each item in parallel.
    fn map<F, R>(self, func: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> R + Send + Sync,
        R: Send,
    {
        Map { iter: self, func }
    }

    /// Filter items in parallel.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        F: Fn(&Self::Item) -> bool + Send + Sync,
    {
        Filter {
            iter: self,
            predicate,
        }
    }

    /// Reduce items to a single value in parallel.
    ///
    /// Each worker folds its own range, then the partials are combined with
    /// [`tree_reduce`]. `func` should be associative.
    ///
    /// # Errors
    ///
    /// Returns [`klotho_core::KlothoError::WorkerPanicked`] if a worker panicked.
    fn reduce<F>(self, func: F) -> Result<Option<Self::Item>>
    where
        F: Fn(Self::Item, Self::Item) -> Self::Item + Send + Sync,
    {
        let partials = base::drive(&self, |range| {
            let mut acc = None;
            self.feed_range(range, &mut |item| {
                acc = Some(match acc.take() {
                    Some(prev) => func(prev, item),
                    None => item,
                });
            });
            acc
        })?;

        Ok(tree_reduce(partials.into_iter().flatten().collect(), &func))
    }

    /// Count the items that survive the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`klotho_core::KlothoError::WorkerPanicked`] if a worker panicked.
    fn count(self) -> Result<usize> {
        let partials = base::drive(&self, |range| {
            let mut n = 0usize;
            self.feed_range(range, &mut |_| n += 1);
            n
        })?;
        Ok(partials.into_iter().sum())
    }

    /// Collect items into a collection.
    ///
    /// # Errors
    ///
    /// Returns [`klotho_core::KlothoError::WorkerPanicked`] if a worker panicked.
    fn collect<C>(self) -> Result<C>
    where
        C: FromParallelIterator<Self::Item>,
    {
        C::from_par_iter(self)
    }

    /// Replace the partitioning settings for this pipeline.
    fn with_config(self, config: ParallelConfig) -> WithConfig<Self> {
        WithConfig { iter: self, config }
    }
}

/// Trait for converting into a parallel iterator.
pub trait IntoParallelIterator {
    /// The type of items yielded by the iterator.
    type Item: Send;
    /// The parallel iterator type.
    type Iter: ParallelIterator<Item = Self::Item>;

    /// Convert into a parallel iterator.
    fn into_par_iter(self) -> Self::Iter;
}

impl<'a, T: Sync> IntoParallelIterator for &'a [T] {
    type Item = &'a T;
    type Iter = ParSlice<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        par_iter(self)
    }
}

impl<'a, T: Sync> IntoParallelIterator for &'a Vec<T> {
    type Item = &'a T;
    type Iter = ParSlice<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        par_iter(self)
    }
}

/// Trait for collecting from parallel iterators.
pub trait FromParallelIterator<T>: Sized {
    /// Create a collection from a parallel iterator.
    ///
    /// # Errors
    ///
    /// Returns [`klotho_core::KlothoError::WorkerPanicked`] if a worker panicked.
    fn from_par_iter<I>(par_iter: I) -> Result<Self>
    where
        I: ParallelIterator<Item = T>;
}

impl<T: Send> FromParallelIterator<T> for Vec<T> {
    fn from_par_iter<I>(par_iter: I) -> Result<Self>
    where
        I: ParallelIterator<Item = T>,
    {
        let chunks = base::drive(&par_iter, |range| {
            let mut local = Vec::with_capacity(range.len());
            par_iter.feed_range(range, &mut |item| local.push(item));
            local
        })?;

        let total = chunks.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for chunk in chunks {
            out.extend(chunk);
        }
        Ok(out)
    }
}

impl<T: Send + Eq + Hash> FromParallelIterator<T> for HashSet<T> {
    fn from_par_iter<I>(par_iter: I) -> Result<Self>
    where
        I: ParallelIterator<Item = T>,
    {
        let items: Vec<T> = Vec::from_par_iter(par_iter)?;
        Ok(items.into_iter().collect())
    }
}

/// Create a parallel iterator over a slice with the default configuration.
pub fn par_iter<T: Sync>(slice: &[T]) -> ParSlice<'_, T> {
    par_iter_with(slice, ParallelConfig::default())
}

/// Create a parallel iterator over a slice with an explicit configuration.
pub fn par_iter_with<T: Sync>(slice: &[T], config: ParallelConfig) -> ParSlice<'_, T> {
    ParSlice { slice, config }
}

/// Create a parallel iterator yielding `func(0)`, `func(1)`, ... `func(count - 1)`.
///
/// Each index is evaluated on whichever worker owns its range, so `func` may
/// rely on thread-local state such as a per-thread random generator.
pub fn par_generate<F, R>(count: usize, func: F) -> Generate<F>
where
    F: Fn(usize) -> R + Send + Sync,
    R: Send,
{
    par_generate_with(count, ParallelConfig::default(), func)
}

/// [`par_generate`] with an explicit configuration.
pub fn par_generate_with<F, R>(count: usize, config: ParallelConfig, func: F) -> Generate<F>
where
    F: Fn(usize) -> R + Send + Sync,
    R: Send,
{
    Generate {
        count,
        config,
        func,
    }
}

/// A parallel iterator over a slice.
#[derive(Debug, Clone, Copy)]
pub struct ParSlice<'a, T> {
    slice: &'a [T],
    config: ParallelConfig,
}

impl<'a, T: Sync> ParallelIterator for ParSlice<'a, T> {
    type Item = &'a T;

    fn base_len(&self) -> usize {
        self.slice.len()
    }

    fn config(&self) -> &ParallelConfig {
        &self.config
    }

    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item),
    {
        let slice: &'a [T] = self.slice;
        slice[range].iter().for_each(sink);
    }
}

/// A parallel iterator over the indices of a generator function.
#[derive(Debug, Clone)]
pub struct Generate<F> {
    count: usize,
    config: ParallelConfig,
    func: F,
}

impl<F, R> ParallelIterator for Generate<F>
where
    F: Fn(usize) -> R + Send + Sync,
    R: Send,
{
    type Item = R;

    fn base_len(&self) -> usize {
        self.count
    }

    fn config(&self) -> &ParallelConfig {
        &self.config
    }

    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item),
    {
        for i in range {
            sink((self.func)(i));
        }
    }
}

/// A map adapter for parallel iterators.
#[derive(Debug, Clone)]
pub struct Map<I, F> {
    iter: I,
    func: F,
}

impl<I, F, R> ParallelIterator for Map<I, F>
where
    I: ParallelIterator,
    F: Fn(I::Item) -> R + Send + Sync,
    R: Send,
{
    type Item = R;

    fn base_len(&self) -> usize {
        self.iter.base_len()
    }

    fn config(&self) -> &ParallelConfig {
        self.iter.config()
    }

    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item),
    {
        let func = &self.func;
        self.iter.feed_range(range, &mut |item| sink(func(item)));
    }
}

/// A filter adapter for parallel iterators.
#[derive(Debug, Clone)]
pub struct Filter<I, F> {
    iter: I,
    predicate: F,
}

impl<I, F> ParallelIterator for Filter<I, F>
where
    I: ParallelIterator,
    F: Fn(&I::Item) -> bool + Send + Sync,
{
    type Item = I::Item;

    fn base_len(&self) -> usize {
        self.iter.base_len()
    }

    fn config(&self) -> &ParallelConfig {
        self.iter.config()
    }

    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item),
    {
        let predicate = &self.predicate;
        self.iter.feed_range(range, &mut |item| {
            if predicate(&item) {
                sink(item);
            }
        });
    }
}

/// Overrides the partitioning settings of the wrapped pipeline.
#[derive(Debug, Clone)]
pub struct WithConfig<I> {
    iter: I,
    config: ParallelConfig,
}

impl<I: ParallelIterator> ParallelIterator for WithConfig<I> {
    type Item = I::Item;

    fn base_len(&self) -> usize {
        self.iter.base_len()
    }

    fn config(&self) -> &ParallelConfig {
        &self.config
    }

    fn feed_range<S>(&self, range: Range<usize>, sink: &mut S)
    where
        S: FnMut(Self::Item),
    {
        self.iter.feed_range(range, sink);
    }
}
