//! The sequential versus parallel filtering benchmark.
//!
//! A [`FilterScenario`] generates `count` random strings of `string_length`
//! letters, then keeps the strings containing every required substring twice:
//! once on the calling thread and once through [`klotho_iter`]. Each phase is
//! timed with the same [`Chronometer`].

use std::collections::HashSet;
use std::time::Duration;

use klotho_core::{KlothoError, Result};
use klotho_iter::{par_generate_with, par_iter_with, ParallelConfig, ParallelIterator};
use klotho_metrics::Chronometer;
use klotho_utils::random::{random_char_string, random_char_string_with};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::predicate::contains_all;

/// Default number of generated strings.
pub const DEFAULT_COUNT: usize = 100_000;

/// Default length of each generated string.
pub const DEFAULT_STRING_LENGTH: usize = 100;

/// Letters a string must contain to survive the default filter.
pub const DEFAULT_REQUIRED: [&str; 6] = ["a", "b", "g", "h", "w", "z"];

/// A configured filtering benchmark.
#[derive(Debug, Clone)]
pub struct FilterScenario {
    count: usize,
    string_length: usize,
    required: Vec<String>,
    parallel: ParallelConfig,
    parallel_generation: bool,
    seed: Option<u64>,
}

impl FilterScenario {
    /// Create a builder populated with the defaults.
    pub fn builder() -> FilterScenarioBuilder {
        FilterScenarioBuilder::new()
    }

    /// Number of strings generated per run.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Length of every generated string.
    pub fn string_length(&self) -> usize {
        self.string_length
    }

    /// Substrings a string must contain to be kept.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Partitioning used by the parallel phases.
    pub fn parallel_config(&self) -> ParallelConfig {
        self.parallel
    }

    /// Produce the input strings.
    ///
    /// With a seed the output only depends on the seed, whichever generation
    /// strategy is used. Without one each worker draws from its own
    /// thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::WorkerPanicked`] if parallel generation fails.
    pub fn generate(&self) -> Result<Vec<String>> {
        let length = self.string_length;
        let seed = self.seed;
        let make = move |i: usize| match seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(index_seed(seed, i));
                random_char_string_with(&mut rng, length)
            }
            None => random_char_string(length),
        };

        if self.parallel_generation {
            par_generate_with(self.count, self.parallel, make).collect()
        } else {
            Ok((0..self.count).map(make).collect())
        }
    }

    /// Keep the strings containing every required substring, on this thread.
    pub fn filter_sequential(&self, input: &[String]) -> Vec<String> {
        input
            .iter()
            .filter(|s| contains_all(s, &self.required))
            .cloned()
            .collect()
    }

    /// Keep the strings containing every required substring, across workers.
    ///
    /// The result is in input order.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::WorkerPanicked`] if a worker panicked.
    pub fn filter_parallel(&self, input: &[String]) -> Result<Vec<String>> {
        let required = &self.required;
        par_iter_with(input, self.parallel)
            .filter(|s| contains_all(s, required))
            .map(String::clone)
            .collect()
    }

    /// Generate the input and time both filtering strategies over it.
    ///
    /// # Errors
    ///
    /// Propagates failures from generation, traversal or the chronometer.
    pub fn run(&self) -> Result<ScenarioReport> {
        let mut chrono = Chronometer::new();

        chrono.start();
        let generated = self.generate()?;
        let generation_time = chrono.stop()?;
        info!(
            count = generated.len(),
            length = self.string_length,
            parallel = self.parallel_generation,
            millis = millis(generation_time),
            "generated random strings"
        );

        chrono.start();
        let sequential = self.filter_sequential(&generated);
        let sequential_time = chrono.stop()?;
        info!(
            kept = sequential.len(),
            millis = millis(sequential_time),
            nanos = nanos(sequential_time),
            "sequential filter finished"
        );

        chrono.start();
        let parallel = self.filter_parallel(&generated)?;
        let parallel_time = chrono.stop()?;
        info!(
            kept = parallel.len(),
            workers = self.parallel.workers,
            millis = millis(parallel_time),
            nanos = nanos(parallel_time),
            "parallel filter finished"
        );

        let report = ScenarioReport {
            generated,
            sequential,
            parallel,
            generation_time,
            sequential_time,
            parallel_time,
        };

        if !report.agrees() {
            warn!(
                sequential = report.sequential.len(),
                parallel = report.parallel.len(),
                "filter strategies disagree"
            );
        }

        Ok(report)
    }
}

impl Default for FilterScenario {
    fn default() -> Self {
        FilterScenarioBuilder::new().into_scenario()
    }
}

/// Builder for configuring a [`FilterScenario`].
#[derive(Debug, Clone)]
pub struct FilterScenarioBuilder {
    count: usize,
    string_length: usize,
    required: Vec<String>,
    workers: usize,
    chunk_size: usize,
    parallel_generation: bool,
    seed: Option<u64>,
}

impl FilterScenarioBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        let parallel = ParallelConfig::default();
        Self {
            count: DEFAULT_COUNT,
            string_length: DEFAULT_STRING_LENGTH,
            required: DEFAULT_REQUIRED.iter().map(|s| (*s).to_string()).collect(),
            workers: parallel.workers,
            chunk_size: parallel.min_chunk,
            parallel_generation: true,
            seed: None,
        }
    }

    /// Set the number of strings to generate.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the length of each generated string.
    pub fn string_length(mut self, length: usize) -> Self {
        self.string_length = length;
        self
    }

    /// Set the substrings a string must contain to be kept.
    pub fn required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of workers for the parallel phases.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the smallest range handed to a single worker.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Generate the input across workers (`true`) or on the calling thread.
    pub fn parallel_generation(mut self, enabled: bool) -> Self {
        self.parallel_generation = enabled;
        self
    }

    /// Make generation deterministic.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and build the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::InvalidConfiguration`] if `workers` or
    /// `chunk_size` is zero.
    pub fn build(self) -> Result<FilterScenario> {
        ParallelConfig::new(self.workers, self.chunk_size).map_err(|err| match err {
            KlothoError::InvalidConfiguration(msg) => {
                KlothoError::config(format!("filter scenario: {msg}"))
            }
            other => other,
        })?;
        Ok(self.into_scenario())
    }

    fn into_scenario(self) -> FilterScenario {
        FilterScenario {
            count: self.count,
            string_length: self.string_length,
            required: self.required,
            parallel: ParallelConfig {
                workers: self.workers,
                min_chunk: self.chunk_size,
            },
            parallel_generation: self.parallel_generation,
            seed: self.seed,
        }
    }
}

impl Default for FilterScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one [`FilterScenario::run`].
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// The generated input.
    pub generated: Vec<String>,
    /// Strings kept by the sequential pass.
    pub sequential: Vec<String>,
    /// Strings kept by the parallel pass.
    pub parallel: Vec<String>,
    /// Time spent generating the input.
    pub generation_time: Duration,
    /// Time spent in the sequential filter.
    pub sequential_time: Duration,
    /// Time spent in the parallel filter.
    pub parallel_time: Duration,
}

impl ScenarioReport {
    /// Both passes kept the same strings in the same order.
    pub fn agrees(&self) -> bool {
        self.sequential == self.parallel
    }

    /// Both passes kept the same set of strings, ignoring order.
    pub fn agrees_as_set(&self) -> bool {
        let sequential: HashSet<&String> = self.sequential.iter().collect();
        let parallel: HashSet<&String> = self.parallel.iter().collect();
        sequential == parallel
    }

    /// Sequential time divided by parallel time, or `None` if the parallel
    /// pass was too fast to measure.
    pub fn speedup(&self) -> Option<f64> {
        let parallel = self.parallel_time.as_secs_f64();
        if parallel == 0.0 {
            None
        } else {
            Some(self.sequential_time.as_secs_f64() / parallel)
        }
    }
}

/// Seed for string `index`; the index is spread by the golden-ratio constant.
fn index_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FilterScenarioBuilder {
        FilterScenario::builder()
            .count(1_000)
            .string_length(20)
            .required(["a", "b"])
            .workers(4)
            .chunk_size(16)
    }

    #[test]
    fn test_defaults() {
        let scenario = FilterScenario::default();
        assert_eq!(scenario.count(), DEFAULT_COUNT);
        assert_eq!(scenario.string_length(), DEFAULT_STRING_LENGTH);
        assert_eq!(scenario.required().len(), DEFAULT_REQUIRED.len());
    }

    #[test]
    fn test_builder_rejects_zero_workers() {
        let err = small().workers(0).build().unwrap_err();
        assert!(matches!(err, KlothoError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_builder_rejects_zero_chunk() {
        assert!(small().chunk_size(0).build().is_err());
    }

    #[test]
    fn test_generate_shape() {
        let scenario = small().build().unwrap();
        let input = scenario.generate().unwrap();

        assert_eq!(input.len(), 1_000);
        assert!(input
            .iter()
            .all(|s| s.len() == 20 && s.bytes().all(|b| b.is_ascii_lowercase())));
    }

    #[test]
    fn test_seeded_generation_ignores_strategy() {
        let parallel = small().seed(42).parallel_generation(true).build().unwrap();
        let sequential = small().seed(42).parallel_generation(false).build().unwrap();

        assert_eq!(parallel.generate().unwrap(), sequential.generate().unwrap());
    }

    #[test]
    fn test_adjacent_seeds_are_not_shifted() {
        let first = small().count(64).seed(42).build().unwrap().generate().unwrap();
        let second = small().count(64).seed(43).build().unwrap().generate().unwrap();

        assert_ne!(first[1..], second[..63]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_filters_agree() {
        let scenario = small().build().unwrap();
        let input = scenario.generate().unwrap();

        let sequential = scenario.filter_sequential(&input);
        let parallel = scenario.filter_parallel(&input).unwrap();

        assert_eq!(sequential, parallel);
        assert!(sequential.iter().all(|s| s.contains('a') && s.contains('b')));
    }

    #[test]
    fn test_run_report() {
        let report = small().seed(7).build().unwrap().run().unwrap();

        assert_eq!(report.generated.len(), 1_000);
        assert!(report.sequential.len() <= report.generated.len());
        assert!(report.agrees());
        assert!(report.agrees_as_set());
    }

    #[test]
    fn test_set_agreement_ignores_order() {
        let report = ScenarioReport {
            generated: Vec::new(),
            sequential: vec!["ab".into(), "ba".into()],
            parallel: vec!["ba".into(), "ab".into()],
            generation_time: Duration::ZERO,
            sequential_time: Duration::from_millis(10),
            parallel_time: Duration::from_millis(5),
        };

        assert!(!report.agrees());
        assert!(report.agrees_as_set());
        assert_eq!(report.speedup(), Some(2.0));
    }

    #[test]
    fn test_speedup_unmeasurable() {
        let report = ScenarioReport {
            generated: Vec::new(),
            sequential: Vec::new(),
            parallel: Vec::new(),
            generation_time: Duration::ZERO,
            sequential_time: Duration::from_millis(1),
            parallel_time: Duration::ZERO,
        };
        assert_eq!(report.speedup(), None);
    }
}
