//! Shared workloads for the Klotho benchmarks.

use klotho::{par_generate_with, random_char_string, ParallelConfig, ParallelIterator};

/// Input sizes exercised by the comparison benchmarks.
pub const INPUT_SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Length of each generated string.
pub const STRING_LENGTH: usize = 100;

/// Letters a string must contain to survive the filter.
pub const REQUIRED: [&str; 6] = ["a", "b", "g", "h", "w", "z"];

/// Generate `count` random strings of [`STRING_LENGTH`] letters across workers.
///
/// # Panics
///
/// Panics if a generator worker panics.
pub fn generate_input(count: usize) -> Vec<String> {
    par_generate_with(count, ParallelConfig::default(), |_| random_char_string(STRING_LENGTH))
        .collect()
        .expect("input generation failed")
}
