//! # Klotho - spinning the threads of every worker
//!
//! Klotho times a simple data-parallel workload: generate a large batch of
//! random lowercase strings, then keep the strings that contain every required
//! substring, once on the calling thread and once spread across workers. The
//! pieces are usable on their own:
//!
//! - [`Chronometer`]: manually started and stopped interval timer
//! - [`random`]: uniform random letters and strings, one generator per thread
//! - [`par_iter`] / [`par_generate`]: order-preserving parallel traversal
//! - [`FilterScenario`]: the end-to-end benchmark driver

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod predicate;
pub mod scenario;

// Re-export core functionality
pub use klotho_core::{checked_length, KlothoError, Result};

// Re-export timing functionality
pub use klotho_metrics::{Chronometer, Clock, ManualClock, MonotonicClock};

// Re-export random generation
pub use klotho_utils::random;
pub use klotho_utils::{random_char, random_char_string, ALPHABET};

// Re-export iterator functionality
pub use klotho_iter::{
    par_generate, par_generate_with, par_iter, par_iter_with, tree_reduce, FromParallelIterator,
    IntoParallelIterator, ParallelConfig, ParallelIterator,
};

pub use predicate::contains_all;
pub use scenario::{FilterScenario, FilterScenarioBuilder, ScenarioReport};

/// Commonly used items, for glob import.
pub mod prelude {
    pub use crate::predicate::contains_all;
    pub use crate::scenario::{FilterScenario, ScenarioReport};
    pub use klotho_core::{KlothoError, Result};
    pub use klotho_iter::{par_generate, par_iter, IntoParallelIterator, ParallelConfig, ParallelIterator};
    pub use klotho_metrics::Chronometer;
    pub use klotho_utils::{random_char, random_char_string};
}
