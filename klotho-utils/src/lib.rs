//! Utility functions for the Klotho benchmarking toolkit.

#![deny(missing_docs)]

pub mod random;

pub use random::{random_char, random_char_string, ALPHABET};
