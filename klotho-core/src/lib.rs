//! Core types shared by every Klotho crate.

#![deny(missing_docs)]

pub mod error;

pub use error::{checked_length, KlothoError, Result};
