//! Interval timing for the Klotho benchmarking toolkit.
//!
//! A [`Chronometer`] is started and stopped by hand and reports the most recently
//! completed interval. It reads time through a [`Clock`], which is a
//! [`MonotonicClock`] in normal use and a [`ManualClock`] when a test needs to
//! control exactly how much time passes.

#![deny(missing_docs)]

pub mod chronometer;
pub mod clock;

pub use chronometer::Chronometer;
pub use clock::{Clock, ManualClock, MonotonicClock};
