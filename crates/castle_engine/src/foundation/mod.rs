//! Foundation module
//!
//! Building blocks shared by every subsystem:
//! - `math`: nalgebra aliases, matrix builders and scalar helpers
//! - `time`: frame timer and stopwatch
//! - `logging`: logger setup for binaries

pub mod math;
pub mod time;
pub mod logging;
