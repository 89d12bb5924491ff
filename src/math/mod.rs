//! Mathematical utilities: normal-equation solves and t-distribution helpers.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
