//! Data generation helpers.

pub mod sample;

pub use sample::{SyntheticSpec, synthetic_dataset};
