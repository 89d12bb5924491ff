//! Linear model building blocks.
//!
//! Design matrices are assembled here as small, pure functions so that the
//! search and the final fit share exactly the same column layout.

pub mod design;

pub use design::*;
