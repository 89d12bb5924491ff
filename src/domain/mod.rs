//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - column descriptors (`Column`) and the interaction separator
//! - the immutable numeric table (`Dataset`) and parameter filters
//! - selection settings and fit outputs (`SelectionConfig`, `FittedModel`, ...)

pub mod column;
pub mod dataset;
pub mod types;

pub use column::*;
pub use dataset::*;
pub use types::*;
