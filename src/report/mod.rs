//! Reporting: model summaries for presentation and a plain-text run report.

pub mod format;
pub mod summary;

pub use format::*;
pub use summary::*;
