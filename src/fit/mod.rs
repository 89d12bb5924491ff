//! Model selection orchestration.
//!
//! Responsibilities:
//!
//! - synthesize interaction terms (`interactions`)
//! - score candidate predictors for one round (`fitter`)
//! - run the greedy forward search (`selection`)
//! - fit the final model with full inference (`finalize`)

pub mod finalize;
pub mod fitter;
pub mod interactions;
pub mod selection;

pub use finalize::*;
pub use fitter::*;
pub use interactions::*;
pub use selection::*;
