//! `stepreg`: forward stepwise OLS regression with optional interaction terms.
//!
//! Given a numeric table and a response column, the engine greedily adds the
//! predictor that most improves adjusted R², then fits the chosen model with
//! full inference (standard errors, t statistics, p-values, 95% intervals).
//!
//! - `domain`: columns, datasets and result types
//! - `fit`: interaction expansion, candidate scoring, the search, the final fit
//! - `report`: summaries for a presentation layer
//! - `pipeline`: the `select_model` / `run_selection` entry points
//!
//! The library never installs a logger; it emits `log` records only.

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod report;

pub use domain::{Column, Dataset, Estimate, FitStatistics, FittedModel, ParameterFilter, PredictorEstimate, SelectionConfig};
pub use error::{ConfigError, DatasetError, FitFailure, SelectionError};
pub use fit::{SelectionOutcome, Termination};
pub use pipeline::{SelectionRun, run_selection, select_model};
pub use report::{ModelSummary, format_run_summary, summarize};
