//! Error types.
//!
//! The engine separates three kinds of problems:
//!
//! - `DatasetError`: the table handed to us breaks a data-model invariant
//!   (ragged columns, duplicate names, unknown response, ...).
//! - `ConfigError`: the selection settings are unusable.
//! - `FitFailure`: the final OLS fit cannot produce trustworthy estimates.
//!
//! `SelectionError` wraps all three for the top-level entry points. Callers that
//! only render a "could not fit" state can match on `SelectionError::Fit`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("Dataset has no columns.")]
    Empty,

    #[error("Column '{column}' has {found} rows, expected {expected}.")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column '{0}'.")]
    DuplicateColumn(String),

    #[error("Invalid column name '{0}': names must be non-empty and must not contain '*'.")]
    InvalidName(String),

    #[error("Invalid interaction term '{0}': needs at least two distinct base columns.")]
    InvalidInteraction(String),

    #[error("Column '{column}' has a non-finite value at row {row}.")]
    NonFinite { column: String, row: usize },

    #[error("Unknown column '{0}'.")]
    UnknownColumn(String),

    #[error("No parameters selected to include in the model.")]
    EmptySelection,

    #[error("Invalid synthetic sample settings: {0}")]
    InvalidSynthetic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_vars must be at least 1.")]
    ZeroMaxVars,
}

/// Why the final OLS fit was rejected.
///
/// Every variant means "no model"; there is no partially valid result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitFailure {
    #[error("No predictors could be fit.")]
    NoPredictors,

    #[error("Not enough observations: n={n_obs} with {n_params} parameters leaves no residual degrees of freedom.")]
    InsufficientDegreesOfFreedom { n_obs: usize, n_params: usize },

    #[error("Design matrix is singular or too ill-conditioned to invert.")]
    SingularDesign,

    #[error("Response is fit exactly; standard errors are undefined.")]
    PerfectFit,

    #[error("Standard error for '{0}' is degenerate (zero or negative variance).")]
    DegenerateStandardErrors(String),

    #[error("Non-finite {0} in fitted model.")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot calculate fit for given selection: {0}")]
    Fit(#[from] FitFailure),
}

impl SelectionError {
    /// The numerical failure behind this error, if it is one.
    pub fn fit_failure(&self) -> Option<&FitFailure> {
        match self {
            SelectionError::Fit(failure) => Some(failure),
            _ => None,
        }
    }
}
