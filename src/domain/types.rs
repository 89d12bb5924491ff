//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the selector, the finalizer and the summarizer
//! - handed to a presentation layer as-is
//! - memoized by an outside cache keyed on the selection inputs

use serde::{Deserialize, Serialize};

use crate::domain::column::Column;
use crate::error::ConfigError;

/// Settings for one model selection run.
///
/// Defaults match the dashboard the engine was built for: no forced-in
/// parameters, at most three predictors, no interaction terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Predictors that are always in the model, in the order given.
    pub force_in: Vec<String>,
    /// Upper bound on the number of selected predictors (forced-in included).
    pub max_vars: usize,
    /// `0` disables interaction terms; `k > 0` expands up to degree `k + 1`.
    pub interaction_degree: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            force_in: Vec::new(),
            max_vars: 3,
            interaction_degree: 0,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_vars == 0 {
            return Err(ConfigError::ZeroMaxVars);
        }
        Ok(())
    }

    /// Highest interaction degree to synthesize, or `None` when disabled.
    ///
    /// A requested degree of `k` expands to products of up to `k + 1` columns,
    /// so "1" means pairwise terms.
    pub fn expansion_degree(&self) -> Option<usize> {
        (self.interaction_degree > 0).then(|| self.interaction_degree + 1)
    }
}

/// Inference for a single model term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub coefficient: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value under Student's t with the residual degrees of freedom.
    pub p_value: f64,
    /// 95% confidence interval `(lower, upper)`.
    pub conf_int: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorEstimate {
    pub column: Column,
    pub estimate: Estimate,
}

/// Goodness-of-fit diagnostics of the final model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    pub n_obs: usize,
    pub df_resid: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Residual standard error `sqrt(RSS / df_resid)`.
    pub sigma: f64,
}

/// The fitted OLS model over the selected predictors plus an intercept.
///
/// Only the finalizer constructs one; everything else reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    response: String,
    predictors: Vec<PredictorEstimate>,
    intercept: Estimate,
    statistics: FitStatistics,
}

impl FittedModel {
    pub(crate) fn new(
        response: String,
        predictors: Vec<PredictorEstimate>,
        intercept: Estimate,
        statistics: FitStatistics,
    ) -> Self {
        Self {
            response,
            predictors,
            intercept,
            statistics,
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// Per-predictor estimates, in selection order (intercept excluded).
    pub fn predictors(&self) -> &[PredictorEstimate] {
        &self.predictors
    }

    pub fn intercept(&self) -> &Estimate {
        &self.intercept
    }

    pub fn statistics(&self) -> &FitStatistics {
        &self.statistics
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.predictors.iter().map(|p| &p.column)
    }

    pub fn estimate(&self, column: &Column) -> Option<&Estimate> {
        self.predictors
            .iter()
            .find(|p| &p.column == column)
            .map(|p| &p.estimate)
    }
}
