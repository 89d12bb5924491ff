//! Final OLS fit over the selected predictors.
//!
//! Produces coefficients, standard errors, t statistics, two-sided p-values and
//! 95% confidence intervals. Anything that would make those numbers
//! untrustworthy (singular design, no residual degrees of freedom, zero
//! standard errors, non-finite values) is a `FitFailure`; there is no partially
//! filled model.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::{Column, Dataset, Estimate, FitStatistics, FittedModel, PredictorEstimate};
use crate::error::{FitFailure, SelectionError};
use crate::math::{adjusted_r_squared, mean, solve_normal_equations, sum_sq_dev, t_quantile, two_sided_p_value};
use crate::models::{design_matrix, predict, response_vector};

/// Coverage of the reported confidence intervals.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// `RSS / SST` at or below this is an exact fit. The same ratio of `SST` to
/// `Σyᵢ²` marks a constant response.
const PERFECT_FIT_RSS_RATIO: f64 = 1e-24;

/// Fit `response ~ selected + intercept` with full inference.
pub fn finalize(data: &Dataset, selected: &[Column], response: &Column) -> Result<FittedModel, SelectionError> {
    let x = design_matrix(data, selected)?;
    let y = response_vector(data, response)?;

    fit_ols(&x, &y, selected)
        .map(|(predictors, intercept, statistics)| {
            FittedModel::new(response.display_name(), predictors, intercept, statistics)
        })
        .map_err(|failure| {
            debug!("final fit of {} on {selected:?} failed: {failure}", response);
            SelectionError::Fit(failure)
        })
}

fn fit_ols(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    selected: &[Column],
) -> Result<(Vec<PredictorEstimate>, Estimate, FitStatistics), FitFailure> {
    if selected.is_empty() {
        return Err(FitFailure::NoPredictors);
    }

    let n = x.nrows();
    let k = x.ncols();
    if n < k + 1 {
        return Err(FitFailure::InsufficientDegreesOfFreedom {
            n_obs: n,
            n_params: k,
        });
    }
    let df_resid = n - k;
    let df = df_resid as f64;

    let solution = solve_normal_equations(x, y).ok_or(FitFailure::SingularDesign)?;
    let (beta, gram_inv) = (solution.beta, solution.gram_inv);

    let fitted = predict(x, &beta);
    let rss: f64 = (y - &fitted).iter().map(|r| r * r).sum();
    let sst = sum_sq_dev(y.iter().copied(), mean(y.as_slice()));
    if !(rss > PERFECT_FIT_RSS_RATIO * sst && sst > PERFECT_FIT_RSS_RATIO * y.norm_squared()) {
        return Err(FitFailure::PerfectFit);
    }
    let sigma2 = rss / df;
    if !sigma2.is_finite() {
        return Err(FitFailure::NonFinite("residual variance"));
    }

    let t_crit = t_quantile(0.5 + CONFIDENCE_LEVEL / 2.0, df).ok_or(FitFailure::NonFinite("t quantile"))?;

    // Intercept is the last column of `x`.
    let names = selected
        .iter()
        .map(Column::display_name)
        .chain(std::iter::once("Intercept".to_string()));

    let mut estimates = Vec::with_capacity(k);
    for (j, name) in names.enumerate() {
        let variance = sigma2 * gram_inv[(j, j)];
        if !(variance > 0.0) {
            return Err(FitFailure::DegenerateStandardErrors(name));
        }
        let std_error = variance.sqrt();
        let coefficient = beta[j];
        let t_value = coefficient / std_error;
        let p_value = two_sided_p_value(t_value, df).ok_or(FitFailure::NonFinite("p-value"))?;

        let estimate = Estimate {
            coefficient,
            std_error,
            t_value,
            p_value,
            conf_int: (coefficient - t_crit * std_error, coefficient + t_crit * std_error),
        };
        if !is_finite_estimate(&estimate) {
            return Err(FitFailure::NonFinite("estimate"));
        }
        estimates.push(estimate);
    }

    let Some(intercept) = estimates.pop() else {
        return Err(FitFailure::NoPredictors);
    };
    let predictors = selected
        .iter()
        .cloned()
        .zip(estimates)
        .map(|(column, estimate)| PredictorEstimate { column, estimate })
        .collect();

    let r_squared = 1.0 - rss / sst;
    let statistics = FitStatistics {
        n_obs: n,
        df_resid,
        r_squared,
        adj_r_squared: adjusted_r_squared(r_squared, n, k - 1),
        sigma: sigma2.sqrt(),
    };
    if !(statistics.r_squared.is_finite() && statistics.adj_r_squared.is_finite()) {
        return Err(FitFailure::NonFinite("R²"));
    }

    Ok((predictors, intercept, statistics))
}

fn is_finite_estimate(e: &Estimate) -> bool {
    [e.coefficient, e.std_error, e.t_value, e.p_value, e.conf_int.0, e.conf_int.1]
        .iter()
        .all(|v| v.is_finite())
}
