//! Candidate scoring for one round of the forward search.
//!
//! Given:
//! - the predictors selected so far `S`
//! - one candidate column `c`
//! - the response `y` (with `ȳ` and `SST` computed once per search)
//!
//! we solve the normal equations for `S ∪ {c}` (plus `c`'s base features when
//! `c` is an interaction term, plus an intercept) and score the fit with
//! adjusted R².
//!
//! The score uses the explained sum of squares `Σ(ŷᵢ - ȳ)²` over `SST` as the
//! R² term. With an intercept in the model this equals `1 - RSS/SST`, so the
//! criterion is the usual adjusted R².

use nalgebra::DVector;

use crate::domain::{Column, Dataset};
use crate::error::DatasetError;
use crate::math::{adjusted_r_squared, mean, solve_normal_equations, sum_sq_dev};
use crate::models::{design_matrix, predict, response_vector};

/// Response-side quantities shared by every candidate in a search.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub data: &'a Dataset,
    pub y: DVector<f64>,
    pub n: usize,
    pub y_mean: f64,
    /// Total sum of squares `Σ(yᵢ - ȳ)²`.
    pub sst: f64,
}

impl<'a> ScoringContext<'a> {
    pub fn new(data: &'a Dataset, response: &Column) -> Result<Self, DatasetError> {
        let y = response_vector(data, response)?;
        let y_mean = mean(y.as_slice());
        let sst = sum_sq_dev(y.iter().copied(), y_mean);
        Ok(Self {
            data,
            n: y.len(),
            y,
            y_mean,
            sst,
        })
    }
}

/// Result of scoring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateScore {
    /// Adjusted R² of the candidate model with `p` non-intercept columns.
    Scored { score: f64, p: usize },
    /// `XᵀX` could not be inverted (collinear/duplicate columns) or the score
    /// was not finite; the candidate sits out this round.
    Singular,
    /// `n - p - 1 < 1`: the candidate model has no residual degrees of freedom
    /// left. This stops the whole search.
    DofExhausted { p: usize },
}

/// Columns of the model scored for `candidate`.
///
/// `selected ++ [candidate] ++ base features of candidate not yet selected`,
/// without duplicates and limited to columns the dataset actually has.
pub fn candidate_model(data: &Dataset, selected: &[Column], candidate: &Column) -> Vec<Column> {
    let mut model: Vec<Column> = selected.to_vec();
    for column in std::iter::once(candidate.clone()).chain(candidate.base_features()) {
        if data.contains(&column) && !model.contains(&column) {
            model.push(column);
        }
    }
    model
}

/// Score `candidate` on top of `selected`.
pub fn score_candidate(ctx: &ScoringContext<'_>, selected: &[Column], candidate: &Column) -> Result<CandidateScore, DatasetError> {
    let model = candidate_model(ctx.data, selected, candidate);
    let p = model.len();
    let x = design_matrix(ctx.data, &model)?;

    let Some(solution) = solve_normal_equations(&x, &ctx.y) else {
        return Ok(CandidateScore::Singular);
    };

    // Checked after the solve: a singular candidate is skipped even when it
    // would also have exhausted the degrees of freedom.
    if ctx.n < p + 2 {
        return Ok(CandidateScore::DofExhausted { p });
    }

    let fitted = predict(&x, &solution.beta);
    let explained = sum_sq_dev(fitted.iter().copied(), ctx.y_mean);
    let score = adjusted_r_squared(explained / ctx.sst, ctx.n, p);

    if score.is_finite() {
        Ok(CandidateScore::Scored { score, p })
    } else {
        Ok(CandidateScore::Singular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data() -> Dataset {
        Dataset::from_columns(vec![
            (Column::base("y"), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            (Column::base("x1"), vec![1.0, 2.0, 3.0, 4.0, 6.0]),
            (Column::base("x2"), vec![2.0, 1.0, 2.0, 1.0, 2.0]),
            (Column::base("dup"), vec![1.0, 2.0, 3.0, 4.0, 6.0]),
            (Column::interaction(["x1", "x2"]), vec![2.0, 2.0, 6.0, 4.0, 12.0]),
        ])
        .unwrap()
    }

    #[test]
    fn scores_single_candidate_with_adjusted_r_squared() {
        let data = data();
        let ctx = ScoringContext::new(&data, &Column::base("y")).unwrap();
        assert_relative_eq!(ctx.sst, 10.0);

        // r = 12 / sqrt(14.8 * 10), adj = 1 - (1 - r²) · 4/3
        let r2 = 144.0 / 148.0;
        let expected = 1.0 - (1.0 - r2) * 4.0 / 3.0;

        match score_candidate(&ctx, &[], &Column::base("x1")).unwrap() {
            CandidateScore::Scored { score, p } => {
                assert_eq!(p, 1);
                assert_relative_eq!(score, expected, epsilon = 1e-12);
            }
            other => panic!("expected a score, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_column_is_singular() {
        let data = data();
        let ctx = ScoringContext::new(&data, &Column::base("y")).unwrap();
        let score = score_candidate(&ctx, &[Column::base("x1")], &Column::base("dup")).unwrap();
        assert_eq!(score, CandidateScore::Singular);
    }

    #[test]
    fn interaction_drags_in_unselected_bases() {
        let data = data();
        let term = Column::interaction(["x1", "x2"]);
        let model = candidate_model(&data, &[Column::base("x2")], &term);
        assert_eq!(model, vec![Column::base("x2"), term.clone(), Column::base("x1")]);

        let ctx = ScoringContext::new(&data, &Column::base("y")).unwrap();
        match score_candidate(&ctx, &[], &term).unwrap() {
            CandidateScore::Scored { p, .. } => assert_eq!(p, 3),
            other => panic!("expected a score, got {other:?}"),
        }
    }

    #[test]
    fn dof_guard_trips_when_no_residual_freedom_is_left() {
        let data = data();
        // x1, x2, x1*x2 + intercept on 5 rows leaves 1 dof; adding one more
        // column leaves none.
        let extra = Dataset::from_columns(
            data.iter()
                .map(|(c, v)| (c.clone(), v.to_vec()))
                .chain(std::iter::once((Column::base("x3"), vec![0.0, 1.0, 0.0, 0.0, 3.0])))
                .collect(),
        )
        .unwrap();
        let ctx_extra = ScoringContext::new(&extra, &Column::base("y")).unwrap();
        let selected = [Column::base("x1"), Column::base("x2"), Column::interaction(["x1", "x2"])];

        match score_candidate(&ctx_extra, &selected, &Column::base("x3")).unwrap() {
            CandidateScore::DofExhausted { p } => assert_eq!(p, 4),
            other => panic!("expected the dof guard, got {other:?}"),
        }
    }
}
