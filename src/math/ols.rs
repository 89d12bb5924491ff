//! Normal-equation solver with singularity detection.
//!
//! Every candidate scored during the forward search is a small problem
//!
//! ```text
//! β = (XᵀX)⁻¹ Xᵀ y,    X = [x₁ … x_k, 1]
//! ```
//!
//! and the final model needs `(XᵀX)⁻¹` itself for the coefficient covariance.
//! The intercept is handled analytically rather than as a regular column:
//!
//! - predictors are centered, `X_c = X − 1·x̄ᵀ`, which spans the same space
//!   as `X` together with the intercept but does not make a predictor with a
//!   large offset look parallel to the intercept
//! - centered columns are scaled to unit norm, and the scaled Gram matrix is
//!   rejected when a column is constant, when its Cholesky factorization
//!   fails, or when its eigenvalue spread exceeds `1 / GRAM_RCOND_MIN`
//! - slopes come from `G = X_cᵀX_c`; the intercept is `ȳ − x̄ᵀβ`
//! - the full inverse is assembled blockwise:
//!
//! ```text
//! (XᵀX)⁻¹ = [  G⁻¹         −G⁻¹x̄          ]
//!           [ −x̄ᵀG⁻¹   1/n + x̄ᵀG⁻¹x̄ ]
//! ```

use nalgebra::{Cholesky, DMatrix, DVector};

/// Smallest accepted ratio `λ_min / λ_max` of the centered, column-scaled
/// Gram matrix.
pub const GRAM_RCOND_MIN: f64 = 1e-12;

/// Solution of the normal equations.
#[derive(Debug, Clone)]
pub struct NormalSolution {
    /// Coefficients in column order, intercept last.
    pub beta: DVector<f64>,
    /// `(XᵀX)⁻¹`, kept for standard errors.
    pub gram_inv: DMatrix<f64>,
}

/// Solve `β = (XᵀX)⁻¹Xᵀy` for a design whose last column is the intercept.
///
/// Returns `None` if the predictors are collinear (with each other or with
/// the intercept) for practical purposes, or if the solution is not finite.
pub fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<NormalSolution> {
    let n = x.nrows();
    if n == 0 || x.ncols() == 0 || y.len() != n {
        return None;
    }
    let k = x.ncols() - 1;
    let n_f = n as f64;

    let predictors = x.columns(0, k);
    let x_mean: DVector<f64> = DVector::from_iterator(k, predictors.column_iter().map(|c| c.sum() / n_f));
    let y_mean = y.sum() / n_f;

    let mut centered = predictors.clone_owned();
    for (j, mut column) in centered.column_iter_mut().enumerate() {
        column.add_scalar_mut(-x_mean[j]);
    }
    let y_centered = y.add_scalar(-y_mean);

    let g_inv = centered_gram_inverse(&centered)?;
    let slopes = &g_inv * centered.tr_mul(&y_centered);
    let intercept = y_mean - x_mean.dot(&slopes);

    let cross = -(&g_inv * &x_mean);
    let intercept_var = 1.0 / n_f - x_mean.dot(&cross);

    let mut gram_inv = DMatrix::<f64>::zeros(k + 1, k + 1);
    gram_inv.view_mut((0, 0), (k, k)).copy_from(&g_inv);
    for j in 0..k {
        gram_inv[(j, k)] = cross[j];
        gram_inv[(k, j)] = cross[j];
    }
    gram_inv[(k, k)] = intercept_var;

    let mut beta = DVector::<f64>::zeros(k + 1);
    beta.rows_mut(0, k).copy_from(&slopes);
    beta[k] = intercept;

    let finite = beta.iter().chain(gram_inv.iter()).all(|v| v.is_finite());
    finite.then_some(NormalSolution { beta, gram_inv })
}

/// Invert `X_cᵀX_c` for centered predictors, or `None` if it is singular.
fn centered_gram_inverse(centered: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let k = centered.ncols();
    if k == 0 {
        return Some(DMatrix::zeros(0, 0));
    }

    let norms: Vec<f64> = centered.column_iter().map(|c| c.norm()).collect();
    if norms.iter().any(|&s| !(s.is_finite() && s > 0.0)) {
        return None;
    }

    let mut scaled = centered.clone();
    for (j, &s) in norms.iter().enumerate() {
        scaled.column_mut(j).scale_mut(1.0 / s);
    }
    let gram = scaled.tr_mul(&scaled);

    let eigenvalues = gram.clone().symmetric_eigenvalues();
    let (lo, hi) = (eigenvalues.min(), eigenvalues.max());
    if !(hi.is_finite() && lo > hi * GRAM_RCOND_MIN) {
        return None;
    }

    let inv_scaled = Cholesky::new(gram)?.inverse();
    Some(DMatrix::from_fn(k, k, |i, j| inv_scaled[(i, j)] / (norms[i] * norms[j])))
}
