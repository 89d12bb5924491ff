//! Small statistical helpers shared by the candidate scorer and the finalizer.

use statrs::distribution::{ContinuousCDF, StudentsT};

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `Σ (vᵢ - center)²`.
pub fn sum_sq_dev<I>(values: I, center: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(|v| (v - center) * (v - center)).sum()
}

/// Adjusted R² for a model with `p` predictors (intercept excluded) on `n`
/// observations.
///
/// `1 - (1 - r2) · (n - 1) / (n - p - 1)`. Callers guarantee `n - p - 1 ≥ 1`.
pub fn adjusted_r_squared(r2: f64, n: usize, p: usize) -> f64 {
    let n_f = n as f64;
    let p_f = p as f64;
    1.0 - (1.0 - r2) * ((n_f - 1.0) / (n_f - p_f - 1.0))
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
pub fn two_sided_p_value(t: f64, df: f64) -> Option<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = 2.0 * dist.sf(t.abs());
    p.is_finite().then_some(p.min(1.0))
}

/// Quantile of Student's t, e.g. `t_quantile(0.975, df)` for a 95% interval.
pub fn t_quantile(prob: f64, df: f64) -> Option<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let q = dist.inverse_cdf(prob);
    q.is_finite().then_some(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn moments() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&v), 3.0);
        assert_relative_eq!(sum_sq_dev(v, 3.0), 10.0);
    }

    #[test]
    fn adjusted_r_squared_penalizes_size() {
        assert_relative_eq!(adjusted_r_squared(1.0, 10, 3), 1.0);
        assert_relative_eq!(adjusted_r_squared(0.5, 5, 1), 1.0 - 0.5 * 4.0 / 3.0);
        assert!(adjusted_r_squared(0.8, 20, 5) < adjusted_r_squared(0.8, 20, 1));
    }

    #[test]
    fn t_distribution_tails() {
        assert_abs_diff_eq!(two_sided_p_value(0.0, 5.0).unwrap(), 1.0, epsilon = 1e-12);
        // t_{0.975, 10} ≈ 2.228
        let q = t_quantile(0.975, 10.0).unwrap();
        assert_abs_diff_eq!(q, 2.228_138_85, epsilon = 1e-4);
        assert_abs_diff_eq!(two_sided_p_value(q, 10.0).unwrap(), 0.05, epsilon = 1e-6);
        assert!(two_sided_p_value(1.0, 0.0).is_none());
    }
}
