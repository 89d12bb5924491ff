//! Design matrices for linear models over dataset columns.
//!
//! The fitter and the finalizer rely on two primitive operations:
//! - build `X = [predictors..., 1]` for a list of columns (intercept last)
//! - predict `ŷ = Xβ` for a solved coefficient vector

use nalgebra::{DMatrix, DVector};

use crate::domain::{Column, Dataset};
use crate::error::DatasetError;

/// Build the design matrix for `predictors` with a trailing intercept column.
pub fn design_matrix(data: &Dataset, predictors: &[Column]) -> Result<DMatrix<f64>, DatasetError> {
    let n = data.n_rows();
    let k = predictors.len();

    let mut x = DMatrix::<f64>::from_element(n, k + 1, 1.0);
    for (j, column) in predictors.iter().enumerate() {
        let values = column_values(data, column)?;
        for (i, &v) in values.iter().enumerate() {
            x[(i, j)] = v;
        }
    }
    Ok(x)
}

pub fn response_vector(data: &Dataset, response: &Column) -> Result<DVector<f64>, DatasetError> {
    column_values(data, response).map(DVector::from_row_slice)
}

/// Fitted values `ŷ = Xβ`.
///
/// # Panics
/// Panics if `beta` does not have one entry per column of `x`.
pub fn predict(x: &DMatrix<f64>, beta: &DVector<f64>) -> DVector<f64> {
    x * beta
}

fn column_values<'a>(data: &'a Dataset, column: &Column) -> Result<&'a [f64], DatasetError> {
    data.values(column)
        .ok_or_else(|| DatasetError::UnknownColumn(column.display_name()))
}
