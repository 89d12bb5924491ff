//! Immutable numeric table the engine works on.
//!
//! The ingestion layer is responsible for aggregating responses per
//! realization and for dropping non-numeric rows; by the time data reaches a
//! `Dataset` every column is a finite `f64` vector of the same length.
//! Transformations (`with_column`, `filter_parameters`, interaction expansion)
//! return new datasets and never touch `self`.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::column::{Column, INTERACTION_SEPARATOR};
use crate::error::DatasetError;

/// Restrict which parameter columns take part in a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterFilter {
    /// Drop the listed parameters, keep everything else.
    Exclude(Vec<String>),
    /// Keep only the listed parameters (plus the response).
    IncludeOnly(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    values: Vec<Vec<f64>>,
    index: BTreeMap<Column, usize>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset of base columns from `(name, values)` pairs.
    pub fn new<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self, DatasetError> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| (Column::Base(name.into()), values))
                .collect(),
        )
    }

    /// Build a dataset from arbitrary column descriptors.
    pub fn from_columns(columns: Vec<(Column, Vec<f64>)>) -> Result<Self, DatasetError> {
        let Some(first) = columns.first() else {
            return Err(DatasetError::Empty);
        };
        let n_rows = first.1.len();

        let mut names = BTreeSet::new();
        let mut index = BTreeMap::new();
        let mut cols = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());

        for (column, data) in columns {
            validate_descriptor(&column)?;
            let name = column.display_name();

            if data.len() != n_rows {
                return Err(DatasetError::LengthMismatch {
                    column: name,
                    expected: n_rows,
                    found: data.len(),
                });
            }
            if let Some(row) = data.iter().position(|v| !v.is_finite()) {
                return Err(DatasetError::NonFinite { column: name, row });
            }
            if index.contains_key(&column) || !names.insert(name.clone()) {
                return Err(DatasetError::DuplicateColumn(name));
            }

            index.insert(column.clone(), cols.len());
            cols.push(column);
            values.push(data);
        }

        Ok(Self {
            columns: cols,
            values,
            index,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn contains(&self, column: &Column) -> bool {
        self.index.contains_key(column)
    }

    pub fn values(&self, column: &Column) -> Option<&[f64]> {
        self.index.get(column).map(|&i| self.values[i].as_slice())
    }

    /// Look a column up by its display name (`"x1"`, `"A*B"`).
    pub fn find(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.display_name() == name)
    }

    /// Like `find`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&Column, DatasetError> {
        self.find(name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
    }

    /// Return a copy of this dataset with one more column appended.
    pub fn with_column(&self, column: Column, values: Vec<f64>) -> Result<Self, DatasetError> {
        let mut columns: Vec<(Column, Vec<f64>)> = self.iter().map(|(c, v)| (c.clone(), v.to_vec())).collect();
        columns.push((column, values));
        Self::from_columns(columns)
    }

    /// Apply an include/exclude parameter filter. The response is always kept.
    ///
    /// Interaction columns are dropped together with any base column they
    /// depend on.
    pub fn filter_parameters(&self, response: &str, filter: &ParameterFilter) -> Result<Self, DatasetError> {
        let response = self.require(response)?.clone();

        let keep: Box<dyn Fn(&Column) -> bool> = match filter {
            ParameterFilter::Exclude(names) => {
                let dropped = self.resolve_names(names)?;
                Box::new(move |c: &Column| {
                    !dropped.contains(c) && c.base_features().iter().all(|b| !dropped.contains(b))
                })
            }
            ParameterFilter::IncludeOnly(names) => {
                if names.is_empty() {
                    return Err(DatasetError::EmptySelection);
                }
                let kept = self.resolve_names(names)?;
                Box::new(move |c: &Column| kept.contains(c))
            }
        };

        let columns = self
            .iter()
            .filter(|(c, _)| **c == response || keep(*c))
            .map(|(c, v)| (c.clone(), v.to_vec()))
            .collect();
        Self::from_columns(columns)
    }

    /// Iterate `(column, values)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&Column, &[f64])> {
        self.columns
            .iter()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    fn resolve_names(&self, names: &[String]) -> Result<BTreeSet<Column>, DatasetError> {
        names
            .iter()
            .map(|name| self.require(name).cloned())
            .collect()
    }
}

fn validate_descriptor(column: &Column) -> Result<(), DatasetError> {
    let valid_name = |name: &str| !name.is_empty() && !name.contains(INTERACTION_SEPARATOR);

    match column {
        Column::Base(name) => {
            if !valid_name(name) {
                return Err(DatasetError::InvalidName(name.clone()));
            }
        }
        Column::Interaction(names) => {
            if let Some(bad) = names.iter().find(|n| !valid_name(n.as_str())) {
                return Err(DatasetError::InvalidName(bad.clone()));
            }
            let distinct: BTreeSet<&String> = names.iter().collect();
            if names.len() < 2 || distinct.len() != names.len() {
                return Err(DatasetError::InvalidInteraction(column.display_name()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            ("y", vec![1.0, 2.0, 3.0]),
            ("a", vec![0.5, 0.1, 0.9]),
            ("b", vec![2.0, 1.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_ragged_and_duplicate_columns() {
        let err = Dataset::new(vec![("y", vec![1.0, 2.0]), ("a", vec![1.0])]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                column: "a".to_string(),
                expected: 2,
                found: 1
            }
        );

        let err = Dataset::new(vec![("y", vec![1.0]), ("y", vec![2.0])]).unwrap_err();
        assert_eq!(err, DatasetError::DuplicateColumn("y".to_string()));

        let err = Dataset::new::<&str>(vec![]).unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }

    #[test]
    fn rejects_separator_in_names_and_non_finite_values() {
        let err = Dataset::new(vec![("a*b", vec![1.0])]).unwrap_err();
        assert_eq!(err, DatasetError::InvalidName("a*b".to_string()));

        let err = Dataset::new(vec![("a", vec![1.0, f64::NAN])]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::NonFinite {
                column: "a".to_string(),
                row: 1
            }
        );

        let err = Dataset::from_columns(vec![(Column::interaction(["a", "a"]), vec![1.0])]).unwrap_err();
        assert_eq!(err, DatasetError::InvalidInteraction("a*a".to_string()));
    }

    #[test]
    fn with_column_leaves_original_untouched() {
        let data = sample();
        let bigger = data
            .with_column(Column::interaction(["a", "b"]), vec![1.0, 0.1, 0.0])
            .unwrap();
        assert_eq!(data.n_columns(), 3);
        assert_eq!(bigger.n_columns(), 4);
        assert_eq!(bigger.find("a*b"), Some(&Column::interaction(["a", "b"])));
        assert_eq!(bigger.values(&Column::base("b")), Some(&[2.0, 1.0, 0.0][..]));
    }

    #[test]
    fn filter_parameters_keeps_response() {
        let data = sample()
            .with_column(Column::interaction(["a", "b"]), vec![1.0, 0.1, 0.0])
            .unwrap();

        let only_a = data
            .filter_parameters("y", &ParameterFilter::IncludeOnly(vec!["a".to_string()]))
            .unwrap();
        assert_eq!(only_a.columns(), &[Column::base("y"), Column::base("a")]);

        let without_b = data
            .filter_parameters("y", &ParameterFilter::Exclude(vec!["b".to_string()]))
            .unwrap();
        assert_eq!(without_b.columns(), &[Column::base("y"), Column::base("a")]);

        let err = data
            .filter_parameters("y", &ParameterFilter::IncludeOnly(vec![]))
            .unwrap_err();
        assert_eq!(err, DatasetError::EmptySelection);

        let err = data
            .filter_parameters("y", &ParameterFilter::Exclude(vec!["nope".to_string()]))
            .unwrap_err();
        assert_eq!(err, DatasetError::UnknownColumn("nope".to_string()));
    }
}
