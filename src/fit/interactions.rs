//! Interaction term generation.
//!
//! For each degree `d` in `2..=max_degree` we enumerate every combination of
//! `d` base parameter columns (response excluded) and append their elementwise
//! product as an `Interaction` column. Degree 1 is the dataset itself.
//!
//! Combinations follow column order and are lexicographic by index, so the
//! augmented dataset is deterministic for a given input.

use crate::domain::{Column, Dataset};
use crate::error::DatasetError;

/// Return a new dataset with interaction terms up to `max_degree`.
pub fn expand_interactions(data: &Dataset, response: &str, max_degree: usize) -> Result<Dataset, DatasetError> {
    let response = data.require(response)?;

    let bases: Vec<&Column> = data
        .columns()
        .iter()
        .filter(|c| *c != response && !c.is_interaction())
        .collect();

    let mut columns: Vec<(Column, Vec<f64>)> = data
        .iter()
        .map(|(c, v)| (c.clone(), v.to_vec()))
        .collect();

    for degree in 2..=max_degree.min(bases.len()) {
        for combo in combinations(bases.len(), degree) {
            let names: Vec<String> = combo
                .iter()
                .flat_map(|&i| bases[i].base_names())
                .map(str::to_string)
                .collect();
            let term = Column::Interaction(names);
            if data.contains(&term) {
                continue;
            }

            let mut product = vec![1.0; data.n_rows()];
            for &i in &combo {
                let values = data
                    .values(bases[i])
                    .ok_or_else(|| DatasetError::UnknownColumn(bases[i].display_name()))?;
                for (acc, &v) in product.iter_mut().zip(values) {
                    *acc *= v;
                }
            }
            columns.push((term, product));
        }
    }

    Dataset::from_columns(columns)
}

/// All `k`-subsets of `0..n` as sorted index lists, in lexicographic order.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());

        // Find the rightmost index that can still move right.
        let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
            return out;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
