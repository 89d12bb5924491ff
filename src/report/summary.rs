//! Projections of a fitted model for the presentation layer.
//!
//! Nothing here recomputes statistics; every value is read from the
//! `FittedModel`. The p-value ranking and the coefficient ranking are keyed by
//! the same columns so a front-end can pair them (significance bars next to
//! effect-direction arrows).

use serde::{Deserialize, Serialize};

use crate::domain::{Column, FittedModel, PredictorEstimate};

/// Decimal places kept in the parameter table.
pub const DISPLAY_PRECISION: i32 = 4;

/// p-values below this are flagged as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub name: String,
    pub coefficient: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedValue {
    pub column: Column,
    pub value: f64,
}

/// Sign of a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectDirection {
    Increase,
    Decrease,
    Neutral,
}

impl EffectDirection {
    pub fn of(coefficient: f64) -> Self {
        if coefficient > 0.0 {
            EffectDirection::Increase
        } else if coefficient < 0.0 {
            EffectDirection::Decrease
        } else {
            EffectDirection::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub column: Column,
    pub direction: EffectDirection,
    pub p_value: f64,
    pub significant: bool,
}

/// Everything a front-end needs to render a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Predictors in model order, rounded to `DISPLAY_PRECISION`.
    pub table: Vec<ParameterRow>,
    /// Ascending p-values.
    pub p_values: Vec<RankedValue>,
    /// Descending coefficients.
    pub coefficients: Vec<RankedValue>,
    /// Effect directions in the order of `p_values`.
    pub effects: Vec<Effect>,
}

/// Summarize a fitted model. The intercept is left out of every view.
pub fn summarize(model: &FittedModel) -> ModelSummary {
    let predictors = model.predictors();

    let table = predictors
        .iter()
        .map(|p| ParameterRow {
            name: p.column.display_name(),
            coefficient: round_display(p.estimate.coefficient),
            p_value: round_display(p.estimate.p_value),
        })
        .collect();

    let mut by_p: Vec<&PredictorEstimate> = predictors.iter().collect();
    by_p.sort_by(|a, b| {
        a.estimate
            .p_value
            .total_cmp(&b.estimate.p_value)
            .then_with(|| a.column.cmp(&b.column))
    });

    let mut by_coef: Vec<&PredictorEstimate> = predictors.iter().collect();
    by_coef.sort_by(|a, b| {
        b.estimate
            .coefficient
            .total_cmp(&a.estimate.coefficient)
            .then_with(|| a.column.cmp(&b.column))
    });

    let effects = by_p
        .iter()
        .map(|p| Effect {
            column: p.column.clone(),
            direction: EffectDirection::of(p.estimate.coefficient),
            p_value: p.estimate.p_value,
            significant: p.estimate.p_value < SIGNIFICANCE_LEVEL,
        })
        .collect();

    ModelSummary {
        table,
        p_values: ranked(&by_p, |p| p.estimate.p_value),
        coefficients: ranked(&by_coef, |p| p.estimate.coefficient),
        effects,
    }
}

fn ranked(items: &[&PredictorEstimate], value: impl Fn(&PredictorEstimate) -> f64) -> Vec<RankedValue> {
    items
        .iter()
        .map(|p| RankedValue {
            column: p.column.clone(),
            value: value(p),
        })
        .collect()
}

fn round_display(v: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_PRECISION);
    let rounded = (v * scale).round() / scale;
    // Avoid "-0.0" in tables.
    if rounded == 0.0 { 0.0 } else { rounded }
}
