//! The end-to-end selection workflow:
//! validate config -> expand interactions -> forward search -> final fit -> summary
//!
//! Front-ends only deal with presentation; everything numeric happens here.

use log::debug;

use crate::domain::{Dataset, FittedModel, SelectionConfig};
use crate::error::SelectionError;
use crate::fit::{SelectionOutcome, expand_interactions, finalize, forward_select};
use crate::report::{ModelSummary, summarize};

/// All computed outputs of a single selection run.
#[derive(Debug, Clone)]
pub struct SelectionRun {
    pub outcome: SelectionOutcome,
    pub model: FittedModel,
    pub summary: ModelSummary,
}

/// Select predictors for `response` and fit the final model.
pub fn select_model(data: &Dataset, response: &str, config: &SelectionConfig) -> Result<FittedModel, SelectionError> {
    run_selection(data, response, config).map(|run| run.model)
}

/// Like `select_model`, but keep the search trace and the summary.
pub fn run_selection(data: &Dataset, response: &str, config: &SelectionConfig) -> Result<SelectionRun, SelectionError> {
    config.validate()?;
    let response_column = data.require(response)?.clone();

    let expanded;
    let data = match config.expansion_degree() {
        Some(degree) => {
            expanded = expand_interactions(data, response, degree)?;
            debug!(
                "expanded to degree {degree}: {} -> {} columns",
                data.n_columns(),
                expanded.n_columns()
            );
            &expanded
        }
        None => data,
    };

    let outcome = forward_select(data, response, &config.force_in, config.max_vars)?;
    let model = finalize(data, &outcome.selected, &response_column)?;
    let summary = summarize(&model);

    Ok(SelectionRun {
        outcome,
        model,
        summary,
    })
}
