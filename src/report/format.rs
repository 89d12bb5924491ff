//! Plain-text rendering of a selection run.
//!
//! Formatting lives here so the fitting code stays free of presentation
//! details and output changes stay localized.

use crate::fit::Termination;
use crate::pipeline::SelectionRun;
use crate::report::summary::{DISPLAY_PRECISION, ParameterRow, SIGNIFICANCE_LEVEL};

const NAME_WIDTH: usize = 24;

/// Format the full run report: fit statistics, search trace and parameter table.
pub fn format_run_summary(run: &SelectionRun) -> String {
    let mut out = String::new();
    let model = &run.model;
    let stats = model.statistics();

    out.push_str(&format!("=== stepreg - forward selection for '{}' ===\n", model.response()));
    out.push_str(&format!(
        "Fit: n={} | df={} | R²={:.4} | adj R²={:.4} | sigma={:.4}\n",
        stats.n_obs, stats.df_resid, stats.r_squared, stats.adj_r_squared, stats.sigma
    ));

    out.push_str("\nSearch:\n");
    for (i, round) in run.outcome.rounds.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. + {:<w$} score={:.6} (scored {}, skipped {})\n",
            i + 1,
            truncate(&round.accepted.display_name(), NAME_WIDTH),
            round.score,
            round.scored,
            round.skipped,
            w = NAME_WIDTH,
        ));
        if !round.pulled_in.is_empty() {
            let names: Vec<String> = round.pulled_in.iter().map(|c| c.display_name()).collect();
            out.push_str(&format!("     (pulled in {})\n", names.join(", ")));
        }
    }
    out.push_str(&format!("Stopped: {}\n", termination_label(run.outcome.termination)));

    out.push_str("\nParameters:\n");
    out.push_str(&format_table(&run.summary.table));
    out.push_str(&format!("(* p < {SIGNIFICANCE_LEVEL})\n"));

    out
}

fn format_table(rows: &[ParameterRow]) -> String {
    let precision = DISPLAY_PRECISION as usize;
    let mut out = String::new();

    out.push_str(format!("{:<w$} {:>12} {:>10}", "parameter", "coef", "p", w = NAME_WIDTH).trim_end());
    out.push('\n');
    out.push_str(format!("{:-<w$} {:-<12} {:-<10}", "", "", "", w = NAME_WIDTH).trim_end());
    out.push('\n');

    for row in rows {
        let marker = if row.p_value < SIGNIFICANCE_LEVEL { "*" } else { "" };
        out.push_str(
            format!(
                "{:<w$} {:>12.prec$} {:>10.prec$} {marker}",
                truncate(&row.name, NAME_WIDTH),
                row.coefficient,
                row.p_value,
                w = NAME_WIDTH,
                prec = precision,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::Exhausted => "no candidates left",
        Termination::SizeCap => "max_vars reached",
        Termination::NoScorableCandidate => "every remaining candidate was singular",
        Termination::NoImprovement => "no candidate improved adjusted R²",
        Termination::DofGuard => "out of residual degrees of freedom",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
