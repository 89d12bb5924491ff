//! Forward stepwise selection using adjusted R².
//!
//! The search state is an explicit value (`SearchState`) and every round is
//! split into two steps:
//!
//! 1. `score_round` scores each remaining candidate against the current
//!    selection (singular candidates sit the round out; a candidate that would
//!    exhaust the residual degrees of freedom halts the search).
//! 2. `advance` is a pure transition from `(state, scores)` to either a new
//!    state plus a `RoundRecord`, or a terminal state plus the `Termination`
//!    reason.
//!
//! Selection rules:
//! 1. Stop before a round when no candidates remain or `max_vars` is reached.
//! 2. The round winner is the maximum of `(score, column)`: ties on score go to
//!    the greatest column under `Column`'s ordering.
//! 3. Accept the winner only if it strictly improves the current score
//!    (starting at `0.0`). An accepted interaction term first pulls its base
//!    features out of the pool and into the selection.

use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::domain::{Column, Dataset};
use crate::error::DatasetError;
use crate::fit::fitter::{CandidateScore, ScoringContext, score_candidate};

/// Selection state between rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Forced-in predictors first, then accepted columns in acceptance order.
    pub selected: Vec<Column>,
    /// Candidate pool, iterated in column order.
    pub remaining: BTreeSet<Column>,
    pub current_score: f64,
}

impl SearchState {
    pub fn initial(data: &Dataset, response: &Column, force_in: &[Column]) -> Self {
        let remaining = data
            .columns()
            .iter()
            .filter(|c| *c != response && !force_in.contains(*c))
            .cloned()
            .collect();

        Self {
            selected: force_in.to_vec(),
            remaining,
            current_score: 0.0,
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The candidate pool is empty.
    Exhausted,
    /// `max_vars` predictors are selected.
    SizeCap,
    /// Every remaining candidate was singular.
    NoScorableCandidate,
    /// The best candidate did not beat the current score.
    NoImprovement,
    /// A candidate would have left fewer than one residual degree of freedom.
    DofGuard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub column: Column,
    pub score: f64,
}

/// Scores gathered in one round.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundScores {
    Scored {
        candidates: Vec<ScoredCandidate>,
        /// Candidates skipped because their model was singular.
        skipped: Vec<Column>,
    },
    /// Scoring stopped at `trigger`, whose model would have `p` predictors.
    DofHalted { trigger: Column, p: usize },
}

/// One accepted round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub accepted: Column,
    /// Base features committed together with an accepted interaction term.
    pub pulled_in: Vec<Column>,
    pub score: f64,
    pub scored: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Committed { state: SearchState, record: RoundRecord },
    Converged { state: SearchState, termination: Termination },
}

/// Output of the forward search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub selected: Vec<Column>,
    /// Accepted rounds, in order. Their scores are strictly increasing.
    pub rounds: Vec<RoundRecord>,
    pub termination: Termination,
    /// Adjusted R² of the last accepted round (`0.0` if none).
    pub final_score: f64,
}

/// Check the between-round stopping rules.
pub fn stopping_condition(state: &SearchState, max_vars: usize) -> Option<Termination> {
    if state.remaining.is_empty() {
        Some(Termination::Exhausted)
    } else if state.selected.len() >= max_vars {
        Some(Termination::SizeCap)
    } else {
        None
    }
}

/// Score every remaining candidate against the current selection.
pub fn score_round(ctx: &ScoringContext<'_>, state: &SearchState) -> Result<RoundScores, DatasetError> {
    let mut candidates = Vec::with_capacity(state.remaining.len());
    let mut skipped = Vec::new();

    for column in &state.remaining {
        match score_candidate(ctx, &state.selected, column)? {
            CandidateScore::Scored { score, p } => {
                trace!("candidate {column}: adj R² {score:.6} (p={p})");
                candidates.push(ScoredCandidate {
                    column: column.clone(),
                    score,
                });
            }
            CandidateScore::Singular => {
                trace!("candidate {column}: singular, skipped");
                skipped.push(column.clone());
            }
            CandidateScore::DofExhausted { p } => {
                debug!("candidate {column} needs p={p} on n={}: halting search", ctx.n);
                return Ok(RoundScores::DofHalted {
                    trigger: column.clone(),
                    p,
                });
            }
        }
    }

    Ok(RoundScores::Scored { candidates, skipped })
}

/// Round winner: the last element of an ascending sort on `(score, column)`.
pub fn best_candidate(candidates: &[ScoredCandidate]) -> Option<&ScoredCandidate> {
    candidates.iter().max_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.column.cmp(&b.column))
    })
}

/// Apply one round's scores to the state.
pub fn advance(mut state: SearchState, scores: RoundScores) -> Transition {
    let (candidates, skipped) = match scores {
        RoundScores::DofHalted { .. } => {
            return Transition::Converged {
                state,
                termination: Termination::DofGuard,
            };
        }
        RoundScores::Scored { candidates, skipped } => (candidates, skipped),
    };

    let Some(best) = best_candidate(&candidates) else {
        return Transition::Converged {
            state,
            termination: Termination::NoScorableCandidate,
        };
    };
    if !(best.score > state.current_score) {
        return Transition::Converged {
            state,
            termination: Termination::NoImprovement,
        };
    }
    let best = best.clone();

    let mut pulled_in = Vec::new();
    for base in best.column.base_features() {
        if state.remaining.remove(&base) {
            state.selected.push(base.clone());
            pulled_in.push(base);
        }
    }
    state.remaining.remove(&best.column);
    state.selected.push(best.column.clone());
    state.current_score = best.score;

    Transition::Committed {
        state,
        record: RoundRecord {
            accepted: best.column,
            pulled_in,
            score: best.score,
            scored: candidates.len(),
            skipped: skipped.len(),
        },
    }
}

/// Run the forward search on `data`.
///
/// `force_in` and `response` are display names of dataset columns.
pub fn forward_select(
    data: &Dataset,
    response: &str,
    force_in: &[String],
    max_vars: usize,
) -> Result<SelectionOutcome, DatasetError> {
    let response = data.require(response)?.clone();
    let force_in = force_in
        .iter()
        .map(|name| data.require(name).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let ctx = ScoringContext::new(data, &response)?;
    let mut state = SearchState::initial(data, &response, &force_in);
    let mut rounds = Vec::new();

    let termination = loop {
        if let Some(stop) = stopping_condition(&state, max_vars) {
            break stop;
        }

        let scores = score_round(&ctx, &state)?;
        match advance(state, scores) {
            Transition::Committed { state: next, record } => {
                debug!(
                    "round {}: accepted {} (adj R² {:.6}, scored {}, skipped {})",
                    rounds.len() + 1,
                    record.accepted,
                    record.score,
                    record.scored,
                    record.skipped
                );
                rounds.push(record);
                state = next;
            }
            Transition::Converged {
                state: last,
                termination,
            } => {
                state = last;
                break termination;
            }
        }
    };

    debug!(
        "forward selection stopped ({termination:?}) with {} predictors",
        state.selected.len()
    );

    Ok(SelectionOutcome {
        selected: state.selected,
        rounds,
        termination,
        final_score: state.current_score,
    })
}
