//! Postcondition contracts for engine transitions.
//!
//! Each contract relates the state before an operation to the state after
//! it: {before} operation {after}. The engine checks them in debug builds.

use super::invariants::{InvariantSet, InvariantViolation, ScoringInvariants};
use super::{EngineError, ScoringEngine};
use tracing::{instrument, warn};

/// A postcondition over a state transition.
pub trait Contract<S> {
    /// Checks that `after` is a valid successor of `before`.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

fn invariants_hold(after: &ScoringEngine) -> Result<(), EngineError> {
    ScoringInvariants::check_all(after).map_err(|violations: Vec<InvariantViolation>| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Scoring invariants violated");
        EngineError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for recording a delivery.
///
/// - History grows by exactly one and keeps its prefix
/// - Total runs grow by the new delivery's total
/// - All scoring invariants hold
pub struct RecordContract;

impl Contract<ScoringEngine> for RecordContract {
    #[instrument(skip_all)]
    fn post(before: &ScoringEngine, after: &ScoringEngine) -> Result<(), EngineError> {
        let Some((appended, prefix)) = after.history().split_last() else {
            return Err(EngineError::InvariantViolation(
                "Recording left history empty".to_string(),
            ));
        };

        if prefix != before.history() {
            return Err(EngineError::InvariantViolation(
                "Recording rewrote earlier history".to_string(),
            ));
        }

        if before.total_runs().checked_add(appended.total_runs()) != Some(after.total_runs()) {
            return Err(EngineError::InvariantViolation(format!(
                "Total runs moved from {} to {} for a {}-run delivery",
                before.total_runs(),
                after.total_runs(),
                appended.total_runs()
            )));
        }

        invariants_hold(after)
    }
}

/// Contract for undoing a delivery.
///
/// - History shrinks by exactly one and keeps its prefix
/// - Total runs drop by the removed delivery's total
/// - All scoring invariants hold
pub struct UndoContract;

impl Contract<ScoringEngine> for UndoContract {
    #[instrument(skip_all)]
    fn post(before: &ScoringEngine, after: &ScoringEngine) -> Result<(), EngineError> {
        let Some((removed, prefix)) = before.history().split_last() else {
            return Err(EngineError::InvariantViolation(
                "Undo applied to empty history".to_string(),
            ));
        };

        if prefix != after.history() {
            return Err(EngineError::InvariantViolation(
                "Undo removed more than the last delivery".to_string(),
            ));
        }

        if after.total_runs().checked_add(removed.total_runs()) != Some(before.total_runs()) {
            return Err(EngineError::InvariantViolation(format!(
                "Total runs moved from {} to {} undoing a {}-run delivery",
                before.total_runs(),
                after.total_runs(),
                removed.total_runs()
            )));
        }

        invariants_hold(after)
    }
}
