//! Runs consistency invariant: the total matches history.

use super::super::ScoringEngine;
use super::Invariant;

/// Invariant: `total_runs` equals the sum of every delivery's total.
pub struct RunsConsistentInvariant;

impl Invariant<ScoringEngine> for RunsConsistentInvariant {
    fn holds(engine: &ScoringEngine) -> bool {
        let summed = engine
            .history()
            .iter()
            .try_fold(0u32, |acc, d| acc.checked_add(d.checked_total_runs()?));
        summed == Some(engine.total_runs())
    }

    fn description() -> &'static str {
        "Total runs equals the sum of delivery totals"
    }
}
