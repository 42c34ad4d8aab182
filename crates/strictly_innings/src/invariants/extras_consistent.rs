//! Extras consistency invariant: the tally matches history.

use super::super::{Extras, ScoringEngine};
use super::Invariant;

/// Invariant: every extras counter equals its sum over history.
///
/// This implies `extras.total()` equals the summed extra runs.
pub struct ExtrasConsistentInvariant;

impl Invariant<ScoringEngine> for ExtrasConsistentInvariant {
    fn holds(engine: &ScoringEngine) -> bool {
        Extras::from_deliveries(engine.history()) == *engine.extras()
    }

    fn description() -> &'static str {
        "Extras tally matches the extras recorded in history"
    }
}
