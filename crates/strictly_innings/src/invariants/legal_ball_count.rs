//! Legal ball count invariant: total balls match legal deliveries in history.

use super::super::ScoringEngine;
use super::Invariant;

/// Invariant: `total_balls` equals the number of legal deliveries in history.
///
/// Wides and no-balls are recorded but never counted.
pub struct LegalBallCountInvariant;

impl Invariant<ScoringEngine> for LegalBallCountInvariant {
    fn holds(engine: &ScoringEngine) -> bool {
        let legal = engine.history().iter().filter(|d| d.is_legal()).count();
        legal == engine.total_balls() as usize
    }

    fn description() -> &'static str {
        "Total balls equals legal deliveries in history"
    }
}
