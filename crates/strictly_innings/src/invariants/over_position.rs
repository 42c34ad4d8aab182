//! Over position invariant: over and ball derive from total balls.

use super::super::ScoringEngine;
use super::Invariant;

/// Invariant: `current_over - 1 == total_balls / max` and
/// `balls_in_current_over == total_balls % max`.
pub struct OverPositionInvariant;

impl Invariant<ScoringEngine> for OverPositionInvariant {
    fn holds(engine: &ScoringEngine) -> bool {
        let max = engine.max_balls_per_over();
        if max == 0 || engine.current_over() == 0 {
            return false;
        }

        engine.current_over() - 1 == engine.total_balls() / max
            && engine.balls_in_current_over() == engine.total_balls() % max
    }

    fn description() -> &'static str {
        "Current over and ball follow from total legal balls"
    }
}
