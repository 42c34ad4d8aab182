//! Render-ready snapshot of an innings.

use super::{Extras, ScoringEngine};
use serde::{Deserialize, Serialize};

/// Everything a score display needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Runs scored, extras included.
    pub total_runs: u32,
    /// 1-based over in progress.
    pub current_over: u32,
    /// Legal balls bowled in the current over.
    pub balls_in_current_over: u32,
    /// Legal balls bowled in the innings.
    pub total_balls: u32,
    /// Legal balls left in the current over.
    pub balls_remaining: u32,
    /// Current over and ball, e.g. `"3.2"`.
    pub over_display: String,
    /// Overs bowled, e.g. `"2.2"`.
    pub overs_bowled: String,
    /// Extras tally.
    pub extras: Extras,
    /// Extras total.
    pub extras_total: u32,
    /// Labels of the latest deliveries, one over's worth at most.
    pub recent: Vec<String>,
    /// Deliveries recorded, illegal ones included.
    pub deliveries: usize,
    /// Over-completion notification showing.
    pub over_just_completed: bool,
}

impl Scorecard {
    pub(crate) fn from_engine(engine: &ScoringEngine) -> Self {
        let recent = engine
            .recent_deliveries(engine.max_balls_per_over() as usize)
            .iter()
            .map(|d| d.label())
            .collect();

        Self {
            total_runs: engine.total_runs(),
            current_over: engine.current_over(),
            balls_in_current_over: engine.balls_in_current_over(),
            total_balls: engine.total_balls(),
            balls_remaining: engine.balls_remaining(),
            over_display: engine.over_display(),
            overs_bowled: engine.overs_bowled_display(),
            extras: *engine.extras(),
            extras_total: engine.extras().total(),
            recent,
            deliveries: engine.history().len(),
            over_just_completed: engine.over_just_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorecard_of_fresh_engine() {
        let card = ScoringEngine::new().scorecard();
        assert_eq!(card.total_runs, 0);
        assert_eq!(card.over_display, "1.0");
        assert_eq!(card.overs_bowled, "0.0");
        assert_eq!(card.balls_remaining, 6);
        assert!(card.recent.is_empty());
    }

    #[test]
    fn test_scorecard_reflects_engine() {
        let mut engine = ScoringEngine::new();
        engine.record_runs(4).unwrap();
        engine.record_wide().unwrap();
        engine.record_bye(1).unwrap();

        let card = engine.scorecard();
        assert_eq!(card.total_runs, 6);
        assert_eq!(card.total_balls, 2);
        assert_eq!(card.over_display, "1.2");
        assert_eq!(card.extras_total, 2);
        assert_eq!(card.recent, vec!["4", "Wd", "B1"]);
        assert_eq!(card.deliveries, 3);
    }

    #[test]
    fn test_scorecard_serializes() {
        let mut engine = ScoringEngine::new();
        engine.record_no_ball().unwrap();

        let json = serde_json::to_value(engine.scorecard()).unwrap();
        assert_eq!(json["total_runs"], 1);
        assert_eq!(json["extras"]["no_balls"], 1);
        assert_eq!(json["recent"][0], "Nb");
    }
}
