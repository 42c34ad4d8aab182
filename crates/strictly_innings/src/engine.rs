//! Innings scoring state machine.
//!
//! [`ScoringEngine`] is the sole owner of innings state. Every public
//! mutation leaves the engine satisfying [`ScoringInvariants`]; debug
//! builds verify this with a postcondition contract after each call.

#[cfg(debug_assertions)]
use super::contracts::{Contract, RecordContract, UndoContract};
use super::invariants::{InvariantSet, InvariantViolation, ScoringInvariants};
use super::scorecard::Scorecard;
use super::{Delivery, EngineError, Extras};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Legal balls in an over unless configured otherwise.
pub const DEFAULT_BALLS_PER_OVER: u32 = 6;

// ─────────────────────────────────────────────────────────────
//  Over-completion notification
// ─────────────────────────────────────────────────────────────

/// Monotonic counter identifying one over-completion notification.
///
/// A scheduled clear captures the epoch it was issued for and is
/// ignored if another over completed (or the engine was reset) since.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("epoch {}", _0)]
pub struct CompletionEpoch(u64);

impl CompletionEpoch {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Notification phase of the over state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverPhase {
    /// Normal scoring.
    #[default]
    InProgress,
    /// An over just finished; cleared later by the scheduler.
    JustCompleted(CompletionEpoch),
}

/// Emitted when a legal delivery finishes an over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverCompleted {
    /// The over that was just finished (1-based).
    pub over: u32,
    /// Epoch to hand back to [`ScoringEngine::clear_over_notification`].
    pub epoch: CompletionEpoch,
}

/// What a recording call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// The delivery as appended to history.
    pub delivery: Delivery,
    /// Set when this delivery completed an over.
    pub over_completed: Option<OverCompleted>,
}

// ─────────────────────────────────────────────────────────────
//  Engine
// ─────────────────────────────────────────────────────────────

/// Ball-by-ball innings scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    pub(crate) current_over: u32,
    pub(crate) balls_in_current_over: u32,
    pub(crate) total_balls: u32,
    pub(crate) total_runs: u32,
    pub(crate) extras: Extras,
    pub(crate) history: Vec<Delivery>,
    pub(crate) max_balls_per_over: u32,
    pub(crate) over_phase: OverPhase,
    pub(crate) completion_epoch: CompletionEpoch,
}

impl ScoringEngine {
    /// Creates an engine for six-ball overs.
    #[instrument]
    pub fn new() -> Self {
        Self::blank(DEFAULT_BALLS_PER_OVER)
    }

    /// Creates an engine with a custom over length.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBallsPerOver`] for zero.
    #[instrument]
    pub fn with_balls_per_over(max_balls_per_over: u32) -> Result<Self, EngineError> {
        if max_balls_per_over == 0 {
            return Err(EngineError::InvalidBallsPerOver(max_balls_per_over));
        }
        Ok(Self::blank(max_balls_per_over))
    }

    /// Rebuilds an engine by recording each delivery in order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid over length or a delivery that would
    /// overflow the score.
    #[instrument(skip(deliveries), fields(count = deliveries.len()))]
    pub fn replay(max_balls_per_over: u32, deliveries: &[Delivery]) -> Result<Self, EngineError> {
        let mut engine = Self::with_balls_per_over(max_balls_per_over)?;
        for delivery in deliveries {
            engine.record(*delivery)?;
        }
        Ok(engine)
    }

    fn blank(max_balls_per_over: u32) -> Self {
        Self {
            current_over: 1,
            balls_in_current_over: 0,
            total_balls: 0,
            total_runs: 0,
            extras: Extras::new(),
            history: Vec::new(),
            max_balls_per_over,
            over_phase: OverPhase::InProgress,
            completion_epoch: CompletionEpoch::default(),
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Read-only state
    // ─────────────────────────────────────────────────────────

    /// 1-based over currently in progress.
    pub fn current_over(&self) -> u32 {
        self.current_over
    }

    /// Legal balls bowled in the current over.
    pub fn balls_in_current_over(&self) -> u32 {
        self.balls_in_current_over
    }

    /// Legal balls bowled in the innings.
    pub fn total_balls(&self) -> u32 {
        self.total_balls
    }

    /// Runs scored, extras included.
    pub fn total_runs(&self) -> u32 {
        self.total_runs
    }

    /// Extras tally.
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Every recorded delivery, oldest first, illegal ones included.
    pub fn history(&self) -> &[Delivery] {
        &self.history
    }

    /// Legal balls per over.
    pub fn max_balls_per_over(&self) -> u32 {
        self.max_balls_per_over
    }

    /// Legal balls left in the current over.
    pub fn balls_remaining(&self) -> u32 {
        self.max_balls_per_over - self.balls_in_current_over
    }

    /// Overs completed so far.
    pub fn completed_overs(&self) -> u32 {
        self.current_over - 1
    }

    /// Current over and ball, e.g. `"3.2"`.
    pub fn over_display(&self) -> String {
        format!("{}.{}", self.current_over, self.balls_in_current_over)
    }

    /// Overs bowled in cricket notation, e.g. `"2.2"` during the third over.
    pub fn overs_bowled_display(&self) -> String {
        format!("{}.{}", self.completed_overs(), self.balls_in_current_over)
    }

    /// True while an over-completion notification is showing.
    pub fn over_just_completed(&self) -> bool {
        matches!(self.over_phase, OverPhase::JustCompleted(_))
    }

    /// Notification phase.
    pub fn over_phase(&self) -> OverPhase {
        self.over_phase
    }

    /// Latest issued completion epoch.
    pub fn completion_epoch(&self) -> CompletionEpoch {
        self.completion_epoch
    }

    /// The most recent `count` deliveries, oldest first.
    pub fn recent_deliveries(&self, count: usize) -> &[Delivery] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }

    /// Snapshot for rendering.
    #[instrument(skip(self))]
    pub fn scorecard(&self) -> Scorecard {
        Scorecard::from_engine(self)
    }

    /// Checks every scoring invariant against the current state.
    pub fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        ScoringInvariants::check_all(self)
    }

    // ─────────────────────────────────────────────────────────
    //  Recording
    // ─────────────────────────────────────────────────────────

    /// Legal delivery with runs off the bat.
    #[instrument(skip(self), fields(over = %self.over_display()))]
    pub fn record_runs(&mut self, runs: u32) -> Result<DeliveryOutcome, EngineError> {
        self.record(Delivery::runs(runs))
    }

    /// Wide: one extra, does not count toward the over.
    #[instrument(skip(self), fields(over = %self.over_display()))]
    pub fn record_wide(&mut self) -> Result<DeliveryOutcome, EngineError> {
        self.record(Delivery::wide())
    }

    /// No-ball: one extra, does not count toward the over.
    #[instrument(skip(self), fields(over = %self.over_display()))]
    pub fn record_no_ball(&mut self) -> Result<DeliveryOutcome, EngineError> {
        self.record(Delivery::no_ball())
    }

    /// Legal delivery with byes.
    #[instrument(skip(self), fields(over = %self.over_display()))]
    pub fn record_bye(&mut self, byes: u32) -> Result<DeliveryOutcome, EngineError> {
        self.record(Delivery::bye(byes))
    }

    /// Legal delivery with leg byes.
    #[instrument(skip(self), fields(over = %self.over_display()))]
    pub fn record_leg_bye(&mut self, leg_byes: u32) -> Result<DeliveryOutcome, EngineError> {
        self.record(Delivery::leg_bye(leg_byes))
    }

    /// Appends any delivery and applies its contribution.
    ///
    /// Legal deliveries advance the ball count and may complete the over;
    /// wides and no-balls only add runs and extras.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScoreOverflow`] if the total runs, an extras
    /// counter or the ball count would exceed `u32::MAX`. Nothing is
    /// recorded in that case.
    #[instrument(skip(self), fields(delivery = %delivery, total = self.total_runs))]
    pub fn record(&mut self, delivery: Delivery) -> Result<DeliveryOutcome, EngineError> {
        let overflow = || {
            warn!(%delivery, "Delivery refused, score would overflow");
            EngineError::ScoreOverflow(delivery)
        };
        let total_runs = delivery
            .checked_total_runs()
            .and_then(|runs| self.total_runs.checked_add(runs))
            .ok_or_else(overflow)?;
        let extras = self.extras.checked_credit(&delivery).ok_or_else(overflow)?;
        if delivery.is_legal() && self.total_balls == u32::MAX {
            return Err(overflow());
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.total_runs = total_runs;
        self.extras = extras;
        self.history.push(delivery);

        let over_completed = if delivery.is_legal() {
            self.complete_legal_ball()
        } else {
            debug!("Illegal delivery, ball count unchanged");
            None
        };

        #[cfg(debug_assertions)]
        self.verify::<RecordContract>(&before);

        debug!(
            total_runs = self.total_runs,
            total_balls = self.total_balls,
            "Delivery recorded"
        );
        Ok(DeliveryOutcome {
            delivery,
            over_completed,
        })
    }

    fn complete_legal_ball(&mut self) -> Option<OverCompleted> {
        self.balls_in_current_over += 1;
        self.total_balls += 1;

        if self.balls_in_current_over >= self.max_balls_per_over {
            Some(self.complete_over())
        } else {
            None
        }
    }

    fn complete_over(&mut self) -> OverCompleted {
        let finished = self.current_over;
        self.current_over += 1;
        self.balls_in_current_over = 0;
        self.completion_epoch = self.completion_epoch.next();
        self.over_phase = OverPhase::JustCompleted(self.completion_epoch);

        info!(over = finished, epoch = %self.completion_epoch, "Over complete");
        OverCompleted {
            over: finished,
            epoch: self.completion_epoch,
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Undo / reset / notification
    // ─────────────────────────────────────────────────────────

    /// Removes the last delivery and exactly reverses its contribution.
    ///
    /// Returns `None` when there is nothing to undo. The over-completion
    /// notification is left alone.
    #[instrument(skip(self), fields(over = %self.over_display(), history = self.history.len()))]
    pub fn undo_last(&mut self) -> Option<Delivery> {
        let Some(delivery) = self.history.last().copied() else {
            debug!("Nothing to undo");
            return None;
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.history.pop();
        self.total_runs -= delivery.total_runs();
        self.extras.debit(&delivery);

        if delivery.is_legal() {
            self.total_balls -= 1;
            if self.balls_in_current_over > 0 {
                self.balls_in_current_over -= 1;
            } else {
                // Removed ball was the last of the previous over.
                self.current_over -= 1;
                self.balls_in_current_over = self.max_balls_per_over - 1;
            }
        }

        #[cfg(debug_assertions)]
        self.verify::<UndoContract>(&before);

        info!(delivery = %delivery, over = %self.over_display(), "Undid delivery");
        Some(delivery)
    }

    /// Restores the initial state, keeping the over length.
    ///
    /// Any pending notification clear becomes stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let epoch = self.completion_epoch.next();
        *self = Self::blank(self.max_balls_per_over);
        self.completion_epoch = epoch;
        info!("Innings reset");
    }

    /// Ends the notification window opened by the over identified by `epoch`.
    ///
    /// Returns false (and changes nothing) if the epoch is stale.
    #[instrument(skip(self))]
    pub fn clear_over_notification(&mut self, epoch: CompletionEpoch) -> bool {
        match self.over_phase {
            OverPhase::JustCompleted(current) if current == epoch => {
                self.over_phase = OverPhase::InProgress;
                debug!("Over notification cleared");
                true
            }
            _ => {
                debug!(latest = %self.completion_epoch, "Ignoring stale notification clear");
                false
            }
        }
    }

    #[cfg(debug_assertions)]
    fn verify<C: Contract<Self>>(&self, before: &Self) {
        if let Err(err) = C::post(before, self) {
            tracing::error!(%err, "Postcondition failed");
            panic!("{err}");
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.current_over(), 1);
        assert_eq!(engine.balls_in_current_over(), 0);
        assert_eq!(engine.total_balls(), 0);
        assert_eq!(engine.total_runs(), 0);
        assert_eq!(engine.balls_remaining(), 6);
        assert_eq!(engine.over_display(), "1.0");
        assert_eq!(engine.overs_bowled_display(), "0.0");
        assert!(!engine.over_just_completed());
    }

    #[test]
    fn test_zero_balls_per_over_rejected() {
        assert_eq!(
            ScoringEngine::with_balls_per_over(0),
            Err(EngineError::InvalidBallsPerOver(0))
        );
    }

    #[test]
    fn test_record_runs() {
        let mut engine = ScoringEngine::new();
        let outcome = engine.record_runs(4).unwrap();

        assert_eq!(outcome.delivery, Delivery::runs(4));
        assert!(outcome.over_completed.is_none());
        assert_eq!(engine.total_runs(), 4);
        assert_eq!(engine.balls_in_current_over(), 1);
        assert_eq!(engine.total_balls(), 1);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].runs_off_bat(), 4);
    }

    #[test]
    fn test_wide_is_not_a_legal_ball() {
        let mut engine = ScoringEngine::new();
        engine.record_wide().unwrap();

        assert_eq!(engine.total_runs(), 1);
        assert_eq!(engine.balls_in_current_over(), 0);
        assert_eq!(engine.total_balls(), 0);
        assert_eq!(engine.extras().wides, 1);
        assert!(engine.history()[0].is_wide());
    }

    #[test]
    fn test_no_ball_is_not_a_legal_ball() {
        let mut engine = ScoringEngine::new();
        engine.record_no_ball().unwrap();

        assert_eq!(engine.total_runs(), 1);
        assert_eq!(engine.total_balls(), 0);
        assert_eq!(engine.extras().no_balls, 1);
        assert!(engine.history()[0].is_no_ball());
    }

    #[test]
    fn test_byes_and_leg_byes_are_legal() {
        let mut engine = ScoringEngine::new();
        engine.record_bye(2).unwrap();
        engine.record_leg_bye(3).unwrap();

        assert_eq!(engine.total_runs(), 5);
        assert_eq!(engine.total_balls(), 2);
        assert_eq!(engine.extras().byes, 2);
        assert_eq!(engine.extras().leg_byes, 3);
        assert_eq!(engine.history()[0].byes(), 2);
        assert_eq!(engine.history()[1].leg_byes(), 3);
    }

    #[test]
    fn test_over_completion_opens_notification() {
        let mut engine = ScoringEngine::new();
        for _ in 0..5 {
            assert!(engine.record_runs(0).unwrap().over_completed.is_none());
        }

        let outcome = engine.record_runs(1).unwrap();
        let completed = outcome.over_completed.expect("sixth ball completes the over");
        assert_eq!(completed.over, 1);
        assert_eq!(engine.current_over(), 2);
        assert_eq!(engine.balls_in_current_over(), 0);
        assert!(engine.over_just_completed());
        assert_eq!(engine.over_phase(), OverPhase::JustCompleted(completed.epoch));
    }

    #[test]
    fn test_illegal_delivery_never_completes_over() {
        let mut engine = ScoringEngine::new();
        for _ in 0..5 {
            engine.record_runs(1).unwrap();
        }
        assert!(engine.record_wide().unwrap().over_completed.is_none());
        assert!(engine.record_no_ball().unwrap().over_completed.is_none());
        assert_eq!(engine.current_over(), 1);
        assert_eq!(engine.balls_remaining(), 1);
    }

    #[test]
    fn test_clear_notification_matches_epoch() {
        let mut engine = ScoringEngine::with_balls_per_over(1).unwrap();
        let epoch = engine.record_runs(0).unwrap().over_completed.unwrap().epoch;

        assert!(engine.clear_over_notification(epoch));
        assert!(!engine.over_just_completed());
        assert_eq!(engine.current_over(), 2);
        assert_eq!(engine.total_balls(), 1);
    }

    #[test]
    fn test_stale_clear_is_ignored() {
        let mut engine = ScoringEngine::with_balls_per_over(1).unwrap();
        let first = engine.record_runs(0).unwrap().over_completed.unwrap().epoch;
        let second = engine.record_runs(0).unwrap().over_completed.unwrap().epoch;
        assert!(second > first);

        assert!(!engine.clear_over_notification(first));
        assert!(engine.over_just_completed());
        assert!(engine.clear_over_notification(second));
    }

    #[test]
    fn test_reset_invalidates_pending_clear() {
        let mut engine = ScoringEngine::with_balls_per_over(1).unwrap();
        let epoch = engine.record_runs(0).unwrap().over_completed.unwrap().epoch;

        engine.reset();
        assert!(!engine.over_just_completed());
        assert!(engine.completion_epoch() > epoch);

        let next = engine.record_runs(0).unwrap().over_completed.unwrap().epoch;
        assert!(!engine.clear_over_notification(epoch));
        assert!(engine.over_just_completed());
        assert!(engine.clear_over_notification(next));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut engine = ScoringEngine::new();
        assert_eq!(engine.undo_last(), None);
        assert_eq!(engine, ScoringEngine::new());
    }

    #[test]
    fn test_undo_keeps_notification() {
        let mut engine = ScoringEngine::with_balls_per_over(2).unwrap();
        engine.record_runs(1).unwrap();
        engine.record_runs(1).unwrap();
        assert!(engine.over_just_completed());

        engine.undo_last();
        assert!(engine.over_just_completed());
        assert_eq!(engine.current_over(), 1);
        assert_eq!(engine.balls_in_current_over(), 1);
    }

    #[test]
    fn test_recent_deliveries() {
        let mut engine = ScoringEngine::new();
        engine.record_runs(1).unwrap();
        engine.record_wide().unwrap();
        engine.record_runs(4).unwrap();

        let labels: Vec<String> = engine.recent_deliveries(2).iter().map(Delivery::label).collect();
        assert_eq!(labels, vec!["Wd", "4"]);
        assert_eq!(engine.recent_deliveries(10).len(), 3);
    }

    #[test]
    fn test_replay_matches_live_recording() {
        let mut live = ScoringEngine::new();
        live.record_runs(2).unwrap();
        live.record_no_ball().unwrap();
        live.record_leg_bye(1).unwrap();

        let replayed = ScoringEngine::replay(6, live.history()).unwrap();
        assert_eq!(replayed.total_runs(), live.total_runs());
        assert_eq!(replayed.total_balls(), live.total_balls());
        assert_eq!(replayed.extras(), live.extras());
        assert!(replayed.check_invariants().is_ok());
    }

    #[test]
    fn test_delivery_that_overflows_on_its_own_is_refused() {
        let mut engine = ScoringEngine::new();
        let delivery = Delivery::runs(u32::MAX).with_no_ball();

        assert_eq!(engine.record(delivery), Err(EngineError::ScoreOverflow(delivery)));
        assert_eq!(engine, ScoringEngine::new());
    }

    #[test]
    fn test_ball_count_overflow_is_refused() {
        let mut engine = ScoringEngine::new();
        engine.total_balls = u32::MAX;

        assert!(engine.record_runs(0).is_err());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_replay_stops_at_overflow() {
        let deliveries = [Delivery::runs(u32::MAX), Delivery::leg_bye(1)];
        assert_eq!(
            ScoringEngine::replay(6, &deliveries),
            Err(EngineError::ScoreOverflow(Delivery::leg_bye(1)))
        );
    }
}
