//! Strictly Innings - cricket innings scoring engine
//!
//! Tracks each delivery ball by ball: legal-ball counting, runs and
//! extras, over completion, and exact single-step undo.
//!
//! # Example
//!
//! ```
//! use strictly_innings::{EngineError, ScoringEngine};
//!
//! let mut engine = ScoringEngine::new();
//! engine.record_runs(4)?;
//! engine.record_wide()?;
//! engine.record_leg_bye(1)?;
//!
//! assert_eq!(engine.total_runs(), 6);
//! assert_eq!(engine.over_display(), "1.2");
//!
//! engine.undo_last();
//! assert_eq!(engine.over_display(), "1.1");
//! # Ok::<(), EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod delivery;
mod engine;
mod error;
mod extras;
mod scorecard;

pub mod contracts;
pub mod invariants;

pub use delivery::{Delivery, ExtraKind};
pub use engine::{
    CompletionEpoch, DEFAULT_BALLS_PER_OVER, DeliveryOutcome, OverCompleted, OverPhase,
    ScoringEngine,
};
pub use error::EngineError;
pub use extras::Extras;
pub use scorecard::Scorecard;
