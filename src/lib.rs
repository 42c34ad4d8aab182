//! Strictly Cricket - ball-by-ball innings scorer
//!
//! Wraps the [`strictly_innings`] scoring engine in a terminal scoring
//! shell with persistent settings.
//!
//! # Architecture
//!
//! - **Engine**: [`ScoringEngine`] owns all scoring state and rules
//! - **Scorer**: line-oriented shell that forwards input to the engine
//! - **Notifier**: clears the "over complete" flag after a short delay
//! - **Settings**: TOML-backed operator preferences (innings length)
//!
//! # Example
//!
//! ```no_run
//! use strictly_cricket::{OverNotifier, Scorer, ScoringEngine, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load("strictly_cricket.toml")?;
//! let mut scorer = Scorer::new(ScoringEngine::new(), OverNotifier::default())
//!     .with_overs_per_innings(*settings.overs_per_innings());
//!
//! let input = tokio::io::BufReader::new(tokio::io::stdin());
//! scorer.run(input, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod notifier;
mod scorer;
mod settings;

// Crate-level exports - Scoring engine
pub use strictly_innings::{
    CompletionEpoch, DEFAULT_BALLS_PER_OVER, Delivery, DeliveryOutcome, EngineError, ExtraKind,
    Extras, OverCompleted, OverPhase, Scorecard, ScoringEngine,
};

// Crate-level exports - Notification scheduling
pub use notifier::{DEFAULT_NOTIFY_DELAY, OverNotifier};

// Crate-level exports - Scoring shell
pub use scorer::{
    HELP, OutputFormat, Scorer, ScorerCommand, ScorerError, ScorerEvent, over_complete_banner,
    scorecard_text,
};

// Crate-level exports - Settings
pub use settings::{DEFAULT_SETTINGS_FILE, Settings, SettingsError};
