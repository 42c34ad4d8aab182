//! Line-oriented scoring shell.
//!
//! The shell owns no scoring rules. It parses input, forwards it to the
//! engine, renders the scorecard and schedules the over notification clear.
//! An optional innings length is enforced here, on top of the engine.

mod command;
mod render;

pub use command::{HELP, ScorerCommand, ScorerError};
pub use render::{over_complete_banner, scorecard_text};

use std::io::Write;
use std::sync::Arc;

use strictly_innings::{Delivery, DeliveryOutcome, ScoringEngine};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::notifier::OverNotifier;

/// How the scorecard is printed after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorerEvent {
    /// A delivery was recorded.
    Recorded(DeliveryOutcome),
    /// Undo ran; `None` when there was nothing to undo.
    Undone(Option<Delivery>),
    /// The innings was reset.
    Reset,
    /// Help was requested.
    Help,
    /// The operator asked to leave.
    Quit,
}

/// Scoring shell driving a shared engine.
#[derive(Debug)]
pub struct Scorer {
    engine: Arc<Mutex<ScoringEngine>>,
    notifier: OverNotifier,
    overs_per_innings: Option<u32>,
    format: OutputFormat,
}

impl Scorer {
    /// Creates a shell around an engine.
    #[instrument(skip(engine, notifier))]
    pub fn new(engine: ScoringEngine, notifier: OverNotifier) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            notifier,
            overs_per_innings: None,
            format: OutputFormat::Text,
        }
    }

    /// Limits the innings to the given number of overs.
    pub fn with_overs_per_innings(mut self, overs_per_innings: Option<u32>) -> Self {
        self.overs_per_innings = overs_per_innings;
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Shared handle to the engine.
    pub fn engine(&self) -> Arc<Mutex<ScoringEngine>> {
        Arc::clone(&self.engine)
    }

    /// True once the configured innings length has been bowled.
    pub async fn innings_complete(&self) -> bool {
        let completed = self.engine.lock().await.completed_overs();
        self.overs_per_innings
            .is_some_and(|limit| completed >= limit)
    }

    /// Applies one command to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::InningsComplete`] for a delivery once the
    /// innings length has been reached, and [`ScorerError::Engine`] when the
    /// engine refuses a delivery. Undo and reset are always allowed.
    #[instrument(skip(self))]
    pub async fn apply(&mut self, command: ScorerCommand) -> Result<ScorerEvent, ScorerError> {
        let mut engine = self.engine.lock().await;

        if command.is_delivery()
            && let Some(limit) = self.overs_per_innings
            && engine.completed_overs() >= limit
        {
            warn!(limit, "Delivery refused, innings complete");
            return Err(ScorerError::InningsComplete(limit));
        }

        let event = match command {
            ScorerCommand::Runs(runs) => ScorerEvent::Recorded(engine.record_runs(runs)?),
            ScorerCommand::Wide => ScorerEvent::Recorded(engine.record_wide()?),
            ScorerCommand::NoBall => ScorerEvent::Recorded(engine.record_no_ball()?),
            ScorerCommand::Bye(byes) => ScorerEvent::Recorded(engine.record_bye(byes)?),
            ScorerCommand::LegBye(leg_byes) => {
                ScorerEvent::Recorded(engine.record_leg_bye(leg_byes)?)
            }
            ScorerCommand::Undo => ScorerEvent::Undone(engine.undo_last()),
            ScorerCommand::Reset => {
                engine.reset();
                self.notifier.cancel();
                ScorerEvent::Reset
            }
            ScorerCommand::Help => ScorerEvent::Help,
            ScorerCommand::Quit => ScorerEvent::Quit,
        };
        drop(engine);

        if let ScorerEvent::Recorded(outcome) = &event
            && let Some(completed) = outcome.over_completed
        {
            self.notifier.schedule(self.engine(), completed.epoch);
        }

        debug!(?event, "Command applied");
        Ok(event)
    }

    /// Renders the current scorecard in the configured format.
    pub async fn render(&self) -> anyhow::Result<String> {
        let card = self.engine.lock().await.scorecard();
        match self.format {
            OutputFormat::Text => Ok(scorecard_text(&card, self.overs_per_innings)),
            OutputFormat::Json => Ok(serde_json::to_string(&card)?),
        }
    }

    fn event_message(&self, event: &ScorerEvent) -> Option<String> {
        match event {
            ScorerEvent::Recorded(outcome) => outcome
                .over_completed
                .map(|completed| over_complete_banner(completed.over)),
            ScorerEvent::Undone(Some(delivery)) => Some(format!("Undid {}", delivery)),
            ScorerEvent::Undone(None) => Some("Nothing to undo".to_string()),
            ScorerEvent::Reset => Some("Innings reset".to_string()),
            ScorerEvent::Help | ScorerEvent::Quit => None,
        }
    }

    fn error_message(&self, err: &ScorerError) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(err.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(&serde_json::json!({
                "error": err.to_string(),
            }))?),
        }
    }

    /// Reads commands line by line until end of input or `quit`.
    #[instrument(skip_all)]
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Scorer started");
        if self.format == OutputFormat::Text {
            writeln!(output, "Type 'help' for commands.")?;
        }
        writeln!(output, "{}", self.render().await?)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let result = match line.parse::<ScorerCommand>() {
                Ok(command) => self.apply(command).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(ScorerEvent::Quit) => break,
                Ok(ScorerEvent::Help) => writeln!(output, "{}", HELP)?,
                Ok(event) => {
                    if self.format == OutputFormat::Text
                        && let Some(message) = self.event_message(&event)
                    {
                        writeln!(output, "{}", message)?;
                    }
                    writeln!(output, "{}", self.render().await?)?;
                    if self.format == OutputFormat::Text && self.innings_complete().await {
                        writeln!(output, "Innings complete.")?;
                    }
                }
                Err(err) => writeln!(output, "{}", self.error_message(&err)?)?,
            }
            output.flush()?;
        }

        self.notifier.cancel();
        info!("Scorer finished");
        Ok(())
    }
}
