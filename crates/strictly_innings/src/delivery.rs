//! A single recorded ball and the extras it can carry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Kinds of extras credited to the batting side.
///
/// The `Display` form is the short scorecard code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ExtraKind {
    /// Wide: one penalty run, not a legal ball.
    #[strum(serialize = "Wd")]
    Wide,
    /// No-ball: one penalty run, not a legal ball.
    #[strum(serialize = "Nb")]
    NoBall,
    /// Byes: runs taken without bat or body contact.
    #[strum(serialize = "B")]
    Bye,
    /// Leg byes: runs taken off the batter's body.
    #[strum(serialize = "Lb")]
    LegBye,
}

/// One bowled ball and its recorded outcome.
///
/// Deliveries are values: built once, handed to the engine,
/// and never touched again after they land in history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delivery {
    runs: u32,
    is_wide: bool,
    is_no_ball: bool,
    byes: u32,
    leg_byes: u32,
}

impl Delivery {
    /// Creates a dot ball.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legal delivery with runs off the bat.
    pub fn runs(runs: u32) -> Self {
        Self::new().with_runs(runs)
    }

    /// A wide with nothing else added.
    pub fn wide() -> Self {
        Self::new().with_wide()
    }

    /// A no-ball with nothing else added.
    pub fn no_ball() -> Self {
        Self::new().with_no_ball()
    }

    /// Legal delivery with byes.
    pub fn bye(byes: u32) -> Self {
        Self::new().with_byes(byes)
    }

    /// Legal delivery with leg byes.
    pub fn leg_bye(leg_byes: u32) -> Self {
        Self::new().with_leg_byes(leg_byes)
    }

    /// Sets runs off the bat.
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }

    /// Marks the delivery as a wide.
    pub fn with_wide(mut self) -> Self {
        self.is_wide = true;
        self
    }

    /// Marks the delivery as a no-ball.
    pub fn with_no_ball(mut self) -> Self {
        self.is_no_ball = true;
        self
    }

    /// Sets byes.
    pub fn with_byes(mut self, byes: u32) -> Self {
        self.byes = byes;
        self
    }

    /// Sets leg byes.
    pub fn with_leg_byes(mut self, leg_byes: u32) -> Self {
        self.leg_byes = leg_byes;
        self
    }

    /// Runs off the bat.
    pub fn runs_off_bat(&self) -> u32 {
        self.runs
    }

    /// Whether this delivery was called wide.
    pub fn is_wide(&self) -> bool {
        self.is_wide
    }

    /// Whether this delivery was called a no-ball.
    pub fn is_no_ball(&self) -> bool {
        self.is_no_ball
    }

    /// Byes scored.
    pub fn byes(&self) -> u32 {
        self.byes
    }

    /// Leg byes scored.
    pub fn leg_byes(&self) -> u32 {
        self.leg_byes
    }

    /// A legal delivery counts toward the over.
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }

    /// Runs credited as extras, or `None` if they do not fit in a `u32`.
    pub fn checked_extra_runs(&self) -> Option<u32> {
        u32::from(self.is_wide)
            .checked_add(u32::from(self.is_no_ball))?
            .checked_add(self.byes)?
            .checked_add(self.leg_byes)
    }

    /// Every run this delivery adds, or `None` if they do not fit in a `u32`.
    pub fn checked_total_runs(&self) -> Option<u32> {
        self.runs.checked_add(self.checked_extra_runs()?)
    }

    /// Runs credited as extras (penalties plus byes and leg byes).
    ///
    /// Saturates; exact for every delivery the engine accepts.
    pub fn extra_runs(&self) -> u32 {
        self.checked_extra_runs().unwrap_or(u32::MAX)
    }

    /// Every run this delivery adds to the total.
    ///
    /// Saturates; exact for every delivery the engine accepts.
    pub fn total_runs(&self) -> u32 {
        self.checked_total_runs().unwrap_or(u32::MAX)
    }

    /// Amount this delivery contributes to one extras counter.
    pub fn extra(&self, kind: ExtraKind) -> u32 {
        match kind {
            ExtraKind::Wide => u32::from(self.is_wide),
            ExtraKind::NoBall => u32::from(self.is_no_ball),
            ExtraKind::Bye => self.byes,
            ExtraKind::LegBye => self.leg_byes,
        }
    }

    /// Scorecard label, e.g. `"Wd+B2+4"`. A dot ball is `"0"`.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.is_wide {
            parts.push(ExtraKind::Wide.to_string());
        }
        if self.is_no_ball {
            parts.push(ExtraKind::NoBall.to_string());
        }
        if self.byes > 0 {
            parts.push(format!("{}{}", ExtraKind::Bye, self.byes));
        }
        if self.leg_byes > 0 {
            parts.push(format!("{}{}", ExtraKind::LegBye, self.leg_byes));
        }
        if self.runs > 0 {
            parts.push(self.runs.to_string());
        }

        if parts.is_empty() {
            "0".to_string()
        } else {
            parts.join("+")
        }
    }
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
