//! Running extras tally for an innings.

use super::delivery::{Delivery, ExtraKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Extras conceded so far in the innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extras {
    /// Wides bowled.
    pub wides: u32,
    /// No-balls bowled.
    pub no_balls: u32,
    /// Byes conceded.
    pub byes: u32,
    /// Leg byes conceded.
    pub leg_byes: u32,
}

impl Extras {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all four counters.
    ///
    /// Saturates; exact for any tally the engine holds.
    pub fn total(&self) -> u32 {
        self.wides
            .saturating_add(self.no_balls)
            .saturating_add(self.byes)
            .saturating_add(self.leg_byes)
    }

    /// Reads one counter.
    pub fn get(&self, kind: ExtraKind) -> u32 {
        match kind {
            ExtraKind::Wide => self.wides,
            ExtraKind::NoBall => self.no_balls,
            ExtraKind::Bye => self.byes,
            ExtraKind::LegBye => self.leg_byes,
        }
    }

    fn counter_mut(&mut self, kind: ExtraKind) -> &mut u32 {
        match kind {
            ExtraKind::Wide => &mut self.wides,
            ExtraKind::NoBall => &mut self.no_balls,
            ExtraKind::Bye => &mut self.byes,
            ExtraKind::LegBye => &mut self.leg_byes,
        }
    }

    /// Tally with a delivery's extras added, or `None` if any counter
    /// (or the total) would overflow.
    pub(crate) fn checked_credit(&self, delivery: &Delivery) -> Option<Self> {
        let mut extras = *self;
        for kind in ExtraKind::iter() {
            let counter = extras.counter_mut(kind);
            *counter = counter.checked_add(delivery.extra(kind))?;
        }
        extras
            .wides
            .checked_add(extras.no_balls)?
            .checked_add(extras.byes)?
            .checked_add(extras.leg_byes)?;
        Some(extras)
    }

    /// Removes a delivery's extras. Exact inverse of an accepted
    /// [`Extras::checked_credit`].
    pub(crate) fn debit(&mut self, delivery: &Delivery) {
        for kind in ExtraKind::iter() {
            let counter = self.counter_mut(kind);
            *counter -= delivery.extra(kind);
        }
    }

    /// Tally of a sequence of deliveries.
    pub fn from_deliveries<'a>(deliveries: impl IntoIterator<Item = &'a Delivery>) -> Self {
        let mut extras = Self::new();
        for delivery in deliveries {
            for kind in ExtraKind::iter() {
                let counter = extras.counter_mut(kind);
                *counter = counter.saturating_add(delivery.extra(kind));
            }
        }
        extras
    }
}
