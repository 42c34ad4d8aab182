//! Text rendering of the scorecard.

use strictly_innings::{ExtraKind, Scorecard};
use strum::IntoEnumIterator;

/// Multi-line score display.
pub fn scorecard_text(card: &Scorecard, overs_per_innings: Option<u32>) -> String {
    let limit = overs_per_innings
        .map(|overs| format!(" of {}", overs))
        .unwrap_or_default();

    let breakdown = ExtraKind::iter()
        .map(|kind| format!("{} {}", kind, card.extras.get(kind)))
        .collect::<Vec<_>>()
        .join(", ");

    let recent = if card.recent.is_empty() {
        "-".to_string()
    } else {
        card.recent.join(" ")
    };

    format!(
        "Score {}  ({} overs{})  Over {}  Balls left {}\nExtras {} ({})\nRecent: {}",
        card.total_runs,
        card.overs_bowled,
        limit,
        card.over_display,
        card.balls_remaining,
        card.extras_total,
        breakdown,
        recent,
    )
}

/// Banner printed when a delivery completes an over.
pub fn over_complete_banner(over: u32) -> String {
    format!("*** Over {} complete ***", over)
}
