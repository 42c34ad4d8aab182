//! Command-line interface for strictly_cricket.

use clap::{Parser, Subcommand};
use strictly_cricket::{DEFAULT_BALLS_PER_OVER, DEFAULT_SETTINGS_FILE};

/// Strictly Cricket - ball-by-ball innings scorer
#[derive(Parser, Debug)]
#[command(name = "strictly_cricket")]
#[command(about = "Ball-by-ball cricket innings scorer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score an innings interactively from standard input
    Score {
        /// Legal balls per over
        #[arg(long, default_value_t = DEFAULT_BALLS_PER_OVER)]
        balls_per_over: u32,

        /// Print the scorecard as JSON after each command
        #[arg(long)]
        json: bool,

        /// How long the "over complete" notification stays up, in milliseconds
        #[arg(long, default_value = "1000")]
        notify_ms: u64,
    },

    /// Show or change persistent settings
    Settings {
        /// Settings action
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Settings actions
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings
    Show,

    /// Set the innings length in overs
    SetOvers {
        /// Overs per innings (at least 1)
        overs: u32,
    },

    /// Remove the innings length limit
    ClearOvers,
}
