//! Scorer input commands.

use std::str::FromStr;

use strictly_innings::EngineError;
use tracing::instrument;

/// One line of scorer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerCommand {
    /// Runs off the bat (`.` or `0` is a dot ball).
    Runs(u32),
    /// Wide.
    Wide,
    /// No-ball.
    NoBall,
    /// Byes.
    Bye(u32),
    /// Leg byes.
    LegBye(u32),
    /// Undo the last delivery.
    Undo,
    /// Start the innings again.
    Reset,
    /// Print the command summary.
    Help,
    /// Leave the scorer.
    Quit,
}

impl ScorerCommand {
    /// True for commands that record a delivery.
    pub fn is_delivery(&self) -> bool {
        matches!(
            self,
            Self::Runs(_) | Self::Wide | Self::NoBall | Self::Bye(_) | Self::LegBye(_)
        )
    }
}

/// Command summary shown by `help`.
pub const HELP: &str = "\
Commands:
  <n> | r <n>   runs off the bat (. for a dot ball)
  wd            wide
  nb            no-ball
  b <n>         byes
  lb <n>        leg byes
  u | undo      undo the last delivery
  reset         start the innings again
  help          show this summary
  q | quit      leave the scorer";

/// Error raised by the scoring shell.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ScorerError {
    /// Input did not match any command.
    #[display("Unknown command '{}' (type 'help')", _0)]
    UnknownCommand(String),

    /// A count was required but not given.
    #[display("'{}' needs a count, e.g. '{} 1'", _0, _0)]
    MissingCount(String),

    /// A count was negative, fractional or too large.
    #[display("'{}' is not a valid count", _0)]
    InvalidCount(String),

    /// The configured innings length has been bowled.
    #[display("Innings complete after {} overs (undo or reset to continue)", _0)]
    InningsComplete(u32),

    /// The engine refused the delivery.
    #[display("{}", _0)]
    Engine(EngineError),
}

impl std::error::Error for ScorerError {}

impl From<EngineError> for ScorerError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

fn parse_count(raw: &str) -> Result<u32, ScorerError> {
    raw.parse::<u32>()
        .map_err(|_| ScorerError::InvalidCount(raw.to_string()))
}

impl FromStr for ScorerCommand {
    type Err = ScorerError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ScorerError::UnknownCommand(String::new()));
        };
        let head = head.to_ascii_lowercase();
        let arg = words.next();

        if let Some(extra) = words.next() {
            return Err(ScorerError::UnknownCommand(format!("{} ... {}", head, extra)));
        }

        let with_count = |make: fn(u32) -> ScorerCommand| match arg {
            Some(raw) => parse_count(raw).map(make),
            None => Err(ScorerError::MissingCount(head.clone())),
        };

        match head.as_str() {
            "." => Ok(Self::Runs(0)),
            "r" | "runs" => with_count(Self::Runs),
            "b" | "bye" | "byes" => with_count(Self::Bye),
            "lb" | "legbye" | "legbyes" => with_count(Self::LegBye),
            "wd" | "wide" if arg.is_none() => Ok(Self::Wide),
            "nb" | "noball" if arg.is_none() => Ok(Self::NoBall),
            "u" | "undo" if arg.is_none() => Ok(Self::Undo),
            "reset" if arg.is_none() => Ok(Self::Reset),
            "help" | "?" if arg.is_none() => Ok(Self::Help),
            "q" | "quit" | "exit" if arg.is_none() => Ok(Self::Quit),
            _ if arg.is_none() && head.starts_with(|c: char| c.is_ascii_digit() || c == '-') => {
                parse_count(&head).map(Self::Runs)
            }
            _ => Err(ScorerError::UnknownCommand(line.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runs() {
        assert_eq!("4".parse(), Ok(ScorerCommand::Runs(4)));
        assert_eq!("r 6".parse(), Ok(ScorerCommand::Runs(6)));
        assert_eq!(".".parse(), Ok(ScorerCommand::Runs(0)));
    }

    #[test]
    fn test_parse_extras() {
        assert_eq!("wd".parse(), Ok(ScorerCommand::Wide));
        assert_eq!("NB".parse(), Ok(ScorerCommand::NoBall));
        assert_eq!("b 2".parse(), Ok(ScorerCommand::Bye(2)));
        assert_eq!("lb 1".parse(), Ok(ScorerCommand::LegBye(1)));
    }

    #[test]
    fn test_parse_control() {
        assert_eq!("undo".parse(), Ok(ScorerCommand::Undo));
        assert_eq!("reset".parse(), Ok(ScorerCommand::Reset));
        assert_eq!("q".parse(), Ok(ScorerCommand::Quit));
        assert_eq!("help".parse(), Ok(ScorerCommand::Help));
    }

    #[test]
    fn test_negative_count_rejected() {
        assert_eq!(
            "-1".parse::<ScorerCommand>(),
            Err(ScorerError::InvalidCount("-1".to_string()))
        );
        assert_eq!(
            "b -2".parse::<ScorerCommand>(),
            Err(ScorerError::InvalidCount("-2".to_string()))
        );
    }

    #[test]
    fn test_missing_count() {
        assert_eq!(
            "lb".parse::<ScorerCommand>(),
            Err(ScorerError::MissingCount("lb".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            "wicket".parse::<ScorerCommand>(),
            Err(ScorerError::UnknownCommand(_))
        ));
        assert!(matches!(
            "wd 2".parse::<ScorerCommand>(),
            Err(ScorerError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_is_delivery() {
        assert!(ScorerCommand::Bye(1).is_delivery());
        assert!(!ScorerCommand::Undo.is_delivery());
    }
}
