//! Line commands read from stdin

use crate::error::{CliError, Result};
use cadence_core::TrackId;
use std::str::FromStr;

/// One driver command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle,
    BeginSeek,
    /// Seek to a fraction of the track (`0.25` or `25%`)
    Seek(f64),
    EndSeek,
    Next,
    Prev,
    /// Play a catalog track, keeping the catalog around it as the queue
    Play(TrackId),
    /// Play the whole catalog from an index
    List(usize),
    State,
    /// One-line position and queue summary
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  toggle            play/pause
  begin-seek        start a seek gesture
  seek <pos>        move to a fraction (0.5) or percentage (50%)
  end-seek          finish the seek gesture
  next | prev       skip forward/back
  play <track-id>   play a catalog track in context
  list <index>      play the catalog from an index
  state             print the current state as JSON
  status            print position and queue on one line
  help | quit";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::UnknownCommand(String::new()));
        };
        let arg = words.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "toggle" | "pause" | "p" => Self::Toggle,
            "begin-seek" => Self::BeginSeek,
            "seek" => Self::Seek(parse_position(arg)?),
            "end-seek" => Self::EndSeek,
            "next" | "n" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "play" => {
                let id = arg.ok_or_else(|| CliError::bad_argument("play", "missing track id"))?;
                Self::Play(TrackId::new(id))
            }
            "list" => {
                let index = arg
                    .unwrap_or("0")
                    .parse()
                    .map_err(|_| CliError::bad_argument("list", "index must be a whole number"))?;
                Self::List(index)
            }
            "state" => Self::State,
            "status" | "s" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CliError::UnknownCommand(format!("{} {}", name, extra)));
        }

        Ok(command)
    }
}

fn parse_position(arg: Option<&str>) -> Result<f64> {
    let raw = arg.ok_or_else(|| CliError::bad_argument("seek", "missing position"))?;

    let (number, scale) = match raw.strip_suffix('%') {
        Some(percent) => (percent, 100.0),
        None => (raw, 1.0),
    };

    let value: f64 = number
        .parse()
        .map_err(|_| CliError::bad_argument("seek", format!("not a number: {}", raw)))?;
    if value.is_nan() {
        return Err(CliError::bad_argument("seek", "not a number: NaN"));
    }

    Ok(value / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!("toggle".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("  NEXT ".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("prev".parse::<Command>().unwrap(), Command::Prev);
        assert_eq!("begin-seek".parse::<Command>().unwrap(), Command::BeginSeek);
        assert_eq!("end-seek".parse::<Command>().unwrap(), Command::EndSeek);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("state".parse::<Command>().unwrap(), Command::State);
        assert_eq!("s".parse::<Command>().unwrap(), Command::Status);
    }

    #[test]
    fn parses_seek_fraction_and_percentage() {
        assert_eq!("seek 0.25".parse::<Command>().unwrap(), Command::Seek(0.25));
        assert_eq!("seek 50%".parse::<Command>().unwrap(), Command::Seek(0.5));
    }

    #[test]
    fn rejects_bad_seek() {
        assert!(matches!(
            "seek".parse::<Command>(),
            Err(CliError::BadArgument { command: "seek", .. })
        ));
        assert!(matches!(
            "seek half".parse::<Command>(),
            Err(CliError::BadArgument { command: "seek", .. })
        ));
        assert!(matches!(
            "seek NaN".parse::<Command>(),
            Err(CliError::BadArgument { command: "seek", .. })
        ));
    }

    #[test]
    fn parses_play_and_list() {
        assert_eq!(
            "play t-42".parse::<Command>().unwrap(),
            Command::Play(TrackId::new("t-42"))
        );
        assert_eq!("list 3".parse::<Command>().unwrap(), Command::List(3));
        assert_eq!("list".parse::<Command>().unwrap(), Command::List(0));
        assert!("play".parse::<Command>().is_err());
        assert!("list -1".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_unknown_and_trailing_words() {
        assert!(matches!(
            "shuffle".parse::<Command>(),
            Err(CliError::UnknownCommand(name)) if name == "shuffle"
        ));
        assert!("toggle now".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }
}
