/// Driver error types
use cadence_core::CadenceError;
use cadence_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Bad argument for {command}: {reason}")]
    BadArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CadenceError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn bad_argument(command: &'static str, reason: impl Into<String>) -> Self {
        Self::BadArgument {
            command,
            reason: reason.into(),
        }
    }
}
