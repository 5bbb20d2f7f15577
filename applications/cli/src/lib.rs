//! Cadence CLI Library
//!
//! Terminal driver for a playback session: configuration loading, the stdin
//! command language, and the loop that feeds commands into the session.
//!
//! This library exposes the driver components for testing purposes.

pub mod command;
pub mod config;
pub mod driver;
pub mod error;

// Re-export commonly used types for convenience
pub use command::Command;
pub use self::config::CliConfig;
pub use driver::Driver;
pub use error::{CliError, Result};
