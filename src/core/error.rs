//! Error types for the two fallible seams: input parsing and saves.
//!
//! The dispatch loop itself never fails: a command that does not parse is
//! reported back to the player as a queued line and costs no time.

use thiserror::Error;

/// Why an input line failed to parse into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was empty (or began with a space).
    #[error("huh? say something")]
    Empty,

    /// The command token is not one we know.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A direction argument was required but missing.
    #[error("'{0}' needs a direction (ne e se sw w nw)")]
    MissingDirection(String),

    /// The direction argument did not name a hex direction.
    #[error("'{0}' is not a direction (ne e se sw w nw)")]
    BadDirection(String),

    /// The command takes no argument but one was given.
    #[error("'{command}' takes no argument")]
    UnexpectedArgument { command: String },
}

/// Save encoding/decoding failures.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("failed to encode save state: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode save state: {0}")]
    Decode(#[source] bincode::Error),
}
