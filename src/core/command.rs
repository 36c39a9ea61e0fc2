//! Parsing of raw input lines into player commands.
//!
//! An input line is split at the **first space** into a command token and
//! an argument remainder; the remainder is never tokenized further. The
//! token picks the command, the remainder (where one is expected) names a
//! hex direction.
//!
//! ```
//! use hexrl::core::Command;
//! use hexrl::grid::Direction;
//!
//! assert_eq!(Command::parse("move ne"), Ok(Command::Move(Direction::Northeast)));
//! assert_eq!(Command::parse("wait"), Ok(Command::Wait));
//! assert!(Command::parse("dance").is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::CommandError;
use crate::grid::Direction;

/// A parsed player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step to the adjacent tile in a direction (bump-attacks occupants).
    Move(Direction),

    /// Melee attack toward a direction without moving.
    Attack(Direction),

    /// Rest in place for a short beat.
    Wait,

    /// Take the stairs down. Only works on the exit tile.
    Descend,

    /// Describe the surroundings. Costs no time.
    Look,
}

/// Split a line at the first space into command token and argument remainder.
///
/// The remainder is empty when there is no space. Nothing is trimmed: a
/// leading space yields an empty token.
#[must_use]
pub fn partition(line: &str) -> (&str, &str) {
    match line.find(' ') {
        Some(split) => (&line[..split], &line[split + 1..]),
        None => (line, ""),
    }
}

impl Command {
    /// Parse a raw input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let (token, arg) = partition(line);
        match token {
            "" => Err(CommandError::Empty),
            "move" | "go" => Ok(Command::Move(parse_direction(token, arg)?)),
            "attack" | "hit" => Ok(Command::Attack(parse_direction(token, arg)?)),
            "wait" | "rest" => no_arg(Command::Wait, token, arg),
            "descend" | "down" => no_arg(Command::Descend, token, arg),
            "look" => no_arg(Command::Look, token, arg),
            _ => Err(CommandError::UnknownCommand(token.to_string())),
        }
    }
}

fn no_arg(command: Command, token: &str, arg: &str) -> Result<Command, CommandError> {
    if arg.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument {
            command: token.to_string(),
        })
    }
}

fn parse_direction(token: &str, arg: &str) -> Result<Direction, CommandError> {
    match arg {
        "" => Err(CommandError::MissingDirection(token.to_string())),
        "ne" | "northeast" => Ok(Direction::Northeast),
        "e" | "east" => Ok(Direction::East),
        "se" | "southeast" => Ok(Direction::Southeast),
        "sw" | "southwest" => Ok(Direction::Southwest),
        "w" | "west" => Ok(Direction::West),
        "nw" | "northwest" => Ok(Direction::Northwest),
        other => Err(CommandError::BadDirection(other.to_string())),
    }
}
