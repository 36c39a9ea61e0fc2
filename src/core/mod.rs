//! Core engine types: commands, configuration, RNG, storage, errors.
//!
//! This module contains the fundamental building blocks that carry no game
//! rules of their own. Behavior lives in `level`, `actors`, and `game`.

pub mod command;
pub mod config;
pub mod error;
pub mod rng;
pub mod store;

pub use command::{partition, Command};
pub use config::{Costs, GameConfig, LevelConfig};
pub use error::{CommandError, SaveError};
pub use rng::{GameRng, GameRngState};
pub use store::{Id, Store};
