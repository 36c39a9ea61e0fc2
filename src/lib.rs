//! # hexrl
//!
//! A seeded hex-grid roguelike engine driven by textual commands.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The engine performs no IO. Input arrives as raw
//!    text lines; output leaves through an [`OutputSink`] the host provides,
//!    one batch per dispatched line.
//!
//! 2. **Deterministic**: All randomness flows from one seed through named
//!    context streams. The same seed and the same command script produce
//!    the same transcript, every time.
//!
//! 3. **Configuration Over Convention**: Map dimensions, action costs, and
//!    stat lines come from `GameConfig` at startup, not from constants.
//!
//! ## Architecture
//!
//! - **Delay scheduling**: Every action returns a delay; the schedule is a
//!   min-queue of due times with a monotonic clock. One input line resolves
//!   player and mob turns until control returns to the player.
//!
//! - **Flat ownership**: Actors live in one generational [`Store`]; tiles
//!   and the schedule refer to them by id, so the whole session serializes
//!   into a save blob and back.
//!
//! ## Modules
//!
//! - `core`: Commands, configuration, RNG, storage, errors
//! - `grid`: Axial hex geometry and field of view
//! - `level`: Tiles, visibility memory, cave generation
//! - `actors`: Actor data and mob behavior
//! - `schedule`: Delay-based turn order
//! - `output`: Queued, timestamped output
//! - `game`: The session facade and dispatch loop

pub mod actors;
pub mod core;
pub mod game;
pub mod grid;
pub mod level;
pub mod output;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandError, Costs, GameConfig, GameRng, GameRngState, Id, LevelConfig, SaveError,
    Store,
};

pub use crate::grid::{Direction, Displacement, Grid, Pos, DIRECTIONS};

pub use crate::level::{Level, Terrain, Tile};

pub use crate::actors::{Actor, ActorId, ActorKind, Behavior, ChaseBehavior, MobAction};

pub use crate::schedule::Schedule;

pub use crate::output::{BufferSink, FnSink, OutputQueue, OutputSink};

pub use crate::game::Game;
