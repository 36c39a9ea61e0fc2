//! Actors: the entities that take scheduled turns.

pub mod behavior;

pub use behavior::{Behavior, ChaseBehavior, MobAction};

use serde::{Deserialize, Serialize};

use crate::core::store::Id;
use crate::grid::{Direction, Pos};

/// Scheduler key and store handle for an actor.
pub type ActorId = Id<Actor>;

/// What kind of entity an actor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Troll,
}

impl ActorKind {
    /// Subject name, as used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Player => "you",
            ActorKind::Troll => "the troll",
        }
    }
}

/// A game entity capable of taking a scheduled action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: Pos,
    pub facing: Direction,
    pub hp: i32,
    pub max_hp: i32,
}

impl Actor {
    /// Create the player actor.
    #[must_use]
    pub fn player(pos: Pos, hp: i32) -> Self {
        Actor {
            kind: ActorKind::Player,
            pos,
            facing: Direction::East,
            hp,
            max_hp: hp,
        }
    }

    /// Create a mob actor.
    #[must_use]
    pub fn mob(kind: ActorKind, pos: Pos, hp: i32) -> Self {
        debug_assert!(kind != ActorKind::Player);
        Actor {
            kind,
            pos,
            facing: Direction::East,
            hp,
            max_hp: hp,
        }
    }

    /// Whether this is the player.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Whether this actor still lives.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
