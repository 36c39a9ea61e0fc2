//! Tiles and terrain.

use serde::{Deserialize, Serialize};

use crate::actors::ActorId;

/// What the ground at a position is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Solid rock. Opaque and impassable.
    Wall,
    /// Open cave floor.
    Floor,
    /// The spot the player arrives on.
    Entrance,
    /// The way down to the next depth.
    Exit,
}

impl Terrain {
    /// Whether actors can stand here.
    #[must_use]
    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Whether light passes through.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Short description, as used in messages.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Terrain::Wall => "rough cave wall",
            Terrain::Floor => "cave floor",
            Terrain::Entrance => "the entrance",
            Terrain::Exit => "a passage leading down",
        }
    }
}

/// One cell of the level: terrain plus at most one occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub occupant: Option<ActorId>,
}

impl Tile {
    /// An unoccupied tile of the given terrain.
    #[must_use]
    pub fn of(terrain: Terrain) -> Self {
        Tile {
            terrain,
            occupant: None,
        }
    }

    /// Whether an actor could step onto this tile right now.
    #[must_use]
    pub fn is_free(self) -> bool {
        self.terrain.is_passable() && self.occupant.is_none()
    }
}
