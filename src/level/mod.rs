//! The current map: a tile grid with visibility memory.

pub mod gen;
pub mod tile;

pub use tile::{Terrain, Tile};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::actors::ActorId;
use crate::grid::{fov, Grid, Pos};

/// One depth of the dungeon.
///
/// Holds the tile grid plus what the player currently sees (`visible`) and
/// has ever seen (`remembered`). Occupancy is tracked per tile; the level
/// does not own actors, only their ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    grid: Grid<Tile>,
    depth: u32,
    entrance: Pos,
    exit: Pos,
    visible: FxHashSet<Pos>,
    remembered: FxHashSet<Pos>,
}

impl Level {
    /// Assemble a level from a finished tile grid.
    ///
    /// Generation lives in [`gen`]; this constructor exists for it and for
    /// tests that need hand-built maps.
    #[must_use]
    pub fn from_parts(depth: u32, grid: Grid<Tile>, entrance: Pos, exit: Pos) -> Self {
        Level {
            grid,
            depth,
            entrance,
            exit,
            visible: FxHashSet::default(),
            remembered: FxHashSet::default(),
        }
    }

    /// Dungeon depth of this level, starting at 1.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Where the player arrives.
    #[must_use]
    pub fn entrance(&self) -> Pos {
        self.entrance
    }

    /// Where the passage down lies.
    #[must_use]
    pub fn exit(&self) -> Pos {
        self.exit
    }

    /// The underlying tile grid.
    #[must_use]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// The terrain at a position, if in bounds.
    #[must_use]
    pub fn terrain(&self, pos: Pos) -> Option<Terrain> {
        self.grid.get(pos).map(|tile| tile.terrain)
    }

    /// Whether actors can stand at `pos`. Out of bounds is impassable.
    #[must_use]
    pub fn passable(&self, pos: Pos) -> bool {
        self.grid
            .get(pos)
            .map_or(false, |tile| tile.terrain.is_passable())
    }

    /// Whether light passes through `pos`. Out of bounds is opaque.
    #[must_use]
    pub fn transparent(&self, pos: Pos) -> bool {
        self.grid
            .get(pos)
            .map_or(false, |tile| tile.terrain.is_transparent())
    }

    /// The actor standing at `pos`, if any.
    #[must_use]
    pub fn occupant(&self, pos: Pos) -> Option<ActorId> {
        self.grid.get(pos).and_then(|tile| tile.occupant)
    }

    /// Place an actor on a tile.
    ///
    /// The tile must be free; placing onto an occupied or impassable tile
    /// is a logic error upstream.
    pub fn place_actor(&mut self, id: ActorId, pos: Pos) {
        let tile = &mut self.grid[pos];
        debug_assert!(tile.is_free(), "placing actor on non-free tile {pos}");
        tile.occupant = Some(id);
    }

    /// Remove whatever actor stands at `pos`.
    pub fn remove_actor(&mut self, pos: Pos) -> Option<ActorId> {
        self.grid[pos].occupant.take()
    }

    /// Move an occupant between tiles.
    pub fn move_actor(&mut self, from: Pos, to: Pos) {
        if let Some(id) = self.grid[from].occupant.take() {
            self.place_actor(id, to);
        }
    }

    /// Recompute the visible set from `origin` and fold it into memory.
    pub fn update_fov(&mut self, origin: Pos, radius: Option<u32>) {
        let mut seen = FxHashSet::default();
        {
            let grid = &self.grid;
            fov::fov(
                origin,
                radius,
                |pos| {
                    grid.get(pos)
                        .map_or(false, |tile| tile.terrain.is_transparent())
                },
                |pos| {
                    if grid.contains(pos) {
                        seen.insert(pos);
                    }
                },
            );
        }
        self.remembered.extend(seen.iter().copied());
        self.visible = seen;
    }

    /// Whether the player currently sees `pos`.
    #[must_use]
    pub fn is_visible(&self, pos: Pos) -> bool {
        self.visible.contains(&pos)
    }

    /// Whether the player has ever seen `pos` on this level.
    #[must_use]
    pub fn is_remembered(&self, pos: Pos) -> bool {
        self.remembered.contains(&pos)
    }

    /// Every currently visible position.
    #[must_use]
    pub fn visible(&self) -> &FxHashSet<Pos> {
        &self.visible
    }
}
