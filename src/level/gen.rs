//! Cave generation.
//!
//! Carving starts from an all-wall interior with a single open start
//! position and visits the inner positions in RNG-shuffled order, opening
//! each one whose neighbor ring does not currently hold exactly one
//! contiguous group of open tiles. Opening a zero-group position seeds a
//! new pocket; opening a multi-group position merges pockets; a one-group
//! position would only fatten a corridor, so it stays rock.
//!
//! Pockets that never merge with the start region are left as sealed
//! decoration: the exit and every spawn are drawn from the region reachable
//! from the entrance, which is what makes the level playable.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

use super::tile::{Terrain, Tile};
use super::Level;
use crate::core::config::LevelConfig;
use crate::core::rng::GameRng;
use crate::grid::{Grid, Pos, DIRECTIONS};

/// Generate a level and the positions to spawn its mobs on.
pub fn generate(config: &LevelConfig, depth: u32, rng: &mut GameRng) -> (Level, Vec<Pos>) {
    let mut open = Grid::new(config.width, config.height, |_| false);
    let start = open.center();
    open[start] = true;

    let mut inner: Vec<Pos> = open.inner_positions().collect();
    rng.shuffle(&mut inner);
    for pos in inner {
        if count_groups(pos, |neighbor| *open.get(neighbor).unwrap_or(&false)) != 1 {
            open[pos] = true;
        }
    }

    let reachable = reachable_from(start, &open);
    let exit = farthest(start, &reachable, &open);

    let grid = Grid::new(config.width, config.height, |pos| {
        if pos == start {
            Tile::of(Terrain::Entrance)
        } else if pos == exit {
            Tile::of(Terrain::Exit)
        } else if open[pos] {
            Tile::of(Terrain::Floor)
        } else {
            Tile::of(Terrain::Wall)
        }
    });

    let spawns = pick_spawns(config, start, exit, &reachable, &open, rng);

    (Level::from_parts(depth, grid, start, exit), spawns)
}

/// Count contiguous groups of open tiles in the ring of six neighbors.
pub fn count_groups<F>(pos: Pos, is_open: F) -> usize
where
    F: Fn(Pos) -> bool,
{
    let ring: SmallVec<[bool; 6]> = DIRECTIONS
        .iter()
        .map(|&direction| is_open(pos + direction))
        .collect();
    (0..6).filter(|&i| !ring[i] && ring[(i + 1) % 6]).count()
}

/// Flood fill of open tiles from `start`.
fn reachable_from(start: Pos, open: &Grid<bool>) -> FxHashSet<Pos> {
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        for neighbor in pos.neighbors() {
            if *open.get(neighbor).unwrap_or(&false) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

/// The reachable open position farthest from `start` by hex distance.
///
/// Iterates in grid order, so ties resolve deterministically. Degenerates
/// to `start` itself when nothing else was carved.
fn farthest(start: Pos, reachable: &FxHashSet<Pos>, open: &Grid<bool>) -> Pos {
    let mut best = start;
    let mut best_distance = 0;
    for pos in open.positions() {
        if reachable.contains(&pos) && start.distance(pos) > best_distance {
            best = pos;
            best_distance = start.distance(pos);
        }
    }
    best
}

/// Choose distinct reachable floor tiles to spawn mobs on.
///
/// Tiles at least 4 steps from the entrance are preferred so the player is
/// not mobbed on arrival; closer tiles fill in only when the cave is too
/// cramped to honor that.
fn pick_spawns(
    config: &LevelConfig,
    start: Pos,
    exit: Pos,
    reachable: &FxHashSet<Pos>,
    open: &Grid<bool>,
    rng: &mut GameRng,
) -> Vec<Pos> {
    let mut candidates: Vec<Pos> = open
        .positions()
        .filter(|pos| reachable.contains(pos) && *pos != start && *pos != exit)
        .collect();
    rng.shuffle(&mut candidates);
    candidates.sort_by_key(|pos| start.distance(*pos) < 4);

    candidates.truncate(config.mob_count);
    candidates
}
