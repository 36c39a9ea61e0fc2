//! Level generation and visibility integration tests.

use std::collections::{HashSet, VecDeque};

use hexrl::level::gen;
use hexrl::{Game, GameConfig, GameRng, Level, LevelConfig, Pos, Terrain};

fn generate(seed: u64, config: &LevelConfig) -> (Level, Vec<Pos>) {
    let mut rng = GameRng::new(seed).for_context("levelgen:1");
    gen::generate(config, 1, &mut rng)
}

/// Flood fill over passable tiles.
fn reachable(level: &Level, start: Pos) -> HashSet<Pos> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        for neighbor in pos.neighbors() {
            if level.passable(neighbor) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

// =============================================================================
// Generation
// =============================================================================

/// The exit and every spawn are reachable from the entrance.
#[test]
fn test_playable_region_is_connected() {
    let config = LevelConfig::default();
    for seed in 0..10 {
        let (level, spawns) = generate(seed, &config);
        let region = reachable(&level, level.entrance());

        assert!(region.contains(&level.exit()), "seed {seed}: exit cut off");
        for spawn in &spawns {
            assert!(region.contains(spawn), "seed {seed}: spawn {spawn} cut off");
        }
    }
}

/// Entrance and exit get their own terrain, at distinct positions.
#[test]
fn test_entrance_and_exit_terrain() {
    for seed in 0..10 {
        let (level, _) = generate(seed, &LevelConfig::default());
        assert_ne!(level.entrance(), level.exit());
        assert_eq!(level.terrain(level.entrance()), Some(Terrain::Entrance));
        assert_eq!(level.terrain(level.exit()), Some(Terrain::Exit));
    }
}

/// The requested number of mobs spawns on distinct floor tiles.
#[test]
fn test_spawn_placement() {
    let config = LevelConfig::default();
    let (level, spawns) = generate(3, &config);

    assert_eq!(spawns.len(), config.mob_count);
    let distinct: HashSet<Pos> = spawns.iter().copied().collect();
    assert_eq!(distinct.len(), spawns.len());
    for spawn in spawns {
        assert_eq!(level.terrain(spawn), Some(Terrain::Floor));
    }
}

/// Nothing is carved on the outer border.
#[test]
fn test_border_is_sealed() {
    let (level, _) = generate(5, &LevelConfig::default());
    for pos in level.grid().positions() {
        if pos.neighbors().any(|neighbor| !level.grid().contains(neighbor)) {
            assert_eq!(level.terrain(pos), Some(Terrain::Wall));
        }
    }
}

/// The same seed carves the same cave.
#[test]
fn test_generation_determinism() {
    let config = LevelConfig::default();
    let (a, spawns_a) = generate(11, &config);
    let (b, spawns_b) = generate(11, &config);

    assert_eq!(spawns_a, spawns_b);
    for pos in a.grid().positions() {
        assert_eq!(a.terrain(pos), b.terrain(pos));
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// A fresh session stands on a visible, remembered entrance.
#[test]
fn test_arrival_visibility() {
    let game = Game::new(42);
    let entrance = game.level().entrance();

    assert!(game.level().is_visible(entrance));
    assert!(game.level().is_remembered(entrance));
    // Everything currently visible is also remembered.
    for pos in game.level().visible() {
        assert!(game.level().is_remembered(*pos));
    }
}

/// Visibility respects walls: no visible tile hides behind opaque terrain.
#[test]
fn test_visible_tiles_are_in_line_of_sight() {
    let game = Game::new(7);
    let level = game.level();

    // The visible set contains at least the entrance's open neighborhood.
    assert!(!level.visible().is_empty());
    // And never anything outside the grid.
    for pos in level.visible() {
        assert!(level.grid().contains(*pos));
    }
}

/// A bounded sight radius caps how far the visible set reaches.
#[test]
fn test_fov_radius_bounds_sight() {
    let config = GameConfig::new()
        .with_level(LevelConfig::new(40, 26).with_mob_count(0))
        .with_fov_radius(Some(3));
    let game = Game::with_config(13, config);

    let origin = game.player_pos();
    for pos in game.level().visible() {
        assert!(origin.distance(*pos) <= 3);
    }
}
