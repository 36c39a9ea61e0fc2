//! Game configuration types.
//!
//! The engine hardcodes no map dimensions, action costs, or stat lines.
//! Hosts provide a [`GameConfig`] at startup; the defaults give a playable
//! cave with classic costs.

use serde::{Deserialize, Serialize};

/// Configuration for generated levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Grid width in columns.
    pub width: usize,

    /// Grid height in rows.
    pub height: usize,

    /// Mobs placed per level.
    pub mob_count: usize,
}

impl LevelConfig {
    /// Create a level configuration.
    ///
    /// Dimensions must leave room for an interior: the border stays solid
    /// wall, so anything smaller than 4x4 cannot be carved.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 4 && height >= 4, "level must be at least 4x4");
        Self {
            width,
            height,
            mob_count: 0,
        }
    }

    /// Set the number of mobs per level.
    #[must_use]
    pub fn with_mob_count(mut self, count: usize) -> Self {
        self.mob_count = count;
        self
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 26,
            mob_count: 6,
        }
    }
}

/// Per-action delays, in schedule time units.
///
/// A delay is the span until the acting entity's next turn is due.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costs {
    /// Player step to an adjacent tile.
    pub move_delay: u64,

    /// Player resting in place.
    pub wait_delay: u64,

    /// Player melee attack.
    pub attack_delay: u64,

    /// Mob step to an adjacent tile.
    pub mob_move_delay: u64,

    /// Mob melee attack.
    pub mob_attack_delay: u64,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            move_delay: 12,
            wait_delay: 6,
            attack_delay: 12,
            mob_move_delay: 12,
            mob_attack_delay: 12,
        }
    }
}

/// Complete game configuration.
///
/// Hosts provide this at startup to configure the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Level generation parameters.
    pub level: LevelConfig,

    /// Action delays.
    pub costs: Costs,

    /// Player starting (and maximum) hit points.
    pub player_hp: i32,

    /// Mob starting hit points.
    pub mob_hp: i32,

    /// Damage per player melee hit.
    pub player_damage: i32,

    /// Damage per mob melee hit.
    pub mob_damage: i32,

    /// Sight radius. `None` is bounded by walls only.
    pub fov_radius: Option<u32>,
}

impl GameConfig {
    /// Configuration with defaults for everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set level generation parameters.
    #[must_use]
    pub fn with_level(mut self, level: LevelConfig) -> Self {
        self.level = level;
        self
    }

    /// Set action delays.
    #[must_use]
    pub fn with_costs(mut self, costs: Costs) -> Self {
        self.costs = costs;
        self
    }

    /// Set player hit points.
    #[must_use]
    pub fn with_player_hp(mut self, hp: i32) -> Self {
        assert!(hp > 0, "player hp must be positive");
        self.player_hp = hp;
        self
    }

    /// Set mob hit points.
    #[must_use]
    pub fn with_mob_hp(mut self, hp: i32) -> Self {
        assert!(hp > 0, "mob hp must be positive");
        self.mob_hp = hp;
        self
    }

    /// Set the sight radius.
    #[must_use]
    pub fn with_fov_radius(mut self, radius: Option<u32>) -> Self {
        self.fov_radius = radius;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: LevelConfig::default(),
            costs: Costs::default(),
            player_hp: 20,
            mob_hp: 6,
            player_damage: 3,
            mob_damage: 2,
            fov_radius: None,
        }
    }
}
