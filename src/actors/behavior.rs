//! Mob decision making.
//!
//! The behavior seam keeps mob senses and tactics out of the dispatch
//! loop: the game hands a behavior the level, the acting mob, and the
//! player's position, and gets back a [`MobAction`] to resolve.

use smallvec::SmallVec;

use super::Actor;
use crate::grid::{Direction, Pos, DIRECTIONS};
use crate::level::Level;

/// What a mob wants to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MobAction {
    /// Step one tile in a direction.
    Approach(Direction),
    /// Melee the adjacent player.
    Strike(Direction),
    /// Stand and do nothing this turn.
    Rest,
}

/// Decides a mob's next action.
pub trait Behavior {
    fn decide(&self, level: &Level, mob: &Actor, player_pos: Pos) -> MobAction;
}

/// Default mob tactics: strike when adjacent, close in while the player
/// is in sight, rest otherwise.
///
/// Sight is the player's own shadowcast field of view read in reverse:
/// a mob pursues only while the player sees it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChaseBehavior;

impl Behavior for ChaseBehavior {
    fn decide(&self, level: &Level, mob: &Actor, player_pos: Pos) -> MobAction {
        let to_player = player_pos - mob.pos;

        if to_player.distance() == 1 {
            if let Some(direction) = to_player.direction() {
                return MobAction::Strike(direction);
            }
        }

        if !level.is_visible(mob.pos) {
            return MobAction::Rest;
        }

        // Candidate steps that actually close the gap, nearest first.
        // Ties resolve in DIRECTIONS order, which keeps replays stable.
        let mut candidates: SmallVec<[(u32, Direction); 6]> = SmallVec::new();
        for direction in DIRECTIONS {
            let dest = mob.pos + direction;
            if !level.passable(dest) || level.occupant(dest).is_some() {
                continue;
            }
            candidates.push((dest.distance(player_pos), direction));
        }

        match candidates.iter().min_by_key(|(distance, _)| *distance) {
            Some(&(distance, direction)) if distance < to_player.distance() => {
                MobAction::Approach(direction)
            }
            _ => MobAction::Rest,
        }
    }
}
