//! The game session: command dispatch and the turn loop.
//!
//! [`Game`] wires the level, the actor store, and the schedule together.
//! One call to [`Game::input`] is one dispatch: the line becomes a player
//! action with a delay, the player is pushed back into the schedule with
//! that delay, and actors are popped and resolved until control returns
//! to the player. Everything queued along the way flushes through the
//! host's sink exactly once per dispatch.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::actors::{Actor, ActorId, ActorKind, Behavior, ChaseBehavior, MobAction};
use crate::core::command::Command;
use crate::core::config::GameConfig;
use crate::core::error::SaveError;
use crate::core::rng::GameRng;
use crate::core::store::Store;
use crate::grid::{Direction, Pos};
use crate::level::{gen, Level, Terrain};
use crate::output::{OutputQueue, OutputSink};
use crate::schedule::Schedule;

/// One live game session.
///
/// Exactly one per connected player; created once at startup and driven
/// entirely through [`Game::input`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    seed: u64,
    config: GameConfig,
    rng: GameRng,
    level: Level,
    schedule: Schedule,
    actors: Store<Actor>,
    player: ActorId,
    output: OutputQueue,
    game_over: bool,
}

impl Game {
    /// Start a new session with default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    /// Start a new session.
    #[must_use]
    pub fn with_config(seed: u64, config: GameConfig) -> Self {
        // A zero mob delay would let a mob outrun every pop of the player
        // and the dispatch loop would never terminate.
        assert!(
            config.costs.mob_move_delay > 0 && config.costs.mob_attack_delay > 0,
            "mob delays must be positive"
        );

        let rng = GameRng::new(seed);
        let mut levelgen = rng.for_context("levelgen:1");
        let (level, spawns) = gen::generate(&config.level, 1, &mut levelgen);

        let mut actors = Store::new();
        let player = actors.insert(Actor::player(level.entrance(), config.player_hp));

        let mut game = Game {
            seed,
            config,
            rng,
            level,
            schedule: Schedule::new(),
            actors,
            player,
            output: OutputQueue::new(),
            game_over: false,
        };
        game.populate(spawns, &mut levelgen);
        game.queue_output("You descend into the cave.");
        info!(seed, depth = 1, "game started");
        game
    }

    /// Receive one input line and send one batch of output.
    ///
    /// The line is split at the first space into a command token and an
    /// argument. The player's action yields a delay; the player goes back
    /// into the schedule with it, and actors are popped and resolved until
    /// the player's own id comes back up. A line that fails to parse costs
    /// nothing and reports the problem in the flushed batch.
    pub fn input(&mut self, line: &str, sink: &mut dyn OutputSink) {
        debug!(line, "input");
        if self.game_over {
            self.output.flush(sink);
            return;
        }

        let delay = self.player_turn(line);
        let mut next = self.schedule.push_pop(self.player, delay);
        while let Some(id) = next {
            if id == self.player || self.game_over {
                break;
            }
            if !self.actors.contains(id) {
                // Stale entry for an actor that died before its turn.
                next = self.schedule.pop();
                continue;
            }
            let delay = self.mob_turn(id);
            next = self.schedule.push_pop(id, delay);
        }
        self.output.flush(sink);
    }

    /// Buffer a line stamped with the current schedule time.
    pub fn queue_output(&mut self, line: &str) {
        self.output.push(self.schedule.time(), line);
    }

    /// Swap in a fresh level and schedule one depth down.
    ///
    /// Mobs are per-level: everything but the player is dropped, and the
    /// new level starts with its own mobs, its own clock, and the player
    /// on its entrance.
    pub fn descend(&mut self) {
        let depth = self.level.depth() + 1;

        let mobs: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, actor)| !actor.is_player())
            .map(|(id, _)| id)
            .collect();
        for id in mobs {
            self.actors.remove(id);
        }

        let mut levelgen = self.rng.for_context(&format!("levelgen:{depth}"));
        let (level, spawns) = gen::generate(&self.config.level, depth, &mut levelgen);
        self.level = level;
        self.schedule = Schedule::new();
        self.populate(spawns, &mut levelgen);

        self.queue_output(&format!("You descend to depth {depth}."));
        info!(depth, "descended");
    }

    // === Persistence ===

    /// Encode the whole session as a save blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        bincode::serialize(self).map_err(SaveError::Encode)
    }

    /// Restore a session from a save blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        bincode::deserialize(bytes).map_err(SaveError::Decode)
    }

    // === Accessors ===

    /// The seed this session was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current dungeon depth.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.level.depth()
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The schedule clock of the current level.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.schedule.time()
    }

    #[must_use]
    pub fn player_pos(&self) -> Pos {
        self.player().pos
    }

    #[must_use]
    pub fn player_hp(&self) -> i32 {
        self.player().hp
    }

    /// Live mobs on the current level.
    #[must_use]
    pub fn mob_count(&self) -> usize {
        self.actors
            .iter()
            .filter(|(_, actor)| !actor.is_player())
            .count()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    // === Internals ===

    /// The player stays in the store for the whole session, dead or alive.
    fn player(&self) -> &Actor {
        self.actors
            .get(self.player)
            .expect("player actor is never removed")
    }

    /// Place the player on the entrance, spawn and schedule the mobs.
    fn populate(&mut self, spawns: Vec<Pos>, rng: &mut GameRng) {
        let entrance = self.level.entrance();
        self.level.place_actor(self.player, entrance);
        if let Some(player) = self.actors.get_mut(self.player) {
            player.pos = entrance;
        }

        let mob_stagger = self.config.costs.mob_move_delay.max(1);
        for pos in spawns {
            let id = self
                .actors
                .insert(Actor::mob(ActorKind::Troll, pos, self.config.mob_hp));
            self.level.place_actor(id, pos);
            // Stagger first turns so mobs do not all act in lockstep.
            self.schedule.push(id, rng.gen_range_u64(0..mob_stagger));
        }

        self.level.update_fov(entrance, self.config.fov_radius);
    }

    /// Resolve the player's command. Returns the action's delay.
    fn player_turn(&mut self, line: &str) -> u64 {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                warn!(%err, "rejected input");
                let text = err.to_string();
                self.queue_output(&text);
                return 0;
            }
        };
        debug!(?command, "player acts");
        match command {
            Command::Move(direction) => self.player_move(direction),
            Command::Attack(direction) => self.player_attack(direction),
            Command::Wait => self.config.costs.wait_delay,
            Command::Descend => self.player_descend(),
            Command::Look => {
                self.look();
                0
            }
        }
    }

    fn player_move(&mut self, direction: Direction) -> u64 {
        if let Some(player) = self.actors.get_mut(self.player) {
            player.facing = direction;
        }
        let from = self.player_pos();
        let dest = from + direction;

        // Stepping into an occupant resolves as a bump attack.
        if let Some(target) = self.level.occupant(dest) {
            return self.player_melee(target);
        }
        if !self.level.passable(dest) {
            self.queue_output("You bump into the wall.");
            return 0;
        }

        self.level.move_actor(from, dest);
        if let Some(player) = self.actors.get_mut(self.player) {
            player.pos = dest;
        }
        self.level.update_fov(dest, self.config.fov_radius);
        if self.level.terrain(dest) == Some(Terrain::Exit) {
            self.queue_output("A passage leads down from here.");
        }
        self.config.costs.move_delay
    }

    fn player_attack(&mut self, direction: Direction) -> u64 {
        if let Some(player) = self.actors.get_mut(self.player) {
            player.facing = direction;
        }
        let target_pos = self.player_pos() + direction;
        match self.level.occupant(target_pos) {
            Some(target) => self.player_melee(target),
            None => {
                self.queue_output("You swing at empty air.");
                0
            }
        }
    }

    fn player_melee(&mut self, target: ActorId) -> u64 {
        let (name, pos, died) = match self.actors.get_mut(target) {
            Some(mob) => {
                mob.hp -= self.config.player_damage;
                (mob.kind.name(), mob.pos, !mob.is_alive())
            }
            None => return 0,
        };

        self.queue_output(&format!("You hit {name}."));
        if died {
            self.actors.remove(target);
            self.level.remove_actor(pos);
            self.queue_output(&format!("{} dies.", capitalize(name)));
            debug!(%target, "mob died");
        }
        self.config.costs.attack_delay
    }

    fn player_descend(&mut self) -> u64 {
        if self.level.terrain(self.player_pos()) == Some(Terrain::Exit) {
            self.descend();
            self.config.costs.move_delay
        } else {
            self.queue_output("There is no way down here.");
            0
        }
    }

    /// Describe what the player currently sees.
    fn look(&mut self) {
        let pos = self.player_pos();
        let here = self
            .level
            .terrain(pos)
            .map_or("nothing", Terrain::description);
        self.queue_output(&format!("Depth {}. You stand on {here}.", self.level.depth()));

        let mut sightings: Vec<String> = Vec::new();
        for (id, actor) in self.actors.iter() {
            if id == self.player || !self.level.is_visible(actor.pos) {
                continue;
            }
            let name = capitalize(actor.kind.name());
            sightings.push(match (actor.pos - pos).direction() {
                Some(direction) => format!("{name} lurks to the {direction}."),
                None => format!("{name} lurks nearby."),
            });
        }
        if sightings.is_empty() {
            self.queue_output("You see no one.");
        }
        for line in sightings {
            self.queue_output(&line);
        }

        if pos != self.level.exit() && self.level.is_visible(self.level.exit()) {
            self.queue_output("You see a passage leading down.");
        }
    }

    /// Resolve one mob turn. Returns the action's delay.
    fn mob_turn(&mut self, id: ActorId) -> u64 {
        let player_pos = self.player_pos();
        let (action, mob_pos) = match self.actors.get(id) {
            Some(mob) => (ChaseBehavior.decide(&self.level, mob, player_pos), mob.pos),
            None => return self.config.costs.mob_move_delay,
        };
        debug!(%id, ?action, "mob acts");

        match action {
            MobAction::Rest => self.config.costs.mob_move_delay,
            MobAction::Approach(direction) => {
                let dest = mob_pos + direction;
                if self.level.passable(dest) && self.level.occupant(dest).is_none() {
                    self.level.move_actor(mob_pos, dest);
                    if let Some(mob) = self.actors.get_mut(id) {
                        mob.pos = dest;
                        mob.facing = direction;
                    }
                }
                self.config.costs.mob_move_delay
            }
            MobAction::Strike(_) => self.mob_strike(id),
        }
    }

    fn mob_strike(&mut self, id: ActorId) -> u64 {
        let name = self
            .actors
            .get(id)
            .map_or("something", |mob| mob.kind.name());
        let damage = self.config.mob_damage;

        let hp_after = match self.actors.get_mut(self.player) {
            Some(player) => {
                player.hp -= damage;
                player.hp
            }
            None => return self.config.costs.mob_attack_delay,
        };

        self.queue_output(&format!("{} hits you.", capitalize(name)));
        if hp_after <= 0 {
            self.game_over = true;
            self.queue_output("You die...");
            info!("player died");
        }
        self.config.costs.mob_attack_delay
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("the troll"), "The troll");
        assert_eq!(capitalize(""), "");
    }
}
