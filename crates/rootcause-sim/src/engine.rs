//! Simulation engine: owns the world and drives every tick.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rootcause_core::commands::{InputFrame, PlayerCommand};
use rootcause_core::difficulty::DifficultyLevel;
use rootcause_core::enums::GamePhase;
use rootcause_core::events::GameEvent;
use rootcause_core::state::GameStateSnapshot;
use rootcause_core::types::SimTime;

use crate::config::SimConfig;
use crate::match_state::MatchState;
use crate::systems;
use crate::systems::encounter::{DirectorOutcome, EncounterDirector};
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    difficulty: DifficultyLevel,
    max_dt: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    match_state: MatchState,
    director: EncounterDirector,
    player: Option<hecs::Entity>,
    /// Next enemy id; 0 is reserved for the player.
    next_actor_id: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The engine starts at the main menu with an empty world.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            difficulty: config.difficulty,
            max_dt: config.effective_max_dt(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            match_state: MatchState::default(),
            director: EncounterDirector::new(config.waves()),
            player: None,
            next_actor_id: 1,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// `dt` is clamped to `[0, max_dt]`; non-finite values count as zero.
    pub fn tick(&mut self, dt: f64, input: &InputFrame) -> GameStateSnapshot {
        self.process_commands();

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };

        match self.phase {
            GamePhase::WaveIntro | GamePhase::Playing => self.step(dt, input),
            GamePhase::Paused => {
                if input.pause {
                    self.phase = GamePhase::Playing;
                }
            }
            GamePhase::MainMenu | GamePhase::GameOver | GamePhase::Victory => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &SnapshotContext {
                time: self.time,
                phase: self.phase,
                difficulty: self.difficulty,
                match_state: &self.match_state,
                director: &self.director,
            },
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn director(&self) -> &EncounterDirector {
        &self.director
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player_entity(&self) -> Option<hecs::Entity> {
        self.player
    }

    /// Mutable world access for tests that stage exact positions.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }

    /// Spawn an extra enemy into the current wave (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: rootcause_core::enums::Archetype,
        position: rootcause_core::types::Position,
    ) -> hecs::Entity {
        let id = rootcause_core::types::ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        world_setup::spawn_enemy(
            &mut self.world,
            archetype,
            position,
            id,
            self.director.current_index(),
            &self.difficulty.profile(),
        )
    }

    /// Remove every enemy, leaving the player alone on the field (for testing).
    #[cfg(test)]
    pub fn clear_enemies(&mut self) {
        let enemies: Vec<hecs::Entity> = self
            .world
            .query_mut::<&rootcause_core::components::Enemy>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in enemies {
            let _ = self.world.despawn(entity);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch { difficulty } => {
                if matches!(
                    self.phase,
                    GamePhase::MainMenu | GamePhase::GameOver | GamePhase::Victory
                ) {
                    self.difficulty = difficulty;
                    self.start_match();
                }
            }
            PlayerCommand::Restart => {
                if self.phase != GamePhase::MainMenu {
                    self.start_match();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.world.clear();
                self.player = None;
                self.match_state.reset();
                self.director.reset();
                self.phase = GamePhase::MainMenu;
            }
        }
    }

    /// Fresh player, zeroed match state, wave 0.
    fn start_match(&mut self) {
        self.world.clear();
        self.match_state.reset();
        self.director.reset();
        self.time = SimTime::default();
        self.next_actor_id = 1;
        self.player = Some(world_setup::spawn_player(&mut self.world));

        let profile = self.difficulty.profile();
        tracing::info!(difficulty = %self.difficulty, "match started");
        self.director.start_wave(
            0,
            &mut self.world,
            &mut self.rng,
            &profile,
            &mut self.next_actor_id,
            &mut self.events,
        );
        self.phase = GamePhase::WaveIntro;
    }

    /// One simulated step in `WaveIntro` or `Playing`.
    fn step(&mut self, dt: f64, input: &InputFrame) {
        let Some(player) = self.player else {
            return;
        };
        if self.phase == GamePhase::Playing && input.pause {
            self.phase = GamePhase::Paused;
            return;
        }

        self.time.advance(dt);

        if self.match_state.consume_hit_pause(dt) {
            return;
        }
        self.match_state.tick_combo(dt);
        self.match_state.decay_shake();

        if self.phase == GamePhase::WaveIntro {
            if !self.director.tick_intro(dt) {
                systems::player::run(&mut self.world, player, input, dt, &mut self.events);
                return;
            }
            self.phase = GamePhase::Playing;
        }

        self.run_systems(player, dt, input);
    }

    /// Run all Playing-phase systems in order.
    fn run_systems(&mut self, player: hecs::Entity, dt: f64, input: &InputFrame) {
        let profile = self.difficulty.profile();

        // 1. Player
        systems::player::run(&mut self.world, player, input, dt, &mut self.events);
        // 2. Enemies in spawn order, each Injector's projectiles right after it
        let mut defeated = systems::enemy_ai::run(
            &mut self.world,
            player,
            &mut self.rng,
            dt,
            &mut self.match_state,
            &mut self.events,
        );
        // 3. Combat resolver
        defeated |= systems::combat::run(
            &mut self.world,
            player,
            &mut self.match_state,
            &mut self.events,
        );
        if defeated {
            self.enter_game_over();
        }
        // 4. Encounter director
        let outcome = self.director.run(
            &mut self.world,
            &mut self.rng,
            &profile,
            self.phase,
            dt,
            &mut self.next_actor_id,
            &mut self.events,
        );
        match outcome {
            DirectorOutcome::Continue => {}
            DirectorOutcome::WaveStarted => self.phase = GamePhase::WaveIntro,
            DirectorOutcome::Victory => self.enter_victory(),
        }
        // 5. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn enter_game_over(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = GamePhase::GameOver;
        tracing::info!(
            score = self.match_state.score,
            wave = self.director.current_index() + 1,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.match_state.score,
        });
    }

    fn enter_victory(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = GamePhase::Victory;
        tracing::info!(
            score = self.match_state.score,
            max_combo = self.match_state.max_combo,
            "victory"
        );
        self.events.push(GameEvent::Victory {
            score: self.match_state.score,
        });
    }
}
