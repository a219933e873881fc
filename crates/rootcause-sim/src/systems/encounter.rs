//! Encounter director: spawns waves, detects clears, and declares victory.
//!
//! Runs as a per-tick state machine over the ordered wave list:
//! `Spawning → Active → Clearing → (next wave | Complete)`. Delays are plain
//! countdowns decremented inside the tick, never out-of-band timers.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use rootcause_core::components::Enemy;
use rootcause_core::constants::*;
use rootcause_core::difficulty::DifficultyProfile;
use rootcause_core::enums::{Archetype, EncounterPhase, GamePhase};
use rootcause_core::events::GameEvent;
use rootcause_core::types::{ActorId, Position};

use crate::world_setup;

/// One `{archetype, count}` pair of a wave's composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub archetype: Archetype,
    pub count: u32,
}

/// A single wave definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub title: String,
    pub subtitle: String,
    pub roster: Vec<RosterEntry>,
}

impl WaveDefinition {
    fn new(title: &str, subtitle: &str, roster: &[(Archetype, u32)]) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            roster: roster
                .iter()
                .map(|&(archetype, count)| RosterEntry { archetype, count })
                .collect(),
        }
    }

    /// Unscaled number of enemies in this wave.
    pub fn total_count(&self) -> u32 {
        self.roster.iter().map(|entry| entry.count).sum()
    }
}

/// Default four-wave campaign with escalating composition.
pub fn default_campaign() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition::new("WAVE 1", "INCOMING PACKETS", &[(Archetype::Drone, 4)]),
        WaveDefinition::new(
            "WAVE 2",
            "MALICIOUS QUERIES DETECTED",
            &[(Archetype::Drone, 3), (Archetype::Injector, 2)],
        ),
        WaveDefinition::new(
            "WAVE 3",
            "BREACH ATTEMPT IN PROGRESS",
            &[(Archetype::Drone, 4), (Archetype::Injector, 3)],
        ),
        WaveDefinition::new(
            "FINAL WAVE",
            "ROOT_CAUSE LEADER DETECTED",
            &[(Archetype::Boss, 1)],
        ),
    ]
}

/// What the director decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorOutcome {
    /// Nothing changed the match phase.
    Continue,
    /// A new wave was spawned and its intro is running.
    WaveStarted,
    /// The final wave was cleared.
    Victory,
}

/// Sequences the waves of one match.
#[derive(Debug, Clone)]
pub struct EncounterDirector {
    waves: Vec<WaveDefinition>,
    current: usize,
    phase: EncounterPhase,
    intro_timer: f64,
    advance_timer: f64,
}

impl EncounterDirector {
    pub fn new(waves: Vec<WaveDefinition>) -> Self {
        Self {
            waves,
            current: 0,
            phase: EncounterPhase::Idle,
            intro_timer: 0.0,
            advance_timer: 0.0,
        }
    }

    /// Forget all progress; the next `start_wave(0)` begins a fresh run.
    pub fn reset(&mut self) {
        self.current = 0;
        self.phase = EncounterPhase::Idle;
        self.intro_timer = 0.0;
        self.advance_timer = 0.0;
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn current_wave(&self) -> Option<&WaveDefinition> {
        self.waves.get(self.current)
    }

    pub fn intro_remaining(&self) -> f64 {
        if self.phase == EncounterPhase::Spawning {
            self.intro_timer
        } else {
            0.0
        }
    }

    pub fn is_final_wave(&self) -> bool {
        self.current + 1 >= self.waves.len()
    }

    /// Spawn wave `index` and start its intro. Any enemies left over from
    /// earlier waves are removed first.
    pub fn start_wave(
        &mut self,
        index: usize,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        difficulty: &DifficultyProfile,
        next_actor_id: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(wave) = self.waves.get(index) else {
            return;
        };

        let leftovers: Vec<hecs::Entity> = world
            .query_mut::<&Enemy>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in leftovers {
            let _ = world.despawn(entity);
        }

        let mut spawned = 0usize;
        let mut bosses = 0usize;
        for entry in &wave.roster {
            let count = match entry.archetype {
                Archetype::Boss => entry.count,
                Archetype::Drone | Archetype::Injector => difficulty.scale_count(entry.count),
            };

            for _ in 0..count {
                let position = match entry.archetype {
                    Archetype::Boss => {
                        let pos = boss_spawn_position(bosses);
                        bosses += 1;
                        pos
                    }
                    Archetype::Drone | Archetype::Injector => {
                        let pos = spawn_position(spawned, rng);
                        spawned += 1;
                        pos
                    }
                };
                let id = ActorId(*next_actor_id);
                *next_actor_id += 1;
                world_setup::spawn_enemy(world, entry.archetype, position, id, index, difficulty);
            }
        }

        self.current = index;
        self.phase = EncounterPhase::Spawning;
        self.intro_timer = WAVE_INTRO_SECS;
        self.advance_timer = 0.0;

        tracing::info!(
            wave = index + 1,
            title = %wave.title,
            enemies = spawned + bosses,
            "wave started"
        );
        events.push(GameEvent::WaveStarted {
            index,
            title: wave.title.clone(),
            subtitle: wave.subtitle.clone(),
        });
    }

    /// Count down the wave intro. Returns true on the tick it finishes.
    pub fn tick_intro(&mut self, dt: f64) -> bool {
        if self.phase != EncounterPhase::Spawning {
            return false;
        }
        self.intro_timer -= dt;
        if self.intro_timer <= 0.0 {
            self.intro_timer = 0.0;
            self.phase = EncounterPhase::Active;
            return true;
        }
        false
    }

    /// Per-tick bookkeeping while the match is in active play.
    ///
    /// `game_phase` is re-checked before any wave advance so a countdown left
    /// over from a finished or reset match never fires.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        difficulty: &DifficultyProfile,
        game_phase: GamePhase,
        dt: f64,
        next_actor_id: &mut u32,
        events: &mut Vec<GameEvent>,
    ) -> DirectorOutcome {
        if game_phase != GamePhase::Playing {
            return DirectorOutcome::Continue;
        }

        match self.phase {
            EncounterPhase::Active => {
                if live_enemies(world, self.current) > 0 {
                    return DirectorOutcome::Continue;
                }

                events.push(GameEvent::WaveCleared {
                    index: self.current,
                });
                if self.is_final_wave() {
                    self.phase = EncounterPhase::Complete;
                    tracing::info!(wave = self.current + 1, "final wave cleared");
                    DirectorOutcome::Victory
                } else {
                    self.phase = EncounterPhase::Clearing;
                    self.advance_timer = WAVE_ADVANCE_DELAY_SECS;
                    tracing::info!(wave = self.current + 1, "wave cleared");
                    DirectorOutcome::Continue
                }
            }
            EncounterPhase::Clearing => {
                self.advance_timer -= dt;
                if self.advance_timer > 0.0 {
                    return DirectorOutcome::Continue;
                }
                let next = self.current + 1;
                self.start_wave(next, world, rng, difficulty, next_actor_id, events);
                DirectorOutcome::WaveStarted
            }
            EncounterPhase::Idle | EncounterPhase::Spawning | EncounterPhase::Complete => {
                DirectorOutcome::Continue
            }
        }
    }
}

/// Enemies of `wave` that are still alive.
pub fn live_enemies(world: &World, wave: usize) -> usize {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.wave == wave && !enemy.dead)
        .count()
}

/// Off-field spawn point for the `n`th regular enemy of a wave. Sides
/// alternate left/right; each side's queue extends further outward.
fn spawn_position(n: usize, rng: &mut ChaCha8Rng) -> Position {
    let slot = (n / 2) as f64 * SPAWN_STAGGER;
    let x = if n % 2 == 0 {
        -SPAWN_MARGIN - slot
    } else {
        FIELD_WIDTH + SPAWN_MARGIN + slot
    };
    let y = rng.gen_range(PLAY_AREA_TOP..=PLAY_AREA_BOTTOM);
    Position::new(x, y)
}

fn boss_spawn_position(n: usize) -> Position {
    Position::new(
        FIELD_WIDTH + BOSS_SPAWN_MARGIN + n as f64 * SPAWN_STAGGER,
        GROUND_Y,
    )
}
