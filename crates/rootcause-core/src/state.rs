//! Game state snapshot: the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{ActorId, Hitbox, Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub hud: HudView,
    pub effects: EffectsView,
    pub events: Vec<GameEvent>,
}

/// The player's pose for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub velocity: Velocity,
    pub facing: Facing,
    pub state: PlayerState,
    /// 0.0 at attack start to 1.0 at its end; 0.0 outside attacks.
    pub attack_progress: f64,
    pub attack_hitbox: Option<Hitbox>,
    pub invincible: bool,
}

/// An enemy's pose for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: ActorId,
    pub archetype: Archetype,
    pub position: Position,
    pub facing: Facing,
    pub state: EnemyState,
    pub ai_state: AiState,
    pub health: u32,
    pub max_health: u32,
    pub attack_progress: f64,
    /// Present for the boss only.
    pub boss_phase: Option<BossPhase>,
}

/// A projectile for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: ActorId,
    pub position: Position,
    pub velocity: Velocity,
}

/// HUD fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Zero-based index of the current wave.
    pub wave_index: usize,
    pub wave_total: usize,
    pub wave_title: String,
    pub wave_subtitle: String,
    /// Remaining wave-intro banner time (seconds).
    pub wave_intro_remaining: f64,
    pub special_cooldown: f64,
    pub difficulty: String,
}

/// Presentation-only effect magnitudes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EffectsView {
    pub screen_shake: f64,
    pub hit_pause: f64,
}
