//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, AttackBox, Position, Velocity};

/// Spatial state shared by every actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Feet position; y doubles as the depth coordinate.
    pub position: Position,
    pub velocity: Velocity,
    pub facing: Facing,
    pub width: f64,
    pub height: f64,
}

/// Hit points. Invariant: `current <= max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

/// The player-controlled fighter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub state: PlayerState,
    /// Remaining time of the current attack (seconds).
    pub attack_timer: f64,
    /// Total duration of the current attack (seconds).
    pub attack_duration: f64,
    /// Remaining forced-hurt time.
    pub hurt_timer: f64,
    /// While positive, incoming damage is ignored.
    pub invincible_timer: f64,
    pub special_cooldown: f64,
    /// Present only during the active window of an attack.
    pub attack_hitbox: Option<AttackBox>,
    /// Enemies already damaged by the current attack instance.
    pub hit_targets: BTreeSet<ActorId>,
}

/// Shared enemy state. Archetype extras live in [`Caster`] and [`BossCore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: ActorId,
    pub archetype: Archetype,
    /// Index of the wave that spawned this enemy.
    pub wave: usize,
    pub state: EnemyState,
    pub ai_state: AiState,
    /// Difficulty-scaled at spawn, never re-scaled.
    pub damage: u32,
    pub speed: f64,
    pub attack_range: f64,
    pub attack_duration: f64,
    pub attack_timer: f64,
    pub attack_cooldown: f64,
    pub stun_timer: f64,
    /// Set once on defeat; dead enemies are skipped and later despawned.
    pub dead: bool,
}

/// Injector extras: standoff range and its outgoing projectiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Caster {
    pub preferred_range: f64,
    /// Countdown until the queued shot leaves, if a cast is underway.
    pub pending_shot: Option<f64>,
    pub projectiles: Vec<Projectile>,
}

/// A ranged shot in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    pub velocity: Velocity,
    pub damage: u32,
    /// Remaining lifetime (seconds).
    pub life: f64,
}

/// Boss extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCore {
    pub phase: BossPhase,
    /// Countdown to the next phase-two teleport.
    pub teleport_timer: f64,
    /// Phase-two speed. A flat value, not scaled by difficulty.
    pub enraged_speed: f64,
}
