//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, Position};

/// Discrete notifications produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The player started an attack.
    PlayerAttack { kind: AttackKind },
    /// An enemy started a melee swing or a cast.
    EnemyAttack { enemy: ActorId, archetype: Archetype },
    /// An Injector's projectile left the muzzle.
    ProjectileFired { enemy: ActorId, position: Position },
    /// Damage was applied.
    HitLanded {
        attacker: ActorId,
        target: ActorId,
        damage: u32,
        is_special: bool,
    },
    /// An enemy was defeated.
    EnemyDefeated {
        enemy: ActorId,
        archetype: Archetype,
        position: Position,
    },
    /// The boss escalated.
    BossPhaseChanged { enemy: ActorId, phase: BossPhase },
    /// The boss blinked next to the player.
    BossTeleported {
        enemy: ActorId,
        from: Position,
        to: Position,
    },
    WaveStarted {
        index: usize,
        title: String,
        subtitle: String,
    },
    WaveCleared { index: usize },
    Victory { score: u64 },
    GameOver { score: u64 },
}
