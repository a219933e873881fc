//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Horizontal facing of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing from the sign of a horizontal quantity. Zero maps to right.
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Player attack types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Punch,
    Kick,
    Special,
}

/// Player behavioral state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Punch,
    Kick,
    Special,
    Hurt,
}

impl PlayerState {
    pub fn attack_kind(self) -> Option<AttackKind> {
        match self {
            PlayerState::Punch => Some(AttackKind::Punch),
            PlayerState::Kick => Some(AttackKind::Kick),
            PlayerState::Special => Some(AttackKind::Special),
            _ => None,
        }
    }

    /// Whether movement input and attack starts are accepted in this state.
    pub fn accepts_input(self) -> bool {
        matches!(self, PlayerState::Idle | PlayerState::Walk)
    }
}

impl From<AttackKind> for PlayerState {
    fn from(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Punch => PlayerState::Punch,
            AttackKind::Kick => PlayerState::Kick,
            AttackKind::Special => PlayerState::Special,
        }
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Melee swarmer that rushes the player.
    Drone,
    /// Ranged caster that keeps a standoff distance.
    Injector,
    /// Two-phase melee boss.
    Boss,
}

/// Enemy presentation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle,
    Walk,
    Attack,
    Stunned,
}

/// Enemy AI intent, layered on top of [`EnemyState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Approach,
    Attack,
    Retreat,
}

/// Boss escalation phase. One-way: `One` → `Two`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    One,
    Two,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// Wave banner showing; the player may move but enemies hold.
    WaveIntro,
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl GamePhase {
    /// Terminal phases only leave via restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Encounter director lifecycle for the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// No wave has been started yet.
    #[default]
    Idle,
    /// Wave enemies have been placed and the intro banner is running.
    Spawning,
    /// Combat is underway.
    Active,
    /// Wave cleared; waiting out the delay before the next wave.
    Clearing,
    /// Final wave cleared.
    Complete,
}
