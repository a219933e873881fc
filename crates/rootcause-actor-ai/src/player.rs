//! Player state machine.
//!
//! The behavioral state is driven by an explicit transition table
//! (`state × event → state`); timers and physics live in the simulation.

use rootcause_core::commands::InputFrame;
use rootcause_core::constants::*;
use rootcause_core::enums::{AttackKind, Facing, PlayerState};
use rootcause_core::types::{AttackBox, Hitbox, Position, Velocity};

use crate::fsm::attack_progress;

/// Events that can move the player between states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Movement input was sampled; `moving` is false for a neutral stick.
    Move { moving: bool },
    StartAttack(AttackKind),
    AttackExpired,
    Damaged,
    HurtExpired,
}

/// Look up the transition for `event` in `state`.
/// `None` means the event is rejected and the state is unchanged.
pub fn transition(state: PlayerState, event: PlayerEvent) -> Option<PlayerState> {
    use PlayerEvent::*;
    use PlayerState::*;

    match (state, event) {
        (Idle | Walk, Move { moving: true }) => Some(Walk),
        (Idle | Walk, Move { moving: false }) => Some(Idle),
        (Idle | Walk, StartAttack(kind)) => Some(kind.into()),
        (Punch | Kick | Special, AttackExpired) => Some(Idle),
        (_, Damaged) => Some(Hurt),
        (Hurt, HurtExpired) => Some(Idle),
        _ => None,
    }
}

/// Static description of one attack type.
pub struct AttackSpec {
    pub duration: f64,
    pub damage: u32,
    /// Forward offset of the box centre along the facing direction.
    pub offset_x: f64,
    /// Upward offset of the box centre from the feet.
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    pub is_special: bool,
}

pub fn attack_spec(kind: AttackKind) -> AttackSpec {
    match kind {
        AttackKind::Punch => AttackSpec {
            duration: PUNCH_DURATION_SECS,
            damage: PUNCH_DAMAGE,
            offset_x: 30.0,
            offset_y: 35.0,
            width: 30.0,
            height: 20.0,
            is_special: false,
        },
        AttackKind::Kick => AttackSpec {
            duration: KICK_DURATION_SECS,
            damage: KICK_DAMAGE,
            offset_x: 35.0,
            offset_y: 25.0,
            width: 40.0,
            height: 25.0,
            is_special: false,
        },
        // Centred on the player regardless of facing.
        AttackKind::Special => AttackSpec {
            duration: SPECIAL_DURATION_SECS,
            damage: SPECIAL_DAMAGE,
            offset_x: 0.0,
            offset_y: 30.0,
            width: 120.0,
            height: 60.0,
            is_special: true,
        },
    }
}

/// Pick the attack requested this tick. Punch wins over kick, kick over
/// special; special is ignored while its cooldown is running.
pub fn requested_attack(input: &InputFrame, special_cooldown: f64) -> Option<AttackKind> {
    if input.punch {
        Some(AttackKind::Punch)
    } else if input.kick {
        Some(AttackKind::Kick)
    } else if input.special && special_cooldown <= 0.0 {
        Some(AttackKind::Special)
    } else {
        None
    }
}

/// Eight-directional walk velocity; diagonals are normalized.
pub fn walk_velocity(move_x: f64, move_y: f64, speed: f64) -> Velocity {
    let (mut x, mut y) = (move_x, move_y);
    if x != 0.0 && y != 0.0 {
        x *= DIAGONAL_FACTOR;
        y *= DIAGONAL_FACTOR;
    }
    Velocity::new(x * speed, y * speed)
}

/// Active hitbox for an attack in progress, or `None` outside the
/// `[PLAYER_HITBOX_OPEN, PLAYER_HITBOX_CLOSE]` progress window.
pub fn attack_hitbox(
    kind: AttackKind,
    position: Position,
    facing: Facing,
    remaining: f64,
    duration: f64,
) -> Option<AttackBox> {
    let progress = attack_progress(remaining, duration);
    if !(PLAYER_HITBOX_OPEN..=PLAYER_HITBOX_CLOSE).contains(&progress) {
        return None;
    }

    let spec = attack_spec(kind);
    Some(AttackBox {
        area: Hitbox::new(
            position.x + facing.sign() * spec.offset_x,
            position.y - spec.offset_y,
            spec.width,
            spec.height,
        ),
        damage: spec.damage,
        is_special: spec.is_special,
    })
}

/// The player's own body box, centred on the torso.
pub fn body_box(position: Position) -> Hitbox {
    Hitbox::new(
        position.x,
        position.y - PLAYER_BODY_OFFSET_Y,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    )
}
