//! Player update: timers, input, state transitions, movement, hitbox.

use hecs::{Entity, World};

use rootcause_actor_ai::player::{
    attack_hitbox, attack_spec, requested_attack, transition, walk_velocity, PlayerEvent,
};
use rootcause_core::commands::InputFrame;
use rootcause_core::components::{Body, Player};
use rootcause_core::constants::*;
use rootcause_core::enums::{AttackKind, Facing, PlayerState};
use rootcause_core::events::GameEvent;
use rootcause_core::types::Velocity;

use super::movement;

/// Advance the player by one tick.
pub fn run(
    world: &mut World,
    player: Entity,
    input: &InputFrame,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let Ok((body, state)) = world.query_one_mut::<(&mut Body, &mut Player)>(player) else {
        return;
    };

    tick_timers(state, dt);

    if state.state.accepts_input() {
        let (move_x, move_y) = input.axes();
        if move_x != 0.0 {
            body.facing = Facing::from_sign(move_x);
        }
        body.velocity = walk_velocity(move_x, move_y, PLAYER_SPEED);
        apply(
            state,
            PlayerEvent::Move {
                moving: !body.velocity.is_zero(),
            },
        );

        if let Some(kind) = requested_attack(input, state.special_cooldown) {
            start_attack(state, kind, events);
        }
    } else if state.state == PlayerState::Hurt {
        body.velocity.scale(KNOCKBACK_DAMPING);
    } else {
        body.velocity = Velocity::default();
    }

    movement::integrate(body, dt);

    state.attack_hitbox = match state.state.attack_kind() {
        Some(kind) if state.attack_timer > 0.0 => attack_hitbox(
            kind,
            body.position,
            body.facing,
            state.attack_timer,
            state.attack_duration,
        ),
        _ => None,
    };
}

fn tick_timers(state: &mut Player, dt: f64) {
    state.invincible_timer = (state.invincible_timer - dt).max(0.0);
    state.special_cooldown = (state.special_cooldown - dt).max(0.0);

    if state.attack_timer > 0.0 {
        state.attack_timer -= dt;
        if state.attack_timer <= 0.0 {
            state.attack_timer = 0.0;
            state.attack_hitbox = None;
            state.hit_targets.clear();
            apply(state, PlayerEvent::AttackExpired);
        }
    }

    if state.hurt_timer > 0.0 {
        state.hurt_timer -= dt;
        if state.hurt_timer <= 0.0 {
            state.hurt_timer = 0.0;
            apply(state, PlayerEvent::HurtExpired);
        }
    }
}

fn start_attack(state: &mut Player, kind: AttackKind, events: &mut Vec<GameEvent>) {
    if !apply(state, PlayerEvent::StartAttack(kind)) {
        return;
    }

    let spec = attack_spec(kind);
    state.attack_timer = spec.duration;
    state.attack_duration = spec.duration;
    state.attack_hitbox = None;
    state.hit_targets.clear();
    if kind == AttackKind::Special {
        state.special_cooldown = SPECIAL_COOLDOWN_SECS;
    }
    events.push(GameEvent::PlayerAttack { kind });
}

/// Feed an event through the transition table. Returns false if rejected.
pub(crate) fn apply(state: &mut Player, event: PlayerEvent) -> bool {
    match transition(state.state, event) {
        Some(next) => {
            state.state = next;
            true
        }
        None => false,
    }
}
