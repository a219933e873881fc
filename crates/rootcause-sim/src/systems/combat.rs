//! Combat resolver: player-vs-enemy and enemy-vs-player hit detection.
//!
//! All damage funnels through [`damage_player`] and [`damage_enemy`] so the
//! invincibility, stun and death rules are applied in exactly one place.

use hecs::{Entity, World};

use rootcause_actor_ai::fsm::{attack_progress, melee_hitbox};
use rootcause_actor_ai::player::{body_box, transition, PlayerEvent};
use rootcause_actor_ai::profiles::get_profile;
use rootcause_core::components::{Body, Enemy, Health, Player};
use rootcause_core::constants::*;
use rootcause_core::enums::EnemyState;
use rootcause_core::events::GameEvent;
use rootcause_core::types::{ActorId, AttackBox, Hitbox};

use crate::match_state::MatchState;

use super::enemies_in_spawn_order;

/// Result of applying damage to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Invincibility swallowed the hit.
    Ignored,
    Damaged,
    /// Health reached zero.
    Defeated,
}

/// Run both resolver passes. Returns true if the player was defeated.
pub fn run(
    world: &mut World,
    player: Entity,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let order = enemies_in_spawn_order(world);
    resolve_player_attack(world, player, &order, match_state, events);
    resolve_enemy_attacks(world, player, &order, match_state, events)
}

/// Pass 1: the player's active hitbox against every live enemy.
fn resolve_player_attack(
    world: &mut World,
    player: Entity,
    order: &[Entity],
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) {
    let Ok((body, state)) = world.query_one_mut::<(&Body, &Player)>(player) else {
        return;
    };
    let Some(attack) = state.attack_hitbox else {
        return;
    };
    let origin_y = body.position.y;
    let knockback_dir = body.facing.sign();
    let already_hit = state.hit_targets.clone();

    let mut landed: Vec<ActorId> = Vec::new();
    for &entity in order {
        let Ok((body, health, enemy)) =
            world.query_one_mut::<(&mut Body, &mut Health, &mut Enemy)>(entity)
        else {
            continue;
        };
        if enemy.dead || already_hit.contains(&enemy.id) {
            continue;
        }

        let target = Hitbox::new(body.position.x, body.position.y, body.width, body.height);
        if !attack.area.overlaps(&target)
            || (origin_y - body.position.y).abs() >= DEPTH_TOLERANCE
        {
            continue;
        }

        landed.push(enemy.id);
        damage_enemy(
            body,
            health,
            enemy,
            &attack,
            knockback_dir,
            match_state,
            events,
        );
    }

    if landed.is_empty() {
        return;
    }
    if let Ok(state) = world.query_one_mut::<&mut Player>(player) {
        state.hit_targets.extend(landed);
    }
}

/// Pass 2: every live melee enemy's active hitbox against the player.
fn resolve_enemy_attacks(
    world: &mut World,
    player: Entity,
    order: &[Entity],
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let swings: Vec<(ActorId, AttackBox, f64, f64)> = order
        .iter()
        .filter_map(|&entity| {
            let mut query = world.query_one::<(&Body, &Enemy)>(entity).ok()?;
            let (body, enemy) = query.get()?;
            if enemy.dead || enemy.state != EnemyState::Attack {
                return None;
            }
            let progress = attack_progress(enemy.attack_timer, enemy.attack_duration);
            let attack = melee_hitbox(
                enemy.archetype,
                body.position,
                body.facing,
                enemy.damage,
                progress,
            )?;
            Some((enemy.id, attack, body.position.y, body.facing.sign()))
        })
        .collect();

    let mut defeated = false;
    for (attacker, attack, enemy_y, knockback_dir) in swings {
        let Ok((body, health, state)) =
            world.query_one_mut::<(&mut Body, &mut Health, &mut Player)>(player)
        else {
            break;
        };
        if !attack.area.overlaps(&body_box(body.position))
            || (body.position.y - enemy_y).abs() >= DEPTH_TOLERANCE
        {
            continue;
        }

        let outcome = damage_player(
            body,
            health,
            state,
            attack.damage,
            knockback_dir,
            attacker,
            match_state,
            events,
        );
        defeated |= outcome == PlayerHit::Defeated;
    }
    defeated
}

/// The player's single damage entry point.
///
/// A no-op while invincible: neither health nor any timer changes.
#[allow(clippy::too_many_arguments)]
pub fn damage_player(
    body: &mut Body,
    health: &mut Health,
    state: &mut Player,
    amount: u32,
    knockback_dir: f64,
    attacker: ActorId,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) -> PlayerHit {
    if state.invincible_timer > 0.0 || health.current == 0 {
        return PlayerHit::Ignored;
    }

    health.current = health.current.saturating_sub(amount);
    state.invincible_timer = PLAYER_INVINCIBLE_SECS;
    state.hurt_timer = PLAYER_HURT_SECS;
    if let Some(next) = transition(state.state, PlayerEvent::Damaged) {
        state.state = next;
    }
    state.attack_timer = 0.0;
    state.attack_hitbox = None;
    state.hit_targets.clear();
    body.velocity.x = knockback_dir * PLAYER_KNOCKBACK_SPEED;
    match_state.add_shake(SHAKE_PLAYER_HURT);

    tracing::trace!(
        attacker = attacker.0,
        damage = amount,
        health = health.current,
        "player hit"
    );
    events.push(GameEvent::HitLanded {
        attacker,
        target: ActorId::PLAYER,
        damage: amount,
        is_special: false,
    });

    if health.current == 0 {
        PlayerHit::Defeated
    } else {
        PlayerHit::Damaged
    }
}

/// An enemy's single damage entry point. Applies stun, knockback and combo
/// scoring, and runs the one-time defeat transition when health hits zero.
pub fn damage_enemy(
    body: &mut Body,
    health: &mut Health,
    enemy: &mut Enemy,
    attack: &AttackBox,
    knockback_dir: f64,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) {
    if enemy.dead {
        return;
    }

    health.current = health.current.saturating_sub(attack.damage);
    enemy.stun_timer = ENEMY_STUN_SECS;
    enemy.state = EnemyState::Stunned;
    // Getting hit interrupts a swing in progress.
    enemy.attack_timer = 0.0;
    body.velocity.x = knockback_dir * ENEMY_KNOCKBACK_SPEED;

    let points = match_state.register_hit();
    if attack.is_special {
        match_state.add_shake(SHAKE_SPECIAL);
        match_state.add_hit_pause(HIT_PAUSE_SPECIAL_SECS);
    } else {
        match_state.add_hit_pause(HIT_PAUSE_NORMAL_SECS);
    }

    tracing::trace!(
        enemy = enemy.id.0,
        damage = attack.damage,
        health = health.current,
        combo = match_state.combo,
        points,
        "enemy hit"
    );
    events.push(GameEvent::HitLanded {
        attacker: ActorId::PLAYER,
        target: enemy.id,
        damage: attack.damage,
        is_special: attack.is_special,
    });

    if health.current == 0 {
        defeat_enemy(body, enemy, match_state, events);
    }
}

fn defeat_enemy(
    body: &Body,
    enemy: &mut Enemy,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) {
    if enemy.dead {
        return;
    }
    enemy.dead = true;

    match_state.award(get_profile(enemy.archetype).defeat_bonus);
    match_state.add_shake(SHAKE_DEFEAT);
    match_state.add_hit_pause(HIT_PAUSE_DEFEAT_SECS);

    tracing::debug!(
        enemy = enemy.id.0,
        archetype = ?enemy.archetype,
        score = match_state.score,
        "enemy defeated"
    );
    events.push(GameEvent::EnemyDefeated {
        enemy: enemy.id,
        archetype: enemy.archetype,
        position: body.position,
    });
}
