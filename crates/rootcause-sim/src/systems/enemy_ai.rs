//! Enemy update: shared base gating, then the per-archetype FSM.
//!
//! Order per enemy: pending shot → boss phase check → stun → cooldown →
//! attack lock → facing → boss teleport → FSM → movement. An Injector's
//! projectiles are advanced right after its own update, even once it is dead.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use rootcause_actor_ai::fsm::{
    boss_phase_transition, evaluate, next_teleport_delay, teleport_destination, EnemyAction,
    EnemyContext,
};
use rootcause_core::components::{BossCore, Body, Caster, Enemy, Health, Player};
use rootcause_core::constants::*;
use rootcause_core::enums::{AiState, BossPhase, EnemyState, Facing};
use rootcause_core::events::GameEvent;
use rootcause_core::types::{ActorId, Position};

use super::combat::{damage_player, PlayerHit};
use super::projectiles::{self, ProjectileHit};
use super::{enemies_in_spawn_order, movement};
use crate::match_state::MatchState;

/// Update every enemy in spawn order. Returns true if a projectile
/// defeated the player.
pub fn run(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    dt: f64,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut defeated = false;

    for entity in enemies_in_spawn_order(world) {
        let Some(target) = player_position(world, player) else {
            return defeated;
        };

        let (attacker, hits) = {
            let Ok((body, health, enemy, mut caster, boss)) = world.query_one_mut::<(
                &mut Body,
                &Health,
                &mut Enemy,
                Option<&mut Caster>,
                Option<&mut BossCore>,
            )>(entity) else {
                continue;
            };

            if !enemy.dead {
                if let Some(caster) = caster.as_deref_mut() {
                    tick_pending_shot(caster, body, enemy, target, dt, events);
                }
                update_enemy(
                    body,
                    health,
                    enemy,
                    caster.as_deref_mut(),
                    boss,
                    target,
                    rng,
                    dt,
                    match_state,
                    events,
                );
            }

            let hits = caster
                .map(|caster| projectiles::advance(caster, target, dt))
                .unwrap_or_default();
            (enemy.id, hits)
        };

        for hit in hits {
            defeated |= apply_projectile_hit(world, player, attacker, hit, match_state, events);
        }
    }

    defeated
}

fn player_position(world: &World, player: Entity) -> Option<Position> {
    world
        .get::<&Body>(player)
        .ok()
        .map(|body| body.position)
}

fn apply_projectile_hit(
    world: &mut World,
    player: Entity,
    attacker: ActorId,
    hit: ProjectileHit,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Ok((body, health, state)) =
        world.query_one_mut::<(&mut Body, &mut Health, &mut Player)>(player)
    else {
        return false;
    };
    damage_player(
        body,
        health,
        state,
        hit.damage,
        hit.knockback_dir,
        attacker,
        match_state,
        events,
    ) == PlayerHit::Defeated
}

#[allow(clippy::too_many_arguments)]
fn update_enemy(
    body: &mut Body,
    health: &Health,
    enemy: &mut Enemy,
    caster: Option<&mut Caster>,
    mut boss: Option<&mut BossCore>,
    target: Position,
    rng: &mut ChaCha8Rng,
    dt: f64,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) {
    // Phase escalation is checked even while stunned, so a killing-blow
    // threshold crossing is never missed.
    if let Some(core) = boss.as_deref_mut() {
        if let Some(phase) = boss_phase_transition(health.current, health.max, core.phase) {
            core.phase = phase;
            enemy.speed = core.enraged_speed;
            match_state.add_shake(SHAKE_BOSS_PHASE);
            tracing::debug!(enemy = enemy.id.0, health = health.current, "boss enraged");
            events.push(GameEvent::BossPhaseChanged {
                enemy: enemy.id,
                phase,
            });
        }
    }

    if enemy.stun_timer > 0.0 {
        enemy.stun_timer -= dt;
        enemy.state = EnemyState::Stunned;
        body.velocity.scale(KNOCKBACK_DAMPING);
        movement::integrate(body, dt);
        if enemy.stun_timer <= 0.0 {
            enemy.stun_timer = 0.0;
            enemy.state = EnemyState::Idle;
        }
        return;
    }

    if enemy.attack_cooldown > 0.0 {
        enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
    }

    if enemy.attack_timer > 0.0 {
        enemy.attack_timer -= dt;
        body.velocity = Default::default();
        if enemy.attack_timer <= 0.0 {
            enemy.attack_timer = 0.0;
            enemy.state = EnemyState::Idle;
            enemy.ai_state = AiState::Retreat;
        }
        return;
    }

    body.facing = if target.x < body.position.x {
        Facing::Left
    } else {
        Facing::Right
    };

    if let Some(core) = boss.as_deref_mut() {
        if core.phase == BossPhase::Two {
            tick_teleport(body, enemy, core, target, rng, dt, events);
        }
    }

    let update = evaluate(
        &EnemyContext {
            archetype: enemy.archetype,
            ai_state: enemy.ai_state,
            position: body.position,
            target,
            speed: enemy.speed,
            attack_range: enemy.attack_range,
            attack_cooldown: enemy.attack_cooldown,
            boss_phase: boss.as_deref().map(|core| core.phase),
        },
        rng,
    );

    enemy.ai_state = update.ai_state;
    enemy.state = update.state;
    body.velocity = update.velocity;

    if let Some(EnemyAction::BeginAttack { cooldown }) = update.action {
        enemy.attack_timer = enemy.attack_duration;
        enemy.attack_cooldown = cooldown;
        if let Some(caster) = caster {
            caster.pending_shot = Some(PROJECTILE_FIRE_DELAY_SECS);
        }
        events.push(GameEvent::EnemyAttack {
            enemy: enemy.id,
            archetype: enemy.archetype,
        });
    }

    movement::integrate(body, dt);
}

fn tick_teleport(
    body: &mut Body,
    enemy: &mut Enemy,
    core: &mut BossCore,
    target: Position,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    core.teleport_timer -= dt;
    if core.teleport_timer > 0.0 {
        return;
    }

    let from = body.position;
    let to = teleport_destination(target, rng);
    body.position = to;
    body.velocity = Default::default();
    body.facing = if target.x < to.x {
        Facing::Left
    } else {
        Facing::Right
    };
    core.teleport_timer = next_teleport_delay(rng);
    enemy.ai_state = AiState::Approach;
    enemy.attack_cooldown = enemy.attack_cooldown.max(BOSS_TELEPORT_DISENGAGE_SECS);

    tracing::debug!(
        enemy = enemy.id.0,
        from_x = from.x,
        to_x = to.x,
        "boss teleported"
    );
    events.push(GameEvent::BossTeleported {
        enemy: enemy.id,
        from,
        to,
    });
}

/// Release a queued shot once its delay has run out.
fn tick_pending_shot(
    caster: &mut Caster,
    body: &Body,
    enemy: &Enemy,
    target: Position,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let Some(remaining) = caster.pending_shot else {
        return;
    };
    let remaining = remaining - dt;
    if remaining > TIMER_EPSILON {
        caster.pending_shot = Some(remaining);
        return;
    }

    caster.pending_shot = None;
    let position = projectiles::fire(caster, body, enemy.damage, target);
    events.push(GameEvent::ProjectileFired {
        enemy: enemy.id,
        position,
    });
}
