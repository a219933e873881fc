//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use rootcause_actor_ai::fsm::attack_progress;
use rootcause_core::components::*;
use rootcause_core::difficulty::DifficultyLevel;
use rootcause_core::enums::*;
use rootcause_core::events::GameEvent;
use rootcause_core::state::*;
use rootcause_core::types::SimTime;

use crate::match_state::MatchState;

use super::encounter::EncounterDirector;
use super::enemies_in_spawn_order;

/// Everything outside the ECS world that the snapshot reads.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: DifficultyLevel,
    pub match_state: &'a MatchState,
    pub director: &'a EncounterDirector,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    player: Option<Entity>,
    ctx: &SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let order = enemies_in_spawn_order(world);
    let player_view = player.and_then(|entity| build_player(world, entity));

    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        enemies: build_enemies(world, &order),
        projectiles: build_projectiles(world, &order),
        hud: build_hud(world, player, ctx),
        effects: EffectsView {
            screen_shake: ctx.match_state.screen_shake,
            hit_pause: ctx.match_state.hit_pause,
        },
        player: player_view,
        events,
    }
}

fn build_player(world: &World, entity: Entity) -> Option<PlayerView> {
    let mut query = world.query_one::<(&Body, &Player)>(entity).ok()?;
    let (body, state) = query.get()?;

    Some(PlayerView {
        position: body.position,
        velocity: body.velocity,
        facing: body.facing,
        state: state.state,
        attack_progress: if state.attack_timer > 0.0 {
            attack_progress(state.attack_timer, state.attack_duration)
        } else {
            0.0
        },
        attack_hitbox: state.attack_hitbox.map(|attack| attack.area),
        invincible: state.invincible_timer > 0.0,
    })
}

/// Live enemies only, in spawn order.
fn build_enemies(world: &World, order: &[Entity]) -> Vec<EnemyView> {
    order
        .iter()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&Body, &Health, &Enemy, Option<&BossCore>)>(entity)
                .ok()?;
            let (body, health, enemy, boss) = query.get()?;
            if enemy.dead {
                return None;
            }
            Some(EnemyView {
                id: enemy.id,
                archetype: enemy.archetype,
                position: body.position,
                facing: body.facing,
                state: enemy.state,
                ai_state: enemy.ai_state,
                health: health.current,
                max_health: health.max,
                attack_progress: if enemy.attack_timer > 0.0 {
                    attack_progress(enemy.attack_timer, enemy.attack_duration)
                } else {
                    0.0
                },
                boss_phase: boss.map(|core| core.phase),
            })
        })
        .collect()
}

/// Projectiles of every caster, including defeated ones.
fn build_projectiles(world: &World, order: &[Entity]) -> Vec<ProjectileView> {
    let mut views = Vec::new();
    for &entity in order {
        let Ok(mut query) = world.query_one::<(&Enemy, &Caster)>(entity) else {
            continue;
        };
        let Some((enemy, caster)) = query.get() else {
            continue;
        };
        views.extend(caster.projectiles.iter().map(|shot| ProjectileView {
            owner: enemy.id,
            position: shot.position,
            velocity: shot.velocity,
        }));
    }
    views
}

fn build_hud(world: &World, player: Option<Entity>, ctx: &SnapshotContext<'_>) -> HudView {
    let (health, max_health, special_cooldown) = player
        .and_then(|entity| {
            let mut query = world.query_one::<(&Health, &Player)>(entity).ok()?;
            let (health, state) = query.get()?;
            Some((health.current, health.max, state.special_cooldown))
        })
        .unwrap_or_default();
    let wave = ctx.director.current_wave();

    HudView {
        health,
        max_health,
        score: ctx.match_state.score,
        combo: ctx.match_state.combo,
        max_combo: ctx.match_state.max_combo,
        wave_index: ctx.director.current_index(),
        wave_total: ctx.director.wave_count(),
        wave_title: wave.map(|w| w.title.clone()).unwrap_or_default(),
        wave_subtitle: wave.map(|w| w.subtitle.clone()).unwrap_or_default(),
        wave_intro_remaining: ctx.director.intro_remaining(),
        special_cooldown,
        difficulty: ctx.difficulty.to_string(),
    }
}
