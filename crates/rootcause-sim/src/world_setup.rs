//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player and enemy entities with appropriate component bundles.
//! Difficulty scaling happens here and nowhere else.

use hecs::World;

use rootcause_actor_ai::profiles::get_profile;
use rootcause_core::components::*;
use rootcause_core::constants::*;
use rootcause_core::difficulty::DifficultyProfile;
use rootcause_core::enums::*;
use rootcause_core::types::{ActorId, Position, Velocity};

/// Spawn the player at the left side of the ground line.
pub fn spawn_player(world: &mut World) -> hecs::Entity {
    world.spawn((
        Body {
            position: Position::new(PLAYER_SPAWN_X, GROUND_Y),
            velocity: Velocity::default(),
            facing: Facing::Right,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        },
        Health {
            current: PLAYER_MAX_HEALTH,
            max: PLAYER_MAX_HEALTH,
        },
        Player::default(),
    ))
}

/// Spawn a single enemy with stats scaled by `difficulty`.
pub fn spawn_enemy(
    world: &mut World,
    archetype: Archetype,
    position: Position,
    id: ActorId,
    wave: usize,
    difficulty: &DifficultyProfile,
) -> hecs::Entity {
    let profile = get_profile(archetype);
    let health = difficulty.scale_health(profile.base_health);
    let speed = difficulty.scale_speed(profile.base_speed);

    let body = Body {
        position,
        velocity: Velocity::default(),
        facing: Facing::Left,
        width: profile.width,
        height: profile.height,
    };
    let enemy = Enemy {
        id,
        archetype,
        wave,
        state: EnemyState::Idle,
        ai_state: AiState::Approach,
        damage: difficulty.scale_damage(profile.base_damage),
        speed,
        attack_range: profile.attack_range,
        attack_duration: profile.attack_duration,
        attack_timer: 0.0,
        attack_cooldown: 0.0,
        stun_timer: 0.0,
        dead: false,
    };
    let health = Health {
        current: health,
        max: health,
    };

    match archetype {
        Archetype::Drone => world.spawn((body, health, enemy)),
        Archetype::Injector => world.spawn((
            body,
            health,
            enemy,
            Caster {
                preferred_range: profile.preferred_range.unwrap_or(profile.attack_range),
                pending_shot: None,
                projectiles: Vec::new(),
            },
        )),
        Archetype::Boss => world.spawn((
            body,
            health,
            enemy,
            BossCore {
                phase: BossPhase::One,
                teleport_timer: 0.0,
                // Phase two overrides the scaled speed with a flat value.
                enraged_speed: profile.enraged_speed.unwrap_or(speed),
            },
        )),
    }
}
