//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; it lives in components or is passed in.

pub mod cleanup;
pub mod combat;
pub mod encounter;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod snapshot;

use hecs::{Entity, World};

use rootcause_core::components::Enemy;

/// Every enemy entity, dead or alive, ordered by spawn id.
/// hecs iteration order is not stable across despawns, so all per-enemy
/// passes go through this.
pub fn enemies_in_spawn_order(world: &World) -> Vec<Entity> {
    let mut enemies: Vec<(u32, Entity)> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| (enemy.id.0, entity))
        .collect();
    enemies.sort_unstable_by_key(|&(id, _)| id);
    enemies.into_iter().map(|(_, entity)| entity).collect()
}
