//! Cleanup system: removes defeated enemies once nothing of theirs is in flight.

use hecs::{Entity, World};

use rootcause_core::components::{Caster, Enemy};

/// Despawn dead enemies that have no projectiles left.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (enemy, caster)) in world.query_mut::<(&Enemy, Option<&Caster>)>() {
        let in_flight = caster.is_some_and(|caster| !caster.projectiles.is_empty());
        if enemy.dead && !in_flight {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
