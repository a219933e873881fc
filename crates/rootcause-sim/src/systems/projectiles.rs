//! Injector projectiles: firing, flight, and the projectile-vs-player test.
//!
//! Projectiles are stored on their owner's [`Caster`] and keep flying after
//! the owner is defeated.

use glam::DVec2;

use rootcause_core::components::{Body, Caster, Projectile};
use rootcause_core::constants::*;
use rootcause_core::types::{Position, Velocity};

/// A projectile that reached the player this tick.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub damage: u32,
    /// Direction the player is pushed, from the projectile's travel.
    pub knockback_dir: f64,
}

/// Launch a shot from `owner` toward the player's current position.
/// Returns the muzzle position.
pub fn fire(caster: &mut Caster, owner: &Body, damage: u32, target: Position) -> Position {
    let muzzle = Position::new(
        owner.position.x + owner.facing.sign() * PROJECTILE_MUZZLE_OFFSET,
        owner.position.y - PLAYER_BODY_OFFSET_Y,
    );
    let aim = DVec2::new(target.x - owner.position.x, target.y - owner.position.y)
        .normalize_or_zero();

    caster.projectiles.push(Projectile {
        position: muzzle,
        velocity: Velocity::from_dvec2(aim * PROJECTILE_SPEED),
        damage,
        life: PROJECTILE_LIFETIME_SECS,
    });
    muzzle
}

/// Move every projectile, drop expired or escaped ones, and collect hits
/// against the player standing at `player`.
pub fn advance(caster: &mut Caster, player: Position, dt: f64) -> Vec<ProjectileHit> {
    let chest_y = player.y - PLAYER_BODY_OFFSET_Y;
    let mut hits = Vec::new();

    caster.projectiles.retain_mut(|shot| {
        shot.position.x += shot.velocity.x * dt;
        shot.position.y += shot.velocity.y * dt;
        shot.life -= dt;

        if (shot.position.x - player.x).abs() < PROJECTILE_HIT_HALF_WIDTH
            && (shot.position.y - chest_y).abs() < PROJECTILE_HIT_HALF_HEIGHT
        {
            hits.push(ProjectileHit {
                damage: shot.damage,
                knockback_dir: if shot.velocity.x < 0.0 { -1.0 } else { 1.0 },
            });
            return false;
        }

        shot.life > 0.0 && !out_of_bounds(&shot.position)
    });

    hits
}

fn out_of_bounds(position: &Position) -> bool {
    position.x < -PROJECTILE_CULL_MARGIN
        || position.x > FIELD_WIDTH + PROJECTILE_CULL_MARGIN
        || position.y < -PROJECTILE_CULL_MARGIN
        || position.y > FIELD_HEIGHT + PROJECTILE_CULL_MARGIN
}
