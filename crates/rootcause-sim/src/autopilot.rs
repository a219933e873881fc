//! Scripted controller that plays a match from snapshots.
//!
//! Used by the headless match runner and by the full-match tests. It chases
//! the nearest live enemy, lines up in depth slightly below it and punches
//! once the target sits inside the punch reach.

use rootcause_core::commands::InputFrame;
use rootcause_core::constants::{FIELD_WIDTH, PLAY_AREA_BOTTOM};
use rootcause_core::state::{EnemyView, GameStateSnapshot};
use rootcause_core::types::Position;

/// Preferred depth offset of the player below its target. The punch box
/// reaches up the torso, so standing slightly lower lands reliably.
const DEPTH_OFFSET: f64 = 15.0;
const DEPTH_SLACK: f64 = 8.0;
const STRIKE_DEPTH_SLACK: f64 = 12.0;
/// Horizontal distance under which the player stops walking and swings.
const STRIKE_REACH: f64 = 45.0;
/// Target behind the facing direction by at most this much still gets hit.
const BEHIND_TOLERANCE: f64 = 4.0;

/// Stateless autopilot; each call looks only at the latest snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Input for the next tick given the last snapshot.
    pub fn next_input(&self, snapshot: &GameStateSnapshot) -> InputFrame {
        let mut input = InputFrame::default();
        let Some(player) = &snapshot.player else {
            return input;
        };
        let Some(target) = nearest_enemy(player.position, &snapshot.enemies) else {
            return input;
        };

        let dx = target.position.x - player.position.x;
        let wanted_y = (target.position.y + DEPTH_OFFSET).min(PLAY_AREA_BOTTOM);
        let depth_error = wanted_y - player.position.y;
        if depth_error.abs() > DEPTH_SLACK {
            input.move_y = depth_error.signum();
        }

        let facing_ok = dx * player.facing.sign() > -BEHIND_TOLERANCE;
        if dx.abs() > STRIKE_REACH || !facing_ok {
            input.move_x = dx.signum();
        } else if depth_error.abs() <= STRIKE_DEPTH_SLACK && player.state.accepts_input() {
            input.punch = true;
        }
        input
    }
}

/// Closest enemy, preferring ones already on the field.
fn nearest_enemy(from: Position, enemies: &[EnemyView]) -> Option<&EnemyView> {
    let on_field = |enemy: &&EnemyView| (0.0..=FIELD_WIDTH).contains(&enemy.position.x);
    enemies
        .iter()
        .filter(on_field)
        .min_by(|a, b| {
            from.distance_to(&a.position)
                .total_cmp(&from.distance_to(&b.position))
        })
        .or_else(|| enemies.first())
}
