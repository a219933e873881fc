//! Match-wide mutable state: score, combo, and global effect timers.
//!
//! Stored in `SimulationEngine`, NOT as ECS components. Mutated by the
//! combat resolver and read by the snapshot builder.

use rootcause_core::constants::*;

/// Running match state, reset at every match start.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    /// Monotonic within a match.
    pub score: u64,
    /// Consecutive hits since the combo window last elapsed.
    pub combo: u32,
    /// Time left before `combo` drops back to zero.
    pub combo_timer: f64,
    /// High-water mark of `combo`.
    pub max_combo: u32,
    /// While positive the whole simulation is frozen.
    pub hit_pause: f64,
    /// Presentation-only camera shake magnitude.
    pub screen_shake: f64,
}

impl MatchState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count a landed hit toward the combo and award `100 × combo` points.
    /// Returns the points awarded.
    pub fn register_hit(&mut self) -> u64 {
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW_SECS;
        self.max_combo = self.max_combo.max(self.combo);
        let points = HIT_SCORE_PER_COMBO * u64::from(self.combo);
        self.score += points;
        points
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }

    /// Decay the combo window; the combo resets when it runs out.
    pub fn tick_combo(&mut self, dt: f64) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= TIMER_EPSILON {
                self.combo_timer = 0.0;
                self.combo = 0;
            }
        }
    }

    /// Geometric shake decay, snapped to zero below the cutoff.
    pub fn decay_shake(&mut self) {
        if self.screen_shake > 0.0 {
            self.screen_shake *= SHAKE_DECAY;
            if self.screen_shake < SHAKE_CUTOFF {
                self.screen_shake = 0.0;
            }
        }
    }

    /// Burn `dt` of hit-pause. Returns true if the tick must be skipped.
    pub fn consume_hit_pause(&mut self, dt: f64) -> bool {
        if self.hit_pause > 0.0 {
            self.hit_pause = (self.hit_pause - dt).max(0.0);
            return true;
        }
        false
    }

    /// Request a freeze; overlapping requests keep the longest.
    pub fn add_hit_pause(&mut self, secs: f64) {
        self.hit_pause = self.hit_pause.max(secs);
    }

    /// Request a shake; overlapping requests keep the strongest.
    pub fn add_shake(&mut self, magnitude: f64) {
        self.screen_shake = self.screen_shake.max(magnitude);
    }
}
