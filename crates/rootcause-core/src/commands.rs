//! Player commands and per-tick input sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Input is
//! sampled once per tick and passed directly to `tick`.

use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyLevel;

/// Match-flow actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a fresh match at the given difficulty.
    StartMatch { difficulty: DifficultyLevel },
    /// Restart at the current difficulty.
    Restart,
    Pause,
    Resume,
    /// Abandon the match and go back to the main menu.
    ReturnToMenu,
}

/// Controller state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal movement intent; the sign is what matters.
    pub move_x: f64,
    /// Depth movement intent; negative moves up the field.
    pub move_y: f64,
    /// Just-pressed flags.
    pub punch: bool,
    pub kick: bool,
    pub special: bool,
    pub pause: bool,
}

impl InputFrame {
    /// Movement axes reduced to -1, 0 or +1.
    pub fn axes(&self) -> (f64, f64) {
        (axis(self.move_x), axis(self.move_y))
    }
}

fn axis(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
