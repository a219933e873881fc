//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_WIDTH, PLAY_AREA_BOTTOM, PLAY_AREA_TOP};

/// Stable identity of an actor for the lifetime of a match.
/// The player is always `ActorId(0)`; enemies count up in spawn order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: ActorId = ActorId(0);
}

/// Position on the play field. x runs left to right, y is the depth band
/// (larger y = closer to the viewer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Velocity in field units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned box described by its centre and full extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An attack's active hitbox and what it deals on contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackBox {
    pub area: Hitbox,
    pub damage: u32,
    pub is_special: bool,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of stepped ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Clamp into the walkable field for a body of the given width.
    pub fn clamp_to_field(&mut self, body_width: f64) {
        let half = body_width / 2.0;
        self.x = self.x.clamp(half, FIELD_WIDTH - half);
        self.y = self.y.clamp(PLAY_AREA_TOP, PLAY_AREA_BOTTOM);
    }

    /// Whether the position lies inside the walkable field for the given width.
    pub fn in_field(&self, body_width: f64) -> bool {
        let half = body_width / 2.0;
        (half..=FIELD_WIDTH - half).contains(&self.x)
            && (PLAY_AREA_TOP..=PLAY_AREA_BOTTOM).contains(&self.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn speed(&self) -> f64 {
        self.as_dvec2().length()
    }

    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Hitbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre-based overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        (self.x - other.x).abs() < (self.width + other.width) / 2.0
            && (self.y - other.y).abs() < (self.height + other.height) / 2.0
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
