//! Kinematic integration shared by every actor.
//!
//! position += velocity * dt, then clamp into the walkable field.

use rootcause_core::components::Body;

/// Integrate one body and clamp it to the field.
pub fn integrate(body: &mut Body, dt: f64) {
    body.position.x += body.velocity.x * dt;
    body.position.y += body.velocity.y * dt;
    body.position.clamp_to_field(body.width);
}
