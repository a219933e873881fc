//! Simulation engine for ROOT_CAUSE.
//!
//! Owns the hecs ECS world, runs the actor, combat and encounter systems in a
//! fixed order each tick, and produces GameStateSnapshots for the frontend.

pub mod autopilot;
pub mod config;
pub mod engine;
pub mod match_state;
pub mod systems;
pub mod world_setup;

pub use autopilot::Autopilot;
pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use match_state::MatchState;
pub use rootcause_core as core;
