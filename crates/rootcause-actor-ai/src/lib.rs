//! Actor state machines for ROOT_CAUSE.
//!
//! Implements the player transition table, the per-archetype enemy AI
//! (Drone, Injector, Boss), and archetype stat profiles.

pub mod fsm;
pub mod player;
pub mod profiles;

pub use rootcause_core as core;

#[cfg(test)]
mod tests;
