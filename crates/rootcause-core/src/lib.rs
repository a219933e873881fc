//! Core types and definitions for the ROOT_CAUSE brawler simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, difficulty profiles, state snapshots, events,
//! and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod difficulty;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
