//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype base stats and AI tuning. Stats here are the
//! unscaled values; difficulty multipliers are applied once at spawn.

use rootcause_core::constants::{BOSS_DEFEAT_BONUS, DEFEAT_BONUS};
use rootcause_core::enums::Archetype;

/// Melee hitbox geometry relative to the attacker's feet.
pub struct MeleeReach {
    /// Forward offset along the facing direction.
    pub offset_x: f64,
    /// Upward offset from the feet.
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Behavioral profile for an enemy archetype.
pub struct ArchetypeProfile {
    pub base_health: u32,
    pub base_damage: u32,
    pub base_speed: f64,
    pub attack_range: f64,
    pub attack_duration: f64,
    pub width: f64,
    pub height: f64,
    /// Standoff distance for ranged archetypes.
    pub preferred_range: Option<f64>,
    /// `None` for archetypes that attack with projectiles instead.
    pub melee: Option<MeleeReach>,
    /// Fixed part of the post-attack cooldown (seconds).
    pub cooldown_base: f64,
    /// Uniform random extra on top of `cooldown_base`.
    pub cooldown_jitter: f64,
    /// Fraction of speed used while backing off.
    pub retreat_speed_factor: f64,
    /// Distance beyond which a retreating enemy re-engages.
    pub reengage_distance: f64,
    /// Per-tick chance of re-engaging early.
    pub reengage_chance: f64,
    /// Phase-two speed (boss only); replaces the scaled speed as is.
    pub enraged_speed: Option<f64>,
    /// Flat score bonus on defeat, on top of per-hit scoring.
    pub defeat_bonus: u64,
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: Archetype) -> ArchetypeProfile {
    match archetype {
        Archetype::Drone => ArchetypeProfile {
            base_health: 20,
            base_damage: 5,
            base_speed: 90.0,
            attack_range: 45.0,
            attack_duration: 0.4,
            width: 40.0,
            height: 56.0,
            preferred_range: None,
            melee: Some(MeleeReach {
                offset_x: 30.0,
                offset_y: 25.0,
                width: 30.0,
                height: 30.0,
            }),
            cooldown_base: 1.0,
            cooldown_jitter: 1.0,
            retreat_speed_factor: 0.5,
            reengage_distance: 150.0,
            reengage_chance: 0.02,
            enraged_speed: None,
            defeat_bonus: DEFEAT_BONUS,
        },
        Archetype::Injector => ArchetypeProfile {
            base_health: 30,
            base_damage: 10,
            base_speed: 60.0,
            attack_range: 250.0,
            attack_duration: 0.6,
            width: 40.0,
            height: 56.0,
            preferred_range: Some(200.0),
            melee: None,
            cooldown_base: 1.5,
            cooldown_jitter: 1.0,
            retreat_speed_factor: 0.8,
            reengage_distance: 200.0,
            reengage_chance: 0.03,
            enraged_speed: None,
            defeat_bonus: DEFEAT_BONUS,
        },
        Archetype::Boss => ArchetypeProfile {
            base_health: 200,
            base_damage: 20,
            base_speed: 70.0,
            attack_range: 60.0,
            attack_duration: 0.6,
            width: 60.0,
            height: 80.0,
            preferred_range: None,
            melee: Some(MeleeReach {
                offset_x: 40.0,
                offset_y: 35.0,
                width: 50.0,
                height: 50.0,
            }),
            // Phase-dependent; see `fsm::boss_cooldown`.
            cooldown_base: 1.5,
            cooldown_jitter: 0.0,
            retreat_speed_factor: 0.3,
            reengage_distance: 120.0,
            reengage_chance: 0.05,
            enraged_speed: Some(100.0),
            defeat_bonus: DEFEAT_BONUS + BOSS_DEFEAT_BONUS,
        },
    }
}
