//! Difficulty profiles: the stat multipliers selected once per match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selectable difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    #[default]
    ScriptKiddie,
    Sysadmin,
    KernelPanic,
}

/// Multiplier set applied to enemies at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    pub level: DifficultyLevel,
    pub name: &'static str,
    pub description: &'static str,
    pub health_mult: f64,
    pub damage_mult: f64,
    pub speed_mult: f64,
    pub count_mult: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected script-kiddie, sysadmin or kernel-panic)")]
pub struct ParseDifficultyError(pub String);

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::ScriptKiddie,
        DifficultyLevel::Sysadmin,
        DifficultyLevel::KernelPanic,
    ];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            DifficultyLevel::ScriptKiddie => DifficultyProfile {
                level: self,
                name: "SCRIPT KIDDIE",
                description: "Easy mode - for casual browsing",
                health_mult: 1.0,
                damage_mult: 1.0,
                speed_mult: 1.0,
                count_mult: 1.0,
            },
            DifficultyLevel::Sysadmin => DifficultyProfile {
                level: self,
                name: "SYSADMIN",
                description: "Hard mode - elevated privileges required",
                health_mult: 1.5,
                damage_mult: 1.5,
                speed_mult: 1.2,
                count_mult: 1.25,
            },
            DifficultyLevel::KernelPanic => DifficultyProfile {
                level: self,
                name: "KERNEL PANIC",
                description: "Brutal mode - total system failure",
                health_mult: 2.0,
                damage_mult: 2.0,
                speed_mult: 1.4,
                count_mult: 1.5,
            },
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

impl FromStr for DifficultyLevel {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "scriptkiddie" | "easy" => Ok(DifficultyLevel::ScriptKiddie),
            "sysadmin" | "hard" => Ok(DifficultyLevel::Sysadmin),
            "kernelpanic" | "brutal" => Ok(DifficultyLevel::KernelPanic),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl DifficultyProfile {
    pub fn scale_health(&self, base: u32) -> u32 {
        scale(base, self.health_mult)
    }

    pub fn scale_damage(&self, base: u32) -> u32 {
        scale(base, self.damage_mult)
    }

    pub fn scale_speed(&self, base: f64) -> f64 {
        (base * self.speed_mult).round()
    }

    /// Scale a wave roster count. Rounds half away from zero, so 2 × 1.25 → 3
    /// while 3 × 1.25 → 4.
    pub fn scale_count(&self, base: u32) -> u32 {
        scale(base, self.count_mult)
    }
}

fn scale(base: u32, mult: f64) -> u32 {
    (f64::from(base) * mult).round().max(0.0) as u32
}
