//! Simulation configuration and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rootcause_core::constants::MAX_DT;
use rootcause_core::difficulty::DifficultyLevel;

use crate::systems::encounter::{default_campaign, WaveDefinition};

/// Configuration for a simulation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Difficulty used when a match starts without an explicit choice.
    pub difficulty: DifficultyLevel,
    /// Largest step a single tick may take (seconds).
    pub max_dt: f64,
    /// Custom wave roster; `None` plays the default campaign.
    pub encounter: Option<Vec<WaveDefinition>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: DifficultyLevel::default(),
            max_dt: MAX_DT,
            encounter: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_dt must be finite and within (0, 0.1], got {0}")]
    InvalidMaxDt(f64),
    #[error("encounter must contain at least one wave")]
    EmptyEncounter,
    #[error("wave {index} (`{title}`) spawns no enemies")]
    EmptyWave { index: usize, title: String },
}

impl SimConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 || self.max_dt > MAX_DT {
            return Err(ConfigError::InvalidMaxDt(self.max_dt));
        }

        if let Some(waves) = &self.encounter {
            if waves.is_empty() {
                return Err(ConfigError::EmptyEncounter);
            }
            for (index, wave) in waves.iter().enumerate() {
                if wave.total_count() == 0 {
                    return Err(ConfigError::EmptyWave {
                        index,
                        title: wave.title.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The wave list this config plays.
    pub fn waves(&self) -> Vec<WaveDefinition> {
        self.encounter.clone().unwrap_or_else(default_campaign)
    }

    /// Step limit actually applied, tolerating an unvalidated config.
    pub fn effective_max_dt(&self) -> f64 {
        if self.max_dt.is_finite() && self.max_dt > 0.0 {
            self.max_dt.min(MAX_DT)
        } else {
            MAX_DT
        }
    }
}
