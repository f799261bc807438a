use std::fs;

use depth_core::types::pubkey_serde;
use depth_core::{
    TickBounds, DEFAULT_MAX_STEPS, DEFAULT_WINDOW_RADIUS, MAX_TICK_INDEX, MIN_TICK_INDEX,
    WHIRLPOOL_PROGRAM_ID,
};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::error::{InspectorError, InspectorResult};

/// Largest accepted window radius (tick arrays on each side of the current one)
pub const MAX_WINDOW_RADIUS: i32 = 16;

/// Inspector configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InspectorConfig {
    /// Maximum number of per-step records in each direction
    pub max_steps: usize,

    /// Tick arrays on each side of the current one in the bucket window
    pub window_radius: i32,

    /// Lowest tick a traversal may reach
    pub min_tick_bound: i32,

    /// Highest tick a traversal may reach
    pub max_tick_bound: i32,

    /// Whirlpool program used to derive tick array addresses
    #[serde(with = "pubkey_serde")]
    pub program_id: Pubkey,
}

impl InspectorConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> InspectorResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InspectorError::IoError(format!("Failed to read config file {}: {}", path, e))
        })?;

        let config: InspectorConfig = toml::from_str(&content).map_err(|e| {
            InspectorError::SerializationError(format!(
                "Failed to parse config file {}: {}",
                path, e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> InspectorResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            InspectorError::IoError(format!("Failed to write config file {}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> InspectorResult<()> {
        if self.max_steps == 0 {
            return Err(InspectorError::InvalidConfig(
                "max_steps must be greater than 0".to_string(),
            ));
        }

        if !(0..=MAX_WINDOW_RADIUS).contains(&self.window_radius) {
            return Err(InspectorError::InvalidConfig(format!(
                "window_radius {} must be between 0 and {}",
                self.window_radius, MAX_WINDOW_RADIUS
            )));
        }

        if self.min_tick_bound < MIN_TICK_INDEX || self.max_tick_bound > MAX_TICK_INDEX {
            return Err(InspectorError::InvalidConfig(format!(
                "tick bounds must lie within [{}, {}]",
                MIN_TICK_INDEX, MAX_TICK_INDEX
            )));
        }

        self.tick_bounds()
            .validate()
            .map_err(|e| InspectorError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Tick bounds handed to the bucket simulator
    pub fn tick_bounds(&self) -> TickBounds {
        TickBounds {
            min_tick_index: self.min_tick_bound,
            max_tick_index: self.max_tick_bound,
        }
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            window_radius: DEFAULT_WINDOW_RADIUS,
            min_tick_bound: MIN_TICK_INDEX,
            max_tick_bound: MAX_TICK_INDEX,
            program_id: WHIRLPOOL_PROGRAM_ID,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> InspectorResult<()> {
    InspectorConfig::default().save(path)
}
