use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    error::GameError,
    map::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MIN_MAP_SIDE},
};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Layout seed. `None` derives one from the wall clock.
    pub seed: Option<u32>,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < MIN_MAP_SIDE || self.height < MIN_MAP_SIDE {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// Wall-clock milliseconds folded into the range [0, 1_000_000).
pub fn clock_seed() -> u32 {
    chrono::Utc::now().timestamp_millis().rem_euclid(1_000_000) as u32
}
