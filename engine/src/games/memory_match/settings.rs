use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::EngineError;

pub const TIMER_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    pub pair_count: usize,
}

impl DifficultyPreset {
    pub fn new(name: &str, columns: usize, rows: usize, pair_count: usize) -> Self {
        Self {
            name: name.to_string(),
            columns,
            rows,
            pair_count,
        }
    }

    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }

    pub fn validate(&self, symbol_pool_size: usize) -> Result<(), EngineError> {
        if self.pair_count == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "preset '{}': pair count must be at least 1",
                self.name
            )));
        }
        if self.columns * self.rows != self.card_count() {
            return Err(EngineError::InvalidConfig(format!(
                "preset '{}': a {}x{} board cannot hold {} pairs",
                self.name, self.columns, self.rows, self.pair_count
            )));
        }
        if self.pair_count > symbol_pool_size {
            return Err(EngineError::InvalidConfig(format!(
                "preset '{}': {} pairs exceed the {} available symbols",
                self.name, self.pair_count, symbol_pool_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    preset: DifficultyPreset,
    symbols: Vec<char>,
    match_delay: Duration,
    mismatch_delay: Duration,
}

impl SessionSettings {
    pub fn resolve(config: &EngineConfig, difficulty: &str) -> Result<Self, EngineError> {
        let preset = config.preset(difficulty).cloned().ok_or_else(|| {
            EngineError::InvalidConfig(format!("unknown difficulty '{}'", difficulty))
        })?;
        preset.validate(config.symbols.len())?;

        Ok(Self {
            symbols: config.symbols[..preset.pair_count].to_vec(),
            match_delay: Duration::from_millis(config.match_delay_ms),
            mismatch_delay: Duration::from_millis(config.mismatch_delay_ms),
            preset,
        })
    }

    pub fn preset(&self) -> &DifficultyPreset {
        &self.preset
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn match_delay(&self) -> Duration {
        self.match_delay
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(TIMER_TICK_INTERVAL_MS)
    }
}
