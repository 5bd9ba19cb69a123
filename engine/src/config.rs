use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::EngineError;
use crate::games::memory_match::DifficultyPreset;

pub const DEFAULT_MATCH_DELAY_MS: u64 = 350;
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 750;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub presets: Vec<DifficultyPreset>,
    pub default_difficulty: String,
    pub match_delay_ms: u64,
    pub mismatch_delay_ms: u64,
    pub symbols: Vec<char>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            presets: vec![
                DifficultyPreset::new("easy", 4, 4, 8),
                DifficultyPreset::new("medium", 4, 5, 10),
                DifficultyPreset::new("hard", 6, 6, 18),
            ],
            default_difficulty: "easy".to_string(),
            match_delay_ms: DEFAULT_MATCH_DELAY_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            symbols: vec![
                '🐙', '🦀', '🐳', '🐠', '🐬', '🐚', '🦑', '🧭', '🐢', '🦈', '🐡', '🦞', '🦐',
                '🐟', '🐋', '⚓', '🌊', '🏝',
            ],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.presets.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one difficulty preset is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for preset in &self.presets {
            if !names.insert(preset.name.as_str()) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate difficulty preset '{}'",
                    preset.name
                )));
            }
            preset.validate(self.symbols.len())?;
        }

        if self.preset(&self.default_difficulty).is_none() {
            return Err(EngineError::InvalidConfig(format!(
                "default difficulty '{}' has no preset",
                self.default_difficulty
            )));
        }

        let mut seen = HashSet::new();
        for &symbol in &self.symbols {
            if !seen.insert(symbol) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate symbol '{}' in pool",
                    symbol
                )));
            }
        }

        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&DifficultyPreset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, EngineError> {
        let config: Self = serde_yaml_ng::from_str(content)
            .map_err(|e| EngineError::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_yaml_str(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(EngineError::InvalidConfig(format!(
                "failed to read config file: {}",
                err
            ))),
        }
    }
}
