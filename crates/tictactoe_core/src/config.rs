//! Session configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tuning for a play session, loadable from TOML.
///
/// ```toml
/// seed = 42
/// adjacent_attempts = 3
/// adjacent_chance = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Fixed RNG seed; each round reseeds from `seed + round`.
    #[serde(default)]
    seed: Option<u64>,

    /// Random draws the computer spends looking next to the player's last move.
    #[serde(default = "default_adjacent_attempts")]
    adjacent_attempts: u32,

    /// Probability that the computer looks next to the player's last move at all.
    #[serde(default = "default_adjacent_chance")]
    adjacent_chance: f64,
}

fn default_adjacent_attempts() -> u32 {
    3
}

fn default_adjacent_chance() -> f64 {
    0.5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            adjacent_attempts: default_adjacent_attempts(),
            adjacent_chance: default_adjacent_chance(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects a coin bias outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.adjacent_chance) {
            return Err(ConfigError::new(format!(
                "adjacent_chance must be within [0, 1], got {}",
                self.adjacent_chance
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.adjacent_attempts(), 3);
        assert_eq!(*config.adjacent_chance(), 0.5);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_toml("seed = 9\nadjacent_attempts = 5\n").unwrap();
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.adjacent_attempts(), 5);
        assert_eq!(*config.adjacent_chance(), 0.5);
    }

    #[test]
    fn test_rejects_bad_chance() {
        let err = GameConfig::from_toml("adjacent_chance = 1.5").unwrap_err();
        assert!(err.message.contains("adjacent_chance"));
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert!(GameConfig::from_toml("difficulty = \"hard\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1234").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.seed(), Some(1234));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }
}
