//! Session configuration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::rules::{PileRange, MIN_PLAYABLE_PILE};

/// Who sits in the second seat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Human against the computer
    #[default]
    SinglePlayer,
    /// Two humans
    TwoPlayer,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty pile range: min {min} > max {max}")]
    EmptyPileRange { min: u32, max: u32 },

    #[error("starting pile {0} is too small, need at least 2")]
    PileTooSmall(u32),

    #[error("players must occupy seats one and two in order")]
    SeatMismatch,
}

/// Game configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: Mode,
    pub pile_range: PileRange,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn single_player() -> Self {
        Self {
            mode: Mode::SinglePlayer,
            ..Default::default()
        }
    }

    pub fn two_player() -> Self {
        Self {
            mode: Mode::TwoPlayer,
            ..Default::default()
        }
    }

    pub fn with_pile_range(mut self, min: u32, max: u32) -> Self {
        self.pile_range = PileRange::new(min, max);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let PileRange { min, max } = self.pile_range;
        if min > max {
            return Err(ConfigError::EmptyPileRange { min, max });
        }
        if min < MIN_PLAYABLE_PILE {
            return Err(ConfigError::PileTooSmall(min));
        }
        Ok(())
    }

    /// Load from JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn rng(&self) -> ChaCha8Rng {
        create_rng(self.seed)
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.mode, Mode::SinglePlayer);
        assert_eq!(config.pile_range, PileRange::new(10, 50));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = GameConfig::two_player().with_pile_range(4, 8).with_seed(3);
        assert_eq!(config.mode, Mode::TwoPlayer);
        assert_eq!(config.pile_range, PileRange::new(4, 8));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            GameConfig::default().with_pile_range(9, 3).validate(),
            Err(ConfigError::EmptyPileRange { min: 9, max: 3 })
        );
        assert_eq!(
            GameConfig::default().with_pile_range(1, 3).validate(),
            Err(ConfigError::PileTooSmall(1))
        );
        assert!(GameConfig::default().with_pile_range(2, 2).validate().is_ok());
    }

    #[test]
    fn test_config_json_partial() {
        let config: GameConfig =
            serde_json::from_str(r#"{"mode": "two_player", "pile_range": {"min": 5, "max": 6}}"#)
                .unwrap();
        assert_eq!(config.mode, Mode::TwoPlayer);
        assert_eq!(config.pile_range, PileRange::new(5, 6));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_save_load() {
        let path = std::env::temp_dir().join(format!("nim-config-{}.json", std::process::id()));
        let config = GameConfig::two_player().with_pile_range(12, 20).with_seed(8);
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
