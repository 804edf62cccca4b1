//! Level configuration types.
//!
//! The engine is configured per game by a `LevelConfig`: how many pairs, the
//! attempt budget, and the image set. Configurations normally arrive from a
//! remote provider (see `crate::provider`); `fallback_config` supplies the
//! statically bundled set used when fetching is unavailable.
//!
//! Wire format matches the remote JSON body, camelCase field names:
//! `{name, level, pairs, maxAttempts, images: [{id, url, alt}]}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::CardImage;

/// Configuration validation failures. Surfaced to the user; the game does
/// not start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `pairs` must be positive.
    #[error("pair count must be positive")]
    NonPositivePairs,

    /// `maxAttempts` must be positive.
    #[error("attempt budget must be positive")]
    NonPositiveAttempts,

    /// The image set cannot cover the requested pair count.
    #[error("level needs {needed} images but configuration supplies {available}")]
    NotEnoughImages {
        /// Pair count requested.
        needed: usize,
        /// Distinct images available.
        available: usize,
    },
}

/// Difficulty level. Selects which configuration to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// All levels, in ascending difficulty.
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Lowercase label, as used in URLs and the wire `level` field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// Per-level game configuration.
///
/// ## Example
///
/// ```
/// use memory_match::core::{fallback_config, Level};
///
/// let config = fallback_config(Level::Easy);
/// assert_eq!(config.pairs, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Display name of the game.
    pub name: String,
    /// Difficulty this configuration belongs to.
    pub level: Level,
    /// Number of pairs; deck length is twice this.
    pub pairs: u32,
    /// Attempt budget for the session.
    pub max_attempts: u32,
    /// Image set; must supply at least `pairs` images.
    pub images: Vec<CardImage>,
}

impl LevelConfig {
    /// Validate the configuration against the engine's requirements.
    ///
    /// Checks positive pair count, positive attempt budget, and that the
    /// image set covers `pairs`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs == 0 {
            return Err(ConfigError::NonPositivePairs);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NonPositiveAttempts);
        }
        if self.images.len() < self.pairs as usize {
            return Err(ConfigError::NotEnoughImages {
                needed: self.pairs as usize,
                available: self.images.len(),
            });
        }
        Ok(())
    }
}

/// Statically bundled configuration for a level.
///
/// Used when the remote provider is unavailable. Placeholder images come
/// from picsum.photos with per-level deterministic seeds.
#[must_use]
pub fn fallback_config(level: Level) -> LevelConfig {
    let (pairs, max_attempts, seed_prefix, alt_prefix) = match level {
        Level::Easy => (5, 12, "easy", "Easy"),
        Level::Medium => (15, 40, "med", "Medium"),
        Level::Hard => (25, 70, "hard", "Hard"),
    };

    let images = (1..=pairs)
        .map(|i| CardImage {
            id: format!("img{i}"),
            url: format!("https://picsum.photos/seed/{seed_prefix}_{i}/400/400"),
            alt: format!("{alt_prefix} {i}"),
        })
        .collect();

    LevelConfig {
        name: "Memory Game".to_string(),
        level,
        pairs,
        max_attempts,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Easy.label(), "easy");
        assert_eq!(Level::Medium.to_string(), "medium");
        assert_eq!("hard".parse::<Level>(), Ok(Level::Hard));
        assert!("nightmare".parse::<Level>().is_err());
    }

    #[test]
    fn test_fallback_configs_valid() {
        for level in Level::ALL {
            let config = fallback_config(level);
            assert_eq!(config.level, level);
            assert!(config.validate().is_ok());
            assert_eq!(config.images.len(), config.pairs as usize);
        }
    }

    #[test]
    fn test_fallback_budgets() {
        assert_eq!(fallback_config(Level::Easy).max_attempts, 12);
        assert_eq!(fallback_config(Level::Medium).max_attempts, 40);
        assert_eq!(fallback_config(Level::Hard).max_attempts, 70);
    }

    #[test]
    fn test_validate_zero_pairs() {
        let mut config = fallback_config(Level::Easy);
        config.pairs = 0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositivePairs));
    }

    #[test]
    fn test_validate_zero_attempts() {
        let mut config = fallback_config(Level::Easy);
        config.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveAttempts));
    }

    #[test]
    fn test_validate_insufficient_images() {
        let mut config = fallback_config(Level::Easy);
        config.images.truncate(3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotEnoughImages {
                needed: 5,
                available: 3,
            })
        );
    }

    #[test]
    fn test_wire_field_names() {
        let config = fallback_config(Level::Easy);
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"maxAttempts\""));
        assert!(json.contains("\"level\":\"easy\""));

        let back: LevelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
