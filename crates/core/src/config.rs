//! Game configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use gravitris_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "width": 12, "height": 12 }"#).unwrap();
//! assert_eq!(config.width, 12);
//! assert_eq!(config.gravity_period_ms, 10_000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::ScoringConfig;
use crate::types::{
    Vec2, FALL_INTERVAL_MS, GRAVITY_PERIOD_MS, GRID_HEIGHT, GRID_WIDTH, ROTATION_DURATION_MS,
};

/// Smallest grid side that fits every shape and rotation at the midline
/// anchor. The I piece reaches two cells past the anchor, so a side of 4
/// (anchor 2) is one short.
pub const MIN_GRID_SIDE: u16 = 5;

/// Largest accepted grid side; keeps the field and its terminal frame sized
/// in `u16` cells.
pub const MAX_GRID_SIDE: u16 = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("grid must be at most {max}x{max}, got {width}x{height}")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Time between two gravity changes.
    pub gravity_period_ms: u32,
    /// Length of the rotation transition that follows a gravity change.
    pub rotation_duration_ms: u32,
    /// Automatic fall period.
    pub fall_interval_ms: u32,
    pub seed: u32,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            gravity_period_ms: GRAVITY_PERIOD_MS,
            rotation_duration_ms: ROTATION_DURATION_MS,
            fall_interval_ms: FALL_INTERVAL_MS,
            seed: 1,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID_SIDE,
            });
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_GRID_SIDE,
            });
        }
        if self.gravity_period_ms == 0 {
            return Err(ConfigError::ZeroDuration("gravity_period_ms"));
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("fall_interval_ms"));
        }
        Ok(())
    }

    /// Pieces spawn on the grid midline.
    pub fn spawn_anchor(&self) -> Vec2 {
        Vec2::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.rotation_duration_ms, 1000);
        assert_eq!(config.fall_interval_ms, 1000);
        assert_eq!(config.spawn_anchor(), Vec2::new(10, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "scoring": { "row_points": 50 } }"#).unwrap();
        assert_eq!(config.scoring.row_points, 50);
        assert_eq!(config.scoring.placement_points, 25);
        assert_eq!(config.width, 20);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let err = GameConfig::from_json_str(r#"{ "width": 4 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { width: 4, .. }));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = GameConfig::from_json_str(r#"{ "width": 40000, "height": 5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::GridTooLarge { width: 40_000, max: MAX_GRID_SIDE, .. }
        ));
        let edge = GameConfig {
            width: MAX_GRID_SIDE,
            height: MAX_GRID_SIDE,
            ..GameConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_period() {
        let err = GameConfig::from_json_str(r#"{ "gravity_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("gravity_period_ms")));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json_str("{ width: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
