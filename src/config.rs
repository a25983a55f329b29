//! User configuration and preferences

use crate::engine::{BadgeConfig, ExitConfig, GestureThresholds, StackConfig};
use crate::error::{Result, SwipeDeckError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunable interaction constants, persisted in the user config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Max movement (px) still considered a tap
    pub tap_max_movement_px: f32,
    /// Max press duration (ms) still considered a tap
    pub tap_max_duration_ms: u64,
    /// Delay (ms) between a commit and the card leaving the stack
    pub removal_delay_ms: u64,
    pub exit_distance_px: f32,
    pub exit_duration_ms: u64,
    pub badge_deadband_px: f32,
    pub badge_ramp_px: f32,
    /// Release distance (px) at which the drag library reports a swipe
    pub commit_threshold_px: f32,
    /// Size of one terminal cell in px, used to convert mouse positions
    pub cell_width_px: f32,
    pub cell_height_px: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tap_max_movement_px: 10.0,
            tap_max_duration_ms: 300,
            removal_delay_ms: 600,
            exit_distance_px: 1200.0,
            exit_duration_ms: 600,
            badge_deadband_px: 8.0,
            badge_ramp_px: 28.0,
            commit_threshold_px: 120.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

impl EngineConfig {
    pub fn stack_config(&self) -> StackConfig {
        StackConfig {
            gesture: GestureThresholds {
                tap_max_movement_px: self.tap_max_movement_px,
                tap_max_duration: Duration::from_millis(self.tap_max_duration_ms),
            },
            badge: BadgeConfig {
                deadband_px: self.badge_deadband_px,
                ramp_px: self.badge_ramp_px,
            },
            exit: ExitConfig {
                distance_px: self.exit_distance_px,
                duration: Duration::from_millis(self.exit_duration_ms),
            },
            removal_delay: Duration::from_millis(self.removal_delay_ms),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    #[serde(default)]
    pub welcome_shown: bool,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl UserConfig {
    /// Get the config directory (~/.config/swipedeck)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swipedeck"))
    }

    /// Get the config file path (~/.config/swipedeck/config.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load config from file, or create default if doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            SwipeDeckError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            SwipeDeckError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            SwipeDeckError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            SwipeDeckError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SwipeDeckError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SwipeDeckError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            SwipeDeckError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
        assert_eq!(config.engine.tap_max_movement_px, 10.0);
        assert_eq!(config.engine.removal_delay_ms, 600);
    }

    #[test]
    fn test_partial_engine_section_uses_defaults() {
        let json = r#"{"welcome_shown": true, "engine": {"removal_delay_ms": 250}}"#;
        let config: UserConfig = serde_json::from_str(json).unwrap();

        assert!(config.welcome_shown);
        assert_eq!(config.engine.removal_delay_ms, 250);
        assert_eq!(config.engine.tap_max_duration_ms, 300);
        assert_eq!(config.engine.badge_ramp_px, 28.0);
    }

    #[test]
    fn test_missing_engine_section() {
        let config: UserConfig = serde_json::from_str(r#"{"welcome_shown": false}"#).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_stack_config_conversion() {
        let engine = EngineConfig {
            tap_max_duration_ms: 150,
            removal_delay_ms: 900,
            ..EngineConfig::default()
        };
        let stack = engine.stack_config();

        assert_eq!(stack.gesture.tap_max_duration, Duration::from_millis(150));
        assert_eq!(stack.removal_delay, Duration::from_millis(900));
        assert_eq!(stack.exit.distance_px, 1200.0);
        assert_eq!(stack.badge.deadband_px, 8.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = UserConfig::default();
        config.welcome_shown = true;
        config.engine.commit_threshold_px = 90.0;
        config.save_to(&path).unwrap();

        let loaded = UserConfig::load_from(&path).unwrap();
        assert!(loaded.welcome_shown);
        assert_eq!(loaded.engine.commit_threshold_px, 90.0);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let loaded = UserConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(!loaded.welcome_shown);
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, SwipeDeckError::ConfigError(_)));
    }
}
