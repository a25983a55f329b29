// CLI module for argument parsing and configuration

use crate::config::EngineConfig;
use crate::domain::FeedMode;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Swipedeck - a card-swiping discovery feed in the terminal
///
/// Drag cards with the mouse: right to pick, left to pass, click to open.
#[derive(Parser, Debug, Clone)]
#[command(name = "swipedeck")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with the profile pool
    ///
    /// If not specified, a built-in demo feed is used.
    pub feed: Option<PathBuf>,

    /// Initial search mode
    #[arg(short = 'm', long = "mode", value_enum, default_value = "discover")]
    pub mode: ModeArg,

    /// Max pointer movement (px) still treated as a tap
    #[arg(long = "tap-max-movement")]
    pub tap_max_movement: Option<f32>,

    /// Max press duration (ms) still treated as a tap
    #[arg(long = "tap-max-duration-ms")]
    pub tap_max_duration_ms: Option<u64>,

    /// Delay (ms) between a committed swipe and the next card
    #[arg(long = "removal-delay-ms")]
    pub removal_delay_ms: Option<u64>,

    /// Release distance (px) that counts as a swipe
    #[arg(long = "commit-threshold")]
    pub commit_threshold: Option<f32>,

    /// Log file (defaults to swipedeck.log in the config directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Show the welcome dialog even if it was already seen
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub welcome: bool,
}

/// Search mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ModeArg {
    /// Every profile in feed order
    #[default]
    Discover,
    /// Profiles close by, nearest first
    Nearby,
}

impl From<ModeArg> for FeedMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Discover => FeedMode::Discover,
            ModeArg::Nearby => FeedMode::Nearby,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref feed) = self.feed {
            if !feed.is_file() {
                return Err(format!("Feed file does not exist: {}", feed.display()));
            }
        }

        if let Some(px) = self.tap_max_movement {
            if !(px.is_finite() && px > 0.0) {
                return Err(format!("tap-max-movement must be positive, got {}", px));
            }
        }

        if let Some(px) = self.commit_threshold {
            if !(px.is_finite() && px > 0.0) {
                return Err(format!("commit-threshold must be positive, got {}", px));
            }
        }

        Ok(())
    }

    /// Layers CLI overrides on top of the persisted engine config
    pub fn engine_config(&self, base: &EngineConfig) -> Result<EngineConfig, String> {
        let mut engine = base.clone();
        if let Some(px) = self.tap_max_movement {
            engine.tap_max_movement_px = px;
        }
        if let Some(ms) = self.tap_max_duration_ms {
            engine.tap_max_duration_ms = ms;
        }
        if let Some(ms) = self.removal_delay_ms {
            engine.removal_delay_ms = ms;
        }
        if let Some(px) = self.commit_threshold {
            engine.commit_threshold_px = px;
        }

        // A release that counts as a swipe must never also look like a tap
        if engine.commit_threshold_px <= engine.tap_max_movement_px {
            return Err(format!(
                "commit threshold ({}px) must exceed tap movement ({}px)",
                engine.commit_threshold_px, engine.tap_max_movement_px
            ));
        }

        Ok(engine)
    }
}

/// Configuration derived from CLI arguments and the user config
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: Option<PathBuf>,
    pub mode: FeedMode,
    pub engine: EngineConfig,
    pub log_file: Option<PathBuf>,
    pub show_welcome: bool,
}

impl AppConfig {
    pub fn from_args(args: Args, base: &EngineConfig) -> Result<Self, String> {
        let engine = args.engine_config(base)?;
        Ok(AppConfig {
            feed: args.feed,
            mode: args.mode.into(),
            engine,
            log_file: args.log_file,
            show_welcome: args.welcome,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            feed: None,
            mode: FeedMode::Discover,
            engine: EngineConfig::default(),
            log_file: None,
            show_welcome: false,
        }
    }
}
