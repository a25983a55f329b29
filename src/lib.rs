//! Swipedeck - a gesture-driven card stack for the terminal
//!
//! The [`engine`] module is host-independent: it classifies pointer gestures,
//! resolves swipe directions and commits each card exactly once. The rest of
//! the crate hosts it in a ratatui app with mouse drags, tokio-backed removal
//! timers and a profile feed.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod removal_timer;
pub mod tui;

// Re-export primary types for convenience
pub use app::App;
pub use config::{EngineConfig, UserConfig};
pub use domain::{demo_profiles, load_profiles, Feed, FeedMode, Profile};
pub use engine::{
    CardId, CardStackController, CommitOutcome, SwipeDirection, SwipeLog, SwipeOutcome,
    SwipeRecorder,
};
pub use error::{Result, SwipeDeckError};
pub use removal_timer::TokioRemovalTimers;
