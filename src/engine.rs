//! Gesture-driven card stack engine
//!
//! Pointer events flow through the [`GestureClassifier`]; drag releases and the
//! drag library's completion signals are turned into exactly one committed
//! [`SwipeDirection`] per card by the [`CardStackController`].

pub mod badge;
pub mod classifier;
pub mod direction;
pub mod exit;
pub mod recorder;
pub mod session;
pub mod stack;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use badge::{BadgeConfig, BadgeOverlay, EdgeGlow, GlowSide, GlowTint};
pub use classifier::{Classification, GestureClassifier, GestureThresholds};
pub use direction::{resolve, ParseTokenError, Resolution, SwipeDirection, SwipeToken};
pub use exit::{ExitAnimation, ExitConfig};
pub use recorder::{
    CompletionSignal, DetailOpener, NoDetailView, SwipeLog, SwipeOutcome, SwipeRecorder,
    SwipeStatistics,
};
pub use session::GestureSession;
pub use stack::{
    CardPhase, CardStackController, CommitOutcome, PointerOutcome, RemovalScheduler,
    RemovalTicket, StackConfig,
};

/// Opaque identity of a card in the stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A pointer position in px-equivalent units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
