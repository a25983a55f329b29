//! Tap vs. drag classification

use super::{CardId, GestureSession, Point};
use std::time::{Duration, Instant};

/// Thresholds separating a tap from a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Max movement on either axis still considered a tap
    pub tap_max_movement_px: f32,
    /// Max press duration still considered a tap
    pub tap_max_duration: Duration,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_max_movement_px: 10.0,
            tap_max_duration: Duration::from_millis(300),
        }
    }
}

/// Result of a pointer-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// Click/press; opens the detail view
    Tap,
    /// Released drag; not a commit by itself
    DragRelease { last_delta_x: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Opens a session on pointer-down
    pub fn begin(&self, card_id: CardId, point: Point, now: Instant) -> GestureSession {
        GestureSession::new(card_id, point, now)
    }

    /// Applies a pointer-move, latching `is_dragging` once movement exceeds the tap limit
    pub fn track(&self, session: &mut GestureSession, point: Point) {
        let (dx, dy) = session.update_delta(point);
        if self.exceeds_movement(dx, dy) {
            session.latch_dragging();
        }
    }

    /// Classifies a pointer-up at `point`
    pub fn classify_release(
        &self,
        session: &GestureSession,
        point: Point,
        now: Instant,
    ) -> Classification {
        let dx = point.x - session.start_point.x;
        let dy = point.y - session.start_point.y;
        let elapsed = now.saturating_duration_since(session.start_time);

        let is_tap = !session.is_dragging()
            && elapsed <= self.thresholds.tap_max_duration
            && !self.exceeds_movement(dx, dy);

        if is_tap {
            Classification::Tap
        } else {
            Classification::DragRelease { last_delta_x: dx }
        }
    }

    fn exceeds_movement(&self, dx: f32, dy: f32) -> bool {
        dx.abs() > self.thresholds.tap_max_movement_px
            || dy.abs() > self.thresholds.tap_max_movement_px
    }
}
