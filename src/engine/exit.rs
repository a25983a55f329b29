//! Fly-off animation for committed cards

use super::SwipeDirection;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitConfig {
    /// Horizontal distance the card travels off screen
    pub distance_px: f32,
    pub duration: Duration,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            distance_px: 1200.0,
            duration: Duration::from_millis(600),
        }
    }
}

/// Purely visual; recording already happened when this starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitAnimation {
    direction: SwipeDirection,
    from_x: f32,
    to_x: f32,
    elapsed: Duration,
    duration: Duration,
}

impl ExitAnimation {
    /// Starts from the card's current drag offset towards `sign * distance`
    pub fn start(direction: SwipeDirection, from_x: f32, config: ExitConfig) -> Self {
        Self {
            direction,
            from_x,
            to_x: direction.sign() * config.distance_px,
            elapsed: Duration::ZERO,
            duration: config.duration,
        }
    }

    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn target_x(&self) -> f32 {
        self.to_x
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Linear time progress in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current horizontal offset with ease-out applied
    pub fn offset_x(&self) -> f32 {
        let eased = ease_out_cubic(self.progress());
        self.from_x + (self.to_x - self.from_x) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
