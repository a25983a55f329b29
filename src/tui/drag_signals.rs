//! Stand-in for a mobile drag/swipe library.
//!
//! Decides on release whether the gesture passed the commit threshold and
//! emits the library's two completion signals. Horizontal flicks report a
//! trustworthy direction first and "left the visible area" once the exit
//! animation is done; vertical-dominant flicks report the visible-area signal
//! first and then an axis token the engine has to ignore.

use crate::engine::SwipeToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    Swiped(SwipeToken),
    LeftVisibleArea,
}

#[derive(Debug, Clone, Copy)]
pub struct DragSignalSource {
    commit_threshold_px: f32,
}

impl DragSignalSource {
    pub fn new(commit_threshold_px: f32) -> Self {
        Self {
            commit_threshold_px,
        }
    }

    /// Signals emitted immediately for a release at offset `(dx, dy)`
    pub fn on_release(&self, dx: f32, dy: f32) -> Vec<DragSignal> {
        if dx.abs() < self.commit_threshold_px && dy.abs() < self.commit_threshold_px {
            return Vec::new();
        }

        if dx.abs() >= dy.abs() {
            let token = if dx < 0.0 {
                SwipeToken::Left
            } else {
                SwipeToken::Right
            };
            vec![DragSignal::Swiped(token)]
        } else {
            let token = if dy < 0.0 {
                SwipeToken::Up
            } else {
                SwipeToken::Down
            };
            vec![DragSignal::LeftVisibleArea, DragSignal::Swiped(token)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_emits_nothing() {
        let source = DragSignalSource::new(120.0);
        assert!(source.on_release(119.0, -119.0).is_empty());
    }

    #[test]
    fn test_horizontal_flick_reports_direction() {
        let source = DragSignalSource::new(120.0);
        assert_eq!(
            source.on_release(-130.0, 20.0),
            vec![DragSignal::Swiped(SwipeToken::Left)]
        );
        assert_eq!(
            source.on_release(120.0, 0.0),
            vec![DragSignal::Swiped(SwipeToken::Right)]
        );
    }

    #[test]
    fn test_vertical_flick_is_ambiguous() {
        let source = DragSignalSource::new(120.0);
        assert_eq!(
            source.on_release(16.0, 160.0),
            vec![
                DragSignal::LeftVisibleArea,
                DragSignal::Swiped(SwipeToken::Down)
            ]
        );
        assert_eq!(
            source.on_release(-4.0, -200.0)[1],
            DragSignal::Swiped(SwipeToken::Up)
        );
    }
}
