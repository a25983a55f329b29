use super::{CardId, Point};
use std::time::Instant;

/// Per-card record of an in-progress pointer interaction
///
/// `is_dragging` and `handled` are one-way latches: once set they stay set
/// for the lifetime of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    card_id: CardId,
    pub start_point: Point,
    pub start_time: Instant,
    pub last_delta_x: f32,
    pub last_delta_y: f32,
    is_dragging: bool,
    handled: bool,
}

impl GestureSession {
    /// Starts a session on pointer-down
    pub fn new(card_id: CardId, start_point: Point, start_time: Instant) -> Self {
        Self {
            card_id,
            start_point,
            start_time,
            last_delta_x: 0.0,
            last_delta_y: 0.0,
            is_dragging: false,
            handled: false,
        }
    }

    /// Session with no pointer history, used when a completion signal arrives
    /// for a card that was never pressed (keyboard swipes, programmatic signals)
    pub fn detached(card_id: CardId, now: Instant) -> Self {
        Self::new(card_id, Point::default(), now)
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Records the offset of `point` from the start point
    pub fn update_delta(&mut self, point: Point) -> (f32, f32) {
        self.last_delta_x = point.x - self.start_point.x;
        self.last_delta_y = point.y - self.start_point.y;
        (self.last_delta_x, self.last_delta_y)
    }

    pub fn latch_dragging(&mut self) {
        self.is_dragging = true;
    }

    /// Check-and-set of the commit guard.
    ///
    /// Returns `true` only for the first call on this session.
    pub fn try_mark_handled(&mut self) -> bool {
        if self.handled {
            return false;
        }
        self.handled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GestureSession {
        GestureSession::new(CardId::from("a"), Point::new(100.0, 200.0), Instant::now())
    }

    #[test]
    fn test_new_session_is_fresh() {
        let s = session();
        assert!(!s.is_dragging());
        assert!(!s.is_handled());
        assert_eq!(s.last_delta_x, 0.0);
        assert_eq!(s.card_id().as_str(), "a");
    }

    #[test]
    fn test_update_delta_is_relative_to_start() {
        let mut s = session();
        assert_eq!(s.update_delta(Point::new(140.0, 205.0)), (40.0, 5.0));
        assert_eq!(s.update_delta(Point::new(90.0, 200.0)), (-10.0, 0.0));
        assert_eq!(s.last_delta_x, -10.0);
    }

    #[test]
    fn test_dragging_latch_is_one_way() {
        let mut s = session();
        s.latch_dragging();
        s.update_delta(Point::new(100.0, 200.0));
        assert!(s.is_dragging());
    }

    #[test]
    fn test_handled_only_set_once() {
        let mut s = session();
        assert!(s.try_mark_handled());
        assert!(!s.try_mark_handled());
        assert!(s.is_handled());
    }
}
