use crate::config::EngineConfig;
use crate::engine::Point;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Swipe the top card right
    Pick,
    /// Swipe the top card left
    Pass,
    /// Open the detail view of the top card
    OpenDetail,
    /// Toggle between discover and nearby
    SwitchMode,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Pick: Right arrow or l
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Pick,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Pick,

        // Pass: Left arrow or h
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Pass,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Pass,

        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::OpenDetail,
        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::OpenDetail,

        (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::SwitchMode,
        (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::SwitchMode,

        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Left-button mouse event translated into pointer terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
    /// Cell position scaled to px
    pub point: Point,
}

/// Maps left-button mouse events to pointer input; everything else is dropped
pub fn pointer_from_mouse(event: MouseEvent, engine: &EngineConfig) -> Option<PointerInput> {
    let kind = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };

    Some(PointerInput {
        kind,
        column: event.column,
        row: event.row,
        point: cell_to_point(event.column, event.row, engine),
    })
}

pub fn cell_to_point(column: u16, row: u16, engine: &EngineConfig) -> Point {
    Point::new(
        f32::from(column) * engine.cell_width_px,
        f32::from(row) * engine.cell_height_px,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn test_key_quit() {
            let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Quit);

            let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(handle_key_event(key), KeyAction::Quit);

            let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Quit);
        }

        #[test]
        fn test_key_pick_and_pass() {
            let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Pick);

            let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Pick);

            let key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Pass);

            let key = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Pass);
        }

        #[test]
        fn test_key_detail_mode_help() {
            let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::OpenDetail);

            let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::SwitchMode);

            let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Help);
        }

        #[test]
        fn test_key_none() {
            let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::None);
        }
    }

    mod mouse_tests {
        use super::*;

        #[test]
        fn test_left_button_maps_to_pointer() {
            let engine = EngineConfig::default();

            let down = pointer_from_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 3), &engine)
                .unwrap();
            assert_eq!(down.kind, PointerKind::Down);
            assert_eq!(down.point, Point::new(80.0, 48.0));

            let drag = pointer_from_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 3), &engine)
                .unwrap();
            assert_eq!(drag.kind, PointerKind::Move);

            let up = pointer_from_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 3), &engine)
                .unwrap();
            assert_eq!(up.kind, PointerKind::Up);
            assert_eq!((up.column, up.row), (12, 3));
        }

        #[test]
        fn test_other_mouse_events_dropped() {
            let engine = EngineConfig::default();
            assert!(pointer_from_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), &engine).is_none());
            assert!(pointer_from_mouse(mouse(MouseEventKind::Moved, 1, 1), &engine).is_none());
            assert!(pointer_from_mouse(mouse(MouseEventKind::ScrollDown, 1, 1), &engine).is_none());
        }
    }
}
