//! Window-independent input events.
//!
//! The event handler translates winit events into [`InputEvent`] so that
//! [`crate::game::GameState`] can be driven without a window.

use winit::event::MouseButton;

/// Pointer buttons the menu distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Any other button.
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Input the menu reacts to, in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request or interrupt signal.
    Quit,
    /// Cursor moved to (x, y).
    PointerMoved {
        /// Cursor x.
        x: i32,
        /// Cursor y.
        y: i32,
    },
    /// A pointer button went down at (x, y).
    PointerPressed {
        /// Press x.
        x: i32,
        /// Press y.
        y: i32,
        /// Which button.
        button: PointerButton,
    },
}

/// Last known cursor position.
///
/// winit reports button presses without coordinates, so presses are placed
/// at the most recent `CursorMoved` position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CursorTracker {
    position: (i32, i32),
}

impl CursorTracker {
    /// Records a cursor move and returns the matching event.
    ///
    /// Fractional coordinates are floored to whole pixels.
    pub fn moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.position = (x.floor() as i32, y.floor() as i32);
        InputEvent::PointerMoved {
            x: self.position.0,
            y: self.position.1,
        }
    }

    /// Builds a press event at the last known position.
    pub fn pressed(&self, button: MouseButton) -> InputEvent {
        InputEvent::PointerPressed {
            x: self.position.0,
            y: self.position.1,
            button: button.into(),
        }
    }

    /// Current cursor position.
    #[cfg(test)]
    pub fn position(&self) -> (i32, i32) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_uses_last_cursor_position() {
        let mut tracker = CursorTracker::default();
        tracker.moved(150.7, 75.2);

        assert_eq!(
            tracker.pressed(MouseButton::Left),
            InputEvent::PointerPressed {
                x: 150,
                y: 75,
                button: PointerButton::Primary,
            }
        );
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(PointerButton::from(MouseButton::Left), PointerButton::Primary);
        assert_eq!(PointerButton::from(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(PointerButton::from(MouseButton::Middle), PointerButton::Other);
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let mut tracker = CursorTracker::default();
        assert_eq!(tracker.moved(-0.5, 3.0), InputEvent::PointerMoved { x: -1, y: 3 });
        assert_eq!(tracker.position(), (-1, 3));
    }
}
