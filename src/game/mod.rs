//! Menu state management module.
//!
//! This module defines the [`GameState`] struct, which tracks all mutable state for the menu loop:
//! the ordered button list, the score and the running flag. It owns all input handling and click
//! dispatch, and does not touch the window or the GPU, so it can be driven directly from tests.

pub mod button;
pub mod input;

use self::button::{Button, Command};
use self::input::{InputEvent, PointerButton};

/// Represents the entire mutable state of the menu.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Buttons in drawing order. The set is fixed after creation.
    pub buttons: Vec<Button>,
    /// Score counter, starts at 0.
    pub score: u32,
    /// Cleared once by a quit signal or a quit command, never set again.
    pub running: bool,
}

impl GameState {
    /// Creates a running state with a zero score.
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            score: 0,
            running: true,
        }
    }

    /// Whether the main loop should keep going.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Requests the loop to stop.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Stopping with score {}", self.score);
        }
        self.running = false;
    }

    /// Applies every pending event in order.
    pub fn handle_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Applies a single input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.stop(),
            InputEvent::PointerMoved { x, y } => self.update_hover(x, y),
            InputEvent::PointerPressed {
                x,
                y,
                button: PointerButton::Primary,
            } => self.press(x, y),
            InputEvent::PointerPressed { .. } => {}
        }
    }

    /// Recomputes the hover flag of every button for a cursor at (x, y).
    pub fn update_hover(&mut self, x: i32, y: i32) {
        for button in &mut self.buttons {
            button.is_hovered = button.contains_point(x, y);
        }
    }

    /// Clicks every button containing (x, y).
    ///
    /// Overlapping buttons all fire for a single press.
    pub fn press(&mut self, x: i32, y: i32) {
        let hits: Vec<usize> = self
            .buttons
            .iter()
            .enumerate()
            .filter(|(_, button)| button.contains_point(x, y))
            .map(|(index, _)| index)
            .collect();

        for index in hits {
            self.click(index);
        }
    }

    /// Runs the command of the button at `index`.
    ///
    /// Out-of-range indices are ignored.
    pub fn click(&mut self, index: usize) {
        let Some(button) = self.buttons.get(index) else {
            log::warn!("Click on missing button {}", index);
            return;
        };
        log::debug!("Button '{}' was clicked", button.label);

        match button.command {
            Command::AddScore { amount } => {
                self.score = self.score.saturating_add(amount);
            }
            Command::None => {}
            Command::Quit => self.stop(),
        }
    }

    /// Text of the score label.
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn default_state() -> GameState {
        GameState::new(AppConfig::default().build_buttons())
    }

    fn hovered(state: &GameState) -> Vec<bool> {
        state.buttons.iter().map(|b| b.is_hovered).collect()
    }

    #[test]
    fn test_move_outside_clears_all_hover() {
        let mut state = default_state();
        state.handle_event(InputEvent::PointerMoved { x: 150, y: 75 });
        state.handle_event(InputEvent::PointerMoved { x: 700, y: 500 });

        assert_eq!(hovered(&state), vec![false, false, false]);
    }

    #[test]
    fn test_move_inside_hovers_only_that_button() {
        let mut state = default_state();
        state.handle_event(InputEvent::PointerMoved { x: 100, y: 140 });

        assert_eq!(hovered(&state), vec![false, true, false]);
    }

    #[test]
    fn test_start_button_adds_ten() {
        let mut state = default_state();
        state.press(150, 75);

        assert_eq!(state.score, 10);
        assert!(state.is_running());
    }

    #[test]
    fn test_options_button_changes_nothing() {
        let mut state = default_state();
        state.press(150, 145);

        assert_eq!(state.score, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_quit_button_stops() {
        let mut state = default_state();
        state.press(150, 215);

        assert_eq!(state.score, 0);
        assert!(!state.is_running());
    }

    #[test]
    fn test_secondary_press_is_ignored() {
        let mut state = default_state();
        state.handle_event(InputEvent::PointerPressed {
            x: 150,
            y: 75,
            button: PointerButton::Secondary,
        });

        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_overlapping_buttons_both_fire() {
        let mut state = GameState::new(vec![
            Button::new(0, 0, 100, 100, "A", Command::AddScore { amount: 10 }),
            Button::new(50, 50, 100, 100, "B", Command::AddScore { amount: 5 }),
        ]);
        state.press(75, 75);

        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_shared_edge_hovers_both() {
        let mut state = default_state();
        // Start Game ends at y = 100, Options starts at y = 120: no overlap.
        state.update_hover(50, 100);
        assert_eq!(hovered(&state), vec![true, false, false]);

        let mut adjacent = GameState::new(vec![
            Button::new(0, 0, 10, 10, "A", Command::None),
            Button::new(10, 0, 10, 10, "B", Command::None),
        ]);
        adjacent.update_hover(10, 5);
        assert_eq!(hovered(&adjacent), vec![true, true]);
    }

    #[test]
    fn test_hover_at_coordinate_limit() {
        let mut state = GameState::new(vec![Button::new(
            i32::MAX - 47,
            0,
            200,
            50,
            "Edge",
            Command::None,
        )]);
        state.update_hover(i32::MAX, 10);

        assert_eq!(hovered(&state), vec![true]);
    }

    #[test]
    fn test_quit_event_stops() {
        let mut state = default_state();
        state.handle_events([InputEvent::Quit]);
        assert!(!state.is_running());
    }

    #[test]
    fn test_score_saturates() {
        let mut state = GameState::new(vec![Button::new(
            0,
            0,
            10,
            10,
            "Max",
            Command::AddScore { amount: u32::MAX },
        )]);
        state.press(5, 5);
        state.press(5, 5);

        assert_eq!(state.score, u32::MAX);
    }

    #[test]
    fn test_click_out_of_range_is_ignored() {
        let mut state = default_state();
        state.click(7);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut state = default_state();

        state.handle_events([InputEvent::PointerMoved { x: 150, y: 75 }]);
        assert_eq!(hovered(&state), vec![true, false, false]);

        state.handle_events([InputEvent::PointerPressed {
            x: 150,
            y: 75,
            button: PointerButton::Primary,
        }]);
        assert_eq!(state.score, 10);
        assert!(state.is_running());
        assert_eq!(state.score_text(), "Score: 10");

        state.handle_events([InputEvent::PointerPressed {
            x: 150,
            y: 215,
            button: PointerButton::Primary,
        }]);
        assert!(!state.is_running());
    }
}
