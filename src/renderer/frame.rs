//! Frame composition.
//!
//! Turns a [`GameState`] into a flat draw list: one clear color, the button fills and the text
//! placements. Composition only reads the state, so composing twice from the same state yields
//! the same frame. Text measurement is injected so this module runs without a GPU.

use crate::config::ThemeConfig;
use crate::error::TextError;
use crate::game::GameState;
use crate::game::button::Bounds;

/// A solid rectangle fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRect {
    /// Area to fill.
    pub bounds: Bounds,
    /// sRGB fill color.
    pub color: [u8; 3],
    /// Corner radius in pixels.
    pub corner_radius: f32,
}

/// A text label placed at an integer pixel position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    /// Label text.
    pub text: String,
    /// Left edge of the rasterized label.
    pub left: i32,
    /// Top edge of the rasterized label.
    pub top: i32,
    /// sRGB text color.
    pub color: [u8; 3],
}

/// Everything drawn in one frame, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Clear color.
    pub clear: [u8; 3],
    /// Button fills.
    pub rects: Vec<FillRect>,
    /// Labels, drawn above every fill.
    pub texts: Vec<TextDraw>,
}

/// Top-left corner that centers a `width` x `height` image inside `bounds`.
///
/// Uses integer division, which truncates toward zero: a label wider than its button gets a
/// negative offset rounded toward the button's origin.
pub fn centered_origin(bounds: &Bounds, width: i32, height: i32) -> (i32, i32) {
    (
        bounds.x + (bounds.width - width) / 2,
        bounds.y + (bounds.height - height) / 2,
    )
}

/// Builds the frame for `state`.
///
/// `rasterize` returns the pixel size of a label drawn in the given color. Labels that fail to
/// rasterize are skipped for this frame and logged; everything else is still drawn.
pub fn compose_frame<F>(state: &GameState, theme: &ThemeConfig, mut rasterize: F) -> Frame
where
    F: FnMut(&str, [u8; 3]) -> Result<(i32, i32), TextError>,
{
    let mut rects = Vec::with_capacity(state.buttons.len());
    let mut texts = Vec::with_capacity(state.buttons.len() + 1);

    for button in &state.buttons {
        let color = if button.is_hovered {
            theme.button_hover
        } else {
            theme.button
        };
        rects.push(FillRect {
            bounds: button.bounds,
            color,
            corner_radius: theme.corner_radius,
        });

        match rasterize(&button.label, theme.text) {
            Ok((width, height)) => {
                let (left, top) = centered_origin(&button.bounds, width, height);
                texts.push(TextDraw {
                    text: button.label.clone(),
                    left,
                    top,
                    color: theme.text,
                });
            }
            Err(e) => log::warn!("Skipping label '{}' this frame: {}", button.label, e),
        }
    }

    let score_text = state.score_text();
    match rasterize(&score_text, theme.text) {
        Ok(_) => {
            let (left, top) = theme.score_position;
            texts.push(TextDraw {
                text: score_text,
                left,
                top,
                color: theme.text,
            });
        }
        Err(e) => log::warn!("Skipping score label this frame: {}", e),
    }

    Frame {
        clear: theme.background,
        rects,
        texts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::game::input::InputEvent;

    /// 12 px per character, 28 px tall.
    fn fixed_metrics(text: &str, _color: [u8; 3]) -> Result<(i32, i32), TextError> {
        Ok((text.chars().count() as i32 * 12, 28))
    }

    fn default_state() -> GameState {
        GameState::new(AppConfig::default().build_buttons())
    }

    #[test]
    fn test_centering_uses_truncating_division() {
        let bounds = Bounds::new(50, 50, 200, 50);
        assert_eq!(centered_origin(&bounds, 120, 28), (90, 61));
        assert_eq!(centered_origin(&bounds, 121, 29), (89, 60));
        // Wider than the button: (200 - 203) / 2 == -1, not -2.
        assert_eq!(centered_origin(&bounds, 203, 28), (49, 61));
    }

    #[test]
    fn test_hover_selects_fill_color() {
        let theme = ThemeConfig::default();
        let mut state = default_state();
        state.handle_event(InputEvent::PointerMoved { x: 150, y: 75 });

        let frame = compose_frame(&state, &theme, fixed_metrics);
        let colors: Vec<[u8; 3]> = frame.rects.iter().map(|r| r.color).collect();

        assert_eq!(
            colors,
            vec![theme.button_hover, theme.button, theme.button]
        );
        assert_eq!(frame.clear, [45, 45, 45]);
    }

    #[test]
    fn test_labels_are_centered_and_score_is_last() {
        let theme = ThemeConfig::default();
        let frame = compose_frame(&default_state(), &theme, fixed_metrics);

        assert_eq!(frame.texts.len(), 4);
        // "Options" is 84 px wide: 50 + (200 - 84) / 2 = 108, 120 + (50 - 28) / 2 = 131.
        assert_eq!((frame.texts[1].left, frame.texts[1].top), (108, 131));

        let score = &frame.texts[3];
        assert_eq!(score.text, "Score: 0");
        assert_eq!((score.left, score.top), (600, 50));
    }

    #[test]
    fn test_composing_twice_is_identical() {
        let theme = ThemeConfig::default();
        let mut state = default_state();
        state.handle_event(InputEvent::PointerMoved { x: 100, y: 200 });
        state.press(150, 75);
        let before = state.clone();

        let first = compose_frame(&state, &theme, fixed_metrics);
        let second = compose_frame(&state, &theme, fixed_metrics);

        assert_eq!(first, second);
        assert_eq!(state.buttons, before.buttons);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn test_failed_label_is_skipped() {
        let theme = ThemeConfig::default();
        let frame = compose_frame(&default_state(), &theme, |text, color| {
            if text == "Options" {
                Err(TextError::EmptyLayout(text.to_string()))
            } else {
                fixed_metrics(text, color)
            }
        });

        assert_eq!(frame.rects.len(), 3);
        let texts: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Start Game", "Quit", "Score: 0"]);
    }
}
