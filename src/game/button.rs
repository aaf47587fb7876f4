//! Button data for the menu.
//!
//! A [`Button`] is passive: it holds its bounds, its label, the hover flag
//! and the [`Command`] it runs when clicked. Hit-testing and drawing are done
//! by the owner ([`crate::game::GameState`] and the renderer).

use serde::{Deserialize, Serialize};

/// Integer pixel rectangle in window coordinates, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Bounds {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Checks if the point (x, y) lies inside the rectangle.
    ///
    /// Both edges are inclusive, so a rectangle of width `w` accepts
    /// `w + 1` columns of pixels. Adjacent buttons that share an edge will
    /// both report the shared pixels.
    ///
    /// Edges are computed in `i64`, so rectangles reaching past `i32::MAX`
    /// never wrap.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left
            && x <= left + i64::from(self.width)
            && y >= top
            && y <= top + i64::from(self.height)
    }

    /// Right and bottom edges, or `None` if either overflows `i32`.
    pub fn checked_far_edges(&self) -> Option<(i32, i32)> {
        Some((
            self.x.checked_add(self.width)?,
            self.y.checked_add(self.height)?,
        ))
    }
}

/// What a button does when it is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Adds `amount` to the score.
    AddScore {
        /// Points added per click.
        amount: u32,
    },
    /// Does nothing. Reserved for buttons without behavior yet.
    None,
    /// Stops the application.
    Quit,
}

/// A clickable menu button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Position and size, fixed after creation.
    pub bounds: Bounds,
    /// Label drawn centered inside the bounds.
    pub label: String,
    /// Whether the last known cursor position is inside `bounds`.
    pub is_hovered: bool,
    /// Action run on a primary-button press inside `bounds`.
    pub command: Command,
}

impl Button {
    /// Creates a button that is not hovered.
    pub fn new(x: i32, y: i32, width: i32, height: i32, label: &str, command: Command) -> Self {
        Self {
            bounds: Bounds::new(x, y, width, height),
            label: label.to_string(),
            is_hovered: false,
            command,
        }
    }

    /// Hit-test against the button bounds.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }
}
