use image::Rgb;

use crate::geometry::{Bounds, Point};
use crate::input::{InputEvent, PointerButton};

/// A clickable label on the game over screen
#[derive(Debug, Clone)]
pub struct Button {
    pub bounds: Bounds,
    pub label: String,
    pub color: Rgb<u8>,
    pub hover_color: Rgb<u8>,
    hovered: bool,
}

impl Button {
    pub fn new(bounds: Bounds, label: impl Into<String>, color: Rgb<u8>, hover_color: Rgb<u8>) -> Self {
        Self {
            bounds,
            label: label.into(),
            color,
            hover_color,
            hovered: false,
        }
    }

    /// Recomputes the hover flag from the cursor position
    pub fn check_hover(&mut self, cursor: Point) -> bool {
        self.hovered = self.bounds.contains(cursor);
        self.hovered
    }

    /// True only for a primary-button press while the cursor is over the
    /// button. The event is not consumed.
    pub fn is_clicked(&self, cursor: Point, event: &InputEvent) -> bool {
        matches!(
            event,
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                ..
            }
        ) && self.bounds.contains(cursor)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Fill color for the current hover state
    pub fn current_color(&self) -> Rgb<u8> {
        if self.hovered {
            self.hover_color
        } else {
            self.color
        }
    }
}
