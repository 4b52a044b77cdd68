use ratatui::layout::Rect;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::{Bounds, Point};

/// Maps the fixed world onto a terminal area. Each cell covers one canvas
/// column and two canvas rows (drawn as a half block).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    fn columns(&self) -> f32 {
        self.area.width.max(1) as f32
    }

    fn rows(&self) -> f32 {
        self.area.height.max(1) as f32
    }

    /// World position at the center of canvas pixel (`px`, `py`)
    pub fn pixel_to_world(&self, px: u32, py: u32) -> Point {
        Point::new(
            (px as f32 + 0.5) * SCREEN_WIDTH / self.columns(),
            (py as f32 + 0.5) * SCREEN_HEIGHT / (self.rows() * 2.0),
        )
    }

    /// World position under a terminal cell given in absolute screen
    /// coordinates, as reported by mouse events
    pub fn cell_to_world(&self, column: u16, row: u16) -> Point {
        let column = column.saturating_sub(self.area.x).min(self.area.width.saturating_sub(1));
        let row = row.saturating_sub(self.area.y).min(self.area.height.saturating_sub(1));
        Point::new(
            (column as f32 + 0.5) * SCREEN_WIDTH / self.columns(),
            (row as f32 + 0.5) * SCREEN_HEIGHT / self.rows(),
        )
    }

    /// The cells whose centers fall inside `bounds`, clipped to the area.
    /// These are exactly the cells [`Viewport::cell_to_world`] maps into
    /// `bounds`, so whatever is drawn there is also clickable.
    pub fn world_to_cells(&self, bounds: Bounds) -> Rect {
        let columns = self.area.width as f32;
        let rows = self.area.height as f32;

        // First cell index whose center is at or past `edge`
        let first_center = |edge: f32, cells: f32, world: f32| {
            (edge * cells / world - 0.5).ceil().clamp(0.0, cells)
        };

        let left = first_center(bounds.x, columns, SCREEN_WIDTH);
        let right = first_center(bounds.right(), columns, SCREEN_WIDTH).max(left);
        let top = first_center(bounds.y, rows, SCREEN_HEIGHT);
        let bottom = first_center(bounds.bottom(), rows, SCREEN_HEIGHT).max(top);

        Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    /// Terminal row holding world height `y`
    pub fn row_at(&self, y: f32) -> u16 {
        let rows = self.area.height as f32;
        let row = (y * rows / SCREEN_HEIGHT).floor().clamp(0.0, (rows - 1.0).max(0.0));
        self.area.y + row as u16
    }
}
