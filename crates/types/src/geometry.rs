use serde::{Deserialize, Serialize};

/// The page box a render pass lays content into, in points.
///
/// Coordinates grow to the right and downwards from the top-left corner of
/// the page, so `margin_top` is the first usable `y` and
/// `height - margin_bottom` is the last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin_left: 0.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
        }
    }

    pub fn with_margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    /// Horizontal space between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Vertical space between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// The largest `y` any drawn unit may extend to.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }

    /// Cursor position at the top-left of the content area.
    pub fn origin(&self) -> LayoutCursor {
        LayoutCursor::new(self.margin_left, self.margin_top)
    }
}

impl Default for PageGeometry {
    /// A4 portrait with 10mm side/top margins and a 20mm bottom margin.
    fn default() -> Self {
        Self::new(595.28, 841.89).with_margins(28.35, 28.35, 56.7, 28.35)
    }
}

/// The position where the next unit of content is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutCursor {
    pub x: f32,
    pub y: f32,
}

impl LayoutCursor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
