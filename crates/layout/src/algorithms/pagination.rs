use crate::LayoutError;
use crate::text::wrapper::LineLayout;
use ficopdf_style::FontId;
use ficopdf_traits::DrawingSurface;
use ficopdf_types::{LayoutCursor, PageGeometry};

/// Tolerance for floating point comparisons against page and line limits.
pub const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a unit of `child_height` still fits above the bottom
/// margin when placed at `cursor_y`.
pub fn check_child_fit(cursor_y: f32, child_height: f32, page: &PageGeometry) -> BreakAnalysis {
    let available = (page.bottom_limit() - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: child_height > available + EPSILON,
        remaining_height: available,
    }
}

/// Owns the layout cursor for one render call and drives the surface.
///
/// The cursor never moves below the bottom margin: every drawn unit first
/// calls [`Paginator::ensure_space`], which starts a new page when needed.
pub struct Paginator<'s, S: DrawingSurface + ?Sized> {
    surface: &'s mut S,
    page: PageGeometry,
    cursor: LayoutCursor,
    active_font: Option<(FontId, f32)>,
    pages_added: usize,
}

impl<'s, S: DrawingSurface + ?Sized> Paginator<'s, S> {
    pub fn new(surface: &'s mut S, cursor: LayoutCursor) -> Self {
        let page = surface.page_geometry();
        Self {
            surface,
            page,
            cursor,
            active_font: None,
            pages_added: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    /// Pages this paginator requested from the surface.
    pub fn pages_added(&self) -> usize {
        self.pages_added
    }

    /// Makes room for a unit `required` points tall, breaking to a new page
    /// if it would cross the bottom margin.
    ///
    /// # Errors
    ///
    /// `ElementTooLarge` when the unit is taller than a whole page's content
    /// area; callers with splittable content must check that first. Surface
    /// errors from `add_page`.
    pub fn ensure_space(&mut self, required: f32) -> Result<(), LayoutError> {
        if !check_child_fit(self.cursor.y, required, &self.page).should_break {
            return Ok(());
        }

        let content_height = self.page.content_height();
        if required > content_height + EPSILON {
            return Err(LayoutError::ElementTooLarge(required, content_height));
        }

        self.break_page()?;
        log::debug!(
            "Page break before unit of {:.2}pt, cursor reset to ({:.2}, {:.2})",
            required,
            self.cursor.x,
            self.cursor.y
        );
        Ok(())
    }

    /// Whether nothing has been placed below the top margin yet.
    pub fn at_page_top(&self) -> bool {
        self.cursor.y <= self.page.margin_top + EPSILON
    }

    /// Starts a new page and moves the cursor to its origin.
    pub fn break_page(&mut self) -> Result<(), LayoutError> {
        self.surface.add_page()?;
        self.pages_added += 1;
        self.page = self.surface.page_geometry();
        self.cursor = self.page.origin();
        Ok(())
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    /// Draws every item of `line` with its top edge at `y`, offset by `x`.
    pub fn draw_line(&mut self, line: &LineLayout, x: f32, y: f32, size: f32) -> Result<(), LayoutError> {
        for item in &line.items {
            self.select_font(&item.font, size)?;
            self.surface.draw_text(x + item.x, y, &item.text)?;
        }
        Ok(())
    }

    fn select_font(&mut self, font: &FontId, size: f32) -> Result<(), LayoutError> {
        if self
            .active_font
            .as_ref()
            .is_some_and(|(active, active_size)| active == font && *active_size == size)
        {
            return Ok(());
        }
        self.surface.set_font(font, size)?;
        self.active_font = Some((font.clone(), size));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_within_epsilon() {
        let page = PageGeometry::new(100.0, 100.0).with_margins(10.0, 10.0, 10.0, 10.0);
        assert!(!check_child_fit(80.0, 10.005, &page).should_break);
        assert!(check_child_fit(80.0, 10.5, &page).should_break);
    }

    #[test]
    fn break_page_resets_the_cursor() {
        let mut surface = crate::test_utils::RecordingSurface::new();
        let mut paginator = Paginator::new(&mut surface, LayoutCursor::new(10.0, 10.0));
        assert!(paginator.at_page_top());

        paginator.advance(50.0);
        assert!(!paginator.at_page_top());
        paginator.break_page().unwrap();

        assert!(paginator.at_page_top());
        assert_eq!(paginator.cursor(), LayoutCursor::new(10.0, 10.0));
        assert_eq!(paginator.pages_added(), 1);
    }

    #[test]
    fn cursor_past_the_limit_always_breaks() {
        let page = PageGeometry::new(100.0, 100.0);
        let analysis = check_child_fit(150.0, 1.0, &page);
        assert!(analysis.should_break);
        assert_eq!(analysis.remaining_height, 0.0);
    }
}
