use crate::LayoutError;
use crate::text::wrapper::LineLayout;

/// Column and row sizing for uniform-width tables.
pub struct TableSolver {
    column_count: usize,
    available_width: f32,
    cell_padding: f32,
}

impl TableSolver {
    pub fn new(column_count: usize, available_width: f32, cell_padding: f32) -> Self {
        Self {
            column_count,
            available_width,
            cell_padding,
        }
    }

    /// Every column gets an equal share of the available width.
    pub fn column_width(&self) -> f32 {
        if self.column_count == 0 {
            return 0.0;
        }
        self.available_width / self.column_count as f32
    }

    /// Width text is wrapped to inside a cell, after padding on both sides.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` when padding leaves no room for text.
    pub fn wrap_width(&self) -> Result<f32, LayoutError> {
        let width = self.column_width() - 2.0 * self.cell_padding;
        if width <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "column width {:.2} leaves no room for text with {:.2} padding",
                self.column_width(),
                self.cell_padding
            )));
        }
        Ok(width)
    }

    /// Left edge of the text in column `col`, relative to the table origin.
    pub fn text_offset(&self, col: usize) -> f32 {
        col as f32 * self.column_width() + self.cell_padding
    }

    /// The tallest cell sets the row height, with a floor of one line.
    pub fn row_height(cells: &[Vec<LineLayout>], line_height: f32) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        lines as f32 * line_height
    }
}
