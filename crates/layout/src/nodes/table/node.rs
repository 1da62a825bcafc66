use crate::algorithms::pagination::EPSILON;
use crate::nodes::table_solver::TableSolver;
use crate::text::wrapper::LineLayout;
use crate::{LayoutContext, LayoutError};
use ficopdf_style::FontId;
use ficopdf_traits::DrawingSurface;
use ficopdf_types::{LayoutCursor, TableModel};

/// A table laid out with uniform column widths.
///
/// Each row is measured first (every cell wrapped, nothing drawn) and then
/// drawn as a unit: a row is moved to the next page whole. Only a row taller
/// than a page's content area is split, line band by line band.
#[derive(Debug, Clone, Copy)]
pub struct TableNode<'a> {
    pub table: &'a TableModel,
    pub origin: LayoutCursor,
}

impl<'a> TableNode<'a> {
    pub fn new(table: &'a TableModel, origin: LayoutCursor) -> Self {
        Self { table, origin }
    }

    /// Lays out the header row and the body rows, returning the cursor
    /// below the last row. Tables without columns draw nothing.
    pub fn layout<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
    ) -> Result<LayoutCursor, LayoutError> {
        let columns = self.table.column_count();
        if columns == 0 {
            log::debug!("Table has no columns, nothing to lay out");
            return Ok(self.origin);
        }

        let solver = TableSolver::new(
            columns,
            ctx.page().content_width(),
            ctx.config.table.cell_padding,
        );
        let wrap_width = solver.wrap_width()?;
        let body_font = ctx.default_font().clone();

        if self.table.has_headers() {
            let header_font = ctx
                .config
                .table
                .header_font
                .clone()
                .unwrap_or_else(|| body_font.clone());
            self.layout_row(ctx, &solver, wrap_width, &self.table.headers, &header_font)?;
        }
        for row in &self.table.rows {
            self.layout_row(ctx, &solver, wrap_width, row, &body_font)?;
        }

        Ok(LayoutCursor::new(self.origin.x, ctx.cursor().y))
    }

    fn layout_row<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        solver: &TableSolver,
        wrap_width: f32,
        row: &[String],
        base: &FontId,
    ) -> Result<(), LayoutError> {
        let columns = self.table.column_count();
        let line_height = ctx.line_height();

        let mut cells = Vec::with_capacity(columns);
        for col in 0..columns {
            let runs = ctx.lex_block(TableModel::cell(row, col), base);
            cells.push(ctx.wrap(runs, wrap_width)?);
        }

        let row_height = TableSolver::row_height(&cells, line_height);
        let content_height = ctx.page().content_height();
        if row_height > content_height + EPSILON {
            log::warn!(
                "Table row of {:.2}pt exceeds the page content height of {:.2}pt, splitting it across pages",
                row_height,
                content_height
            );
            return self.layout_split_row(ctx, solver, &cells);
        }
        ctx.paginator().ensure_space(row_height)?;

        let top = ctx.cursor().y;
        for (col, lines) in cells.iter().enumerate() {
            let x = self.origin.x + solver.text_offset(col);
            for (i, line) in lines.iter().enumerate() {
                ctx.draw_line(line, x, top + i as f32 * line_height)?;
            }
        }
        ctx.paginator().advance(row_height);
        Ok(())
    }

    /// Draws a row that cannot fit on any page one line band at a time,
    /// starting on a fresh page.
    fn layout_split_row<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        solver: &TableSolver,
        cells: &[Vec<LineLayout>],
    ) -> Result<(), LayoutError> {
        let line_height = ctx.line_height();
        if !ctx.paginator().at_page_top() {
            ctx.paginator().break_page()?;
        }

        let bands = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        for band in 0..bands {
            ctx.paginator().ensure_space(line_height)?;
            let y = ctx.cursor().y;
            for (col, lines) in cells.iter().enumerate() {
                if let Some(line) = lines.get(band) {
                    ctx.draw_line(line, self.origin.x + solver.text_offset(col), y)?;
                }
            }
            ctx.paginator().advance(line_height);
        }
        Ok(())
    }
}
