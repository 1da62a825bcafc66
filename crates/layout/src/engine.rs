use crate::config::LayoutConfig;
use crate::nodes::{ParagraphNode, TableNode};
use crate::text::lexer::InlineLexer;
use crate::text::wrapper::{LineLayout, break_lines};
use crate::{LayoutContext, LayoutError};
use ficopdf_style::StyleRuleTable;
use ficopdf_traits::{DrawingSurface, TextMeasurer};
use ficopdf_types::{LayoutCursor, PageGeometry, TableModel};

/// The entry point of the layout crate.
///
/// Owns the style rules and layout settings, and is otherwise stateless:
/// every render builds a fresh [`LayoutContext`] against the surface it is
/// given, so one engine can serve many documents, including from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    rules: StyleRuleTable,
}

impl LayoutEngine {
    /// # Errors
    ///
    /// `InvalidConfig` for a non-positive font size or line height, or
    /// negative cell padding.
    pub fn new(config: LayoutConfig, rules: StyleRuleTable) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn rules(&self) -> &StyleRuleTable {
        &self.rules
    }

    /// Renders raw styled text from the top of the current page.
    ///
    /// Returns the cursor below the last drawn line.
    pub fn render_text<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        raw: &str,
    ) -> Result<LayoutCursor, LayoutError> {
        let page = surface.page_geometry();
        self.check_geometry(&page)?;

        let mut ctx = LayoutContext::new(&self.config, &self.rules, surface, page.origin())?;
        ParagraphNode::new(raw).layout(&mut ctx)?;
        let cursor = ctx.cursor();
        log::debug!(
            "Rendered {} bytes of text over {} additional page(s)",
            raw.len(),
            ctx.paginator().pages_added()
        );
        Ok(cursor)
    }

    /// Renders `table` with its top-left corner at `origin`.
    ///
    /// Returns the cursor below the last row, at `origin.x`.
    pub fn render_table<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        table: &TableModel,
        origin: LayoutCursor,
    ) -> Result<LayoutCursor, LayoutError> {
        let page = surface.page_geometry();
        self.check_geometry(&page)?;

        let mut ctx = LayoutContext::new(&self.config, &self.rules, surface, origin)?;
        let cursor = TableNode::new(table, origin).layout(&mut ctx)?;
        log::debug!(
            "Rendered table of {} row(s) over {} additional page(s)",
            table.rows.len(),
            ctx.paginator().pages_added()
        );
        Ok(cursor)
    }

    /// Lexes and wraps one line of raw text without drawing it.
    ///
    /// Fonts are used as written; no fallback is applied.
    pub fn wrap_text<M: TextMeasurer + ?Sized>(
        &self,
        measurer: &M,
        line: &str,
        max_width: f32,
    ) -> Result<Vec<LineLayout>, LayoutError> {
        let runs = InlineLexer::new(&self.rules, self.config.markup).lex_line(line);
        break_lines(&runs, measurer, self.config.font_size, max_width)
    }

    fn check_geometry(&self, page: &PageGeometry) -> Result<(), LayoutError> {
        if page.content_width() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "content width must be positive, got {:.2}",
                page.content_width()
            )));
        }
        if page.content_height() < self.config.line_height {
            return Err(LayoutError::InvalidGeometry(format!(
                "content height {:.2} cannot hold a single {:.2}pt line",
                page.content_height(),
                self.config.line_height
            )));
        }
        Ok(())
    }
}
