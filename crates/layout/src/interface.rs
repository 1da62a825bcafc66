use crate::algorithms::pagination::Paginator;
use crate::config::LayoutConfig;
use crate::fonts::FontResolver;
use crate::text::lexer::{InlineLexer, StyledRun};
use crate::text::wrapper::{LineLayout, break_lines};
use crate::LayoutError;
use ficopdf_style::{FontId, StyleRuleTable};
use ficopdf_traits::DrawingSurface;
use ficopdf_types::{LayoutCursor, PageGeometry};

/// Per-render state shared by the layout nodes: the lexer, the font
/// resolver and the paginator that owns the cursor.
///
/// A context lives for exactly one `render_*` call, so the cursor and the
/// active font never carry over between documents.
pub struct LayoutContext<'a, S: DrawingSurface + ?Sized> {
    pub config: &'a LayoutConfig,
    lexer: InlineLexer<'a>,
    fonts: FontResolver,
    paginator: Paginator<'a, S>,
}

impl<'a, S: DrawingSurface + ?Sized> LayoutContext<'a, S> {
    pub fn new(
        config: &'a LayoutConfig,
        rules: &'a StyleRuleTable,
        surface: &'a mut S,
        start: LayoutCursor,
    ) -> Result<Self, LayoutError> {
        let fonts = FontResolver::new(rules.default_font(), &*surface)?;
        Ok(Self {
            config,
            lexer: InlineLexer::new(rules, config.markup),
            fonts,
            paginator: Paginator::new(surface, start),
        })
    }

    pub fn default_font(&self) -> &FontId {
        self.fonts.default_font()
    }

    pub fn page(&self) -> &PageGeometry {
        self.paginator.page()
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.paginator.cursor()
    }

    pub fn line_height(&self) -> f32 {
        self.config.line_height
    }

    pub fn paginator(&mut self) -> &mut Paginator<'a, S> {
        &mut self.paginator
    }

    /// Lexes one source line starting in `base`.
    pub fn lex_line(&self, line: &str, base: &FontId) -> Vec<StyledRun> {
        self.lexer.lex_line_from(line, base)
    }

    /// Lexes multi-line cell text starting in `base`.
    pub fn lex_block(&self, text: &str, base: &FontId) -> Vec<StyledRun> {
        self.lexer.lex_block_from(text, base)
    }

    /// Resolves fonts against the surface and wraps `runs` to `max_width`.
    pub fn wrap(&mut self, runs: Vec<StyledRun>, max_width: f32) -> Result<Vec<LineLayout>, LayoutError> {
        let measurer = self.paginator.surface();
        let runs = self.fonts.resolve_runs(runs, measurer);
        break_lines(&runs, measurer, self.config.font_size, max_width)
    }

    /// Draws `line` with its top at `y`, offset by `x`.
    pub fn draw_line(&mut self, line: &LineLayout, x: f32, y: f32) -> Result<(), LayoutError> {
        let size = self.config.font_size;
        self.paginator.draw_line(line, x, y, size)
    }
}
