use crate::{LayoutContext, LayoutError};
use ficopdf_traits::DrawingSurface;

/// Free-flowing styled text. Every source line is lexed on its own and
/// wrapped to the content width; an empty source line still takes one line
/// of vertical space.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphNode<'a> {
    pub text: &'a str,
}

impl<'a> ParagraphNode<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn layout<S: DrawingSurface + ?Sized>(&self, ctx: &mut LayoutContext<'_, S>) -> Result<(), LayoutError> {
        let line_height = ctx.line_height();
        let default_font = ctx.default_font().clone();

        for source_line in self.text.lines() {
            let runs = ctx.lex_line(source_line, &default_font);
            let max_width = ctx.page().content_width();
            for line in ctx.wrap(runs, max_width)? {
                ctx.paginator().ensure_space(line_height)?;
                let left = ctx.page().margin_left;
                let top = ctx.cursor().y;
                ctx.draw_line(&line, left, top)?;
                ctx.paginator().advance(line_height);
            }
        }
        Ok(())
    }
}
