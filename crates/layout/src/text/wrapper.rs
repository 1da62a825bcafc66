use crate::LayoutError;
use crate::algorithms::pagination::EPSILON;
use crate::text::lexer::StyledRun;
use ficopdf_style::FontId;
use ficopdf_traits::TextMeasurer;

/// One wrapped output line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineLayout {
    pub items: Vec<LineItem>,
    /// Right edge of the last placed item, relative to the line start.
    pub width: f32,
}

impl LineLayout {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The visible text of the line, with a space wherever two items are
    /// separated by a gap.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut end: Option<f32> = None;
        for item in &self.items {
            if end.is_some_and(|end| item.x > end + EPSILON) {
                out.push(' ');
            }
            out.push_str(&item.text);
            end = Some(item.x + item.width);
        }
        out
    }
}

/// A placed fragment of text. `x` is relative to the start of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub x: f32,
    pub width: f32,
    pub text: String,
    pub font: FontId,
}

/// Greedily breaks `runs` into lines no wider than `max_width`.
///
/// Always returns at least one line; an empty input produces a single
/// empty line. Words wider than `max_width` are split between characters.
pub fn break_lines<M: TextMeasurer + ?Sized>(
    runs: &[StyledRun],
    measurer: &M,
    font_size: f32,
    max_width: f32,
) -> Result<Vec<LineLayout>, LayoutError> {
    let mut breaker = LineBreaker::new(measurer, font_size, max_width);
    for run in runs {
        match run {
            StyledRun::Text { text, font } => breaker.push_run(text, font)?,
            StyledRun::LineBreak => breaker.new_line(),
        }
    }
    Ok(breaker.finish())
}

struct LineBreaker<'m, M: TextMeasurer + ?Sized> {
    measurer: &'m M,
    font_size: f32,
    max_width: f32,
    lines: Vec<LineLayout>,
    current: LineLayout,
    /// Whitespace was seen since the last placed word.
    pending_space: bool,
}

impl<'m, M: TextMeasurer + ?Sized> LineBreaker<'m, M> {
    fn new(measurer: &'m M, font_size: f32, max_width: f32) -> Self {
        Self {
            measurer,
            font_size,
            max_width,
            lines: Vec::new(),
            current: LineLayout::default(),
            pending_space: false,
        }
    }

    fn measure(&self, text: &str, font: &FontId) -> Result<f32, LayoutError> {
        Ok(self.measurer.text_width(text, font, self.font_size)?)
    }

    fn push_run(&mut self, text: &str, font: &FontId) -> Result<(), LayoutError> {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let space_width = self.measure(" ", font)?;
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.place_word(word, font, space_width)?;
            if words.peek().is_some() {
                self.pending_space = true;
            }
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
        Ok(())
    }

    fn gap(&self, space_width: f32) -> f32 {
        if self.pending_space && !self.current.is_empty() {
            space_width
        } else {
            0.0
        }
    }

    fn place_word(&mut self, word: &str, font: &FontId, space_width: f32) -> Result<(), LayoutError> {
        let width = self.measure(word, font)?;
        let gap = self.gap(space_width);
        let spaced = gap > 0.0;
        self.pending_space = false;

        if self.current.width + gap + width <= self.max_width + EPSILON {
            let x = self.current.width + gap;
            self.push_item(x, width, word, font, spaced);
        } else if width <= self.max_width + EPSILON {
            self.new_line();
            self.push_item(0.0, width, word, font, false);
        } else {
            self.split_word(word, font, gap)?;
        }
        Ok(())
    }

    /// Places an overlong word chunk by chunk. Each chunk grows until the
    /// next character would overflow; a fresh line always takes at least
    /// one character.
    fn split_word(&mut self, word: &str, font: &FontId, gap: f32) -> Result<(), LayoutError> {
        let mut origin = if self.current.is_empty() {
            0.0
        } else {
            self.current.width + gap
        };
        let mut spaced = gap > 0.0;
        let mut chunk = String::new();
        let mut chunk_width = 0.0;
        let mut buf = [0u8; 4];

        for ch in word.chars() {
            let char_width = self.measure(ch.encode_utf8(&mut buf), font)?;
            if origin + chunk_width + char_width > self.max_width + EPSILON {
                if !chunk.is_empty() {
                    let text = std::mem::take(&mut chunk);
                    self.push_item(origin, chunk_width, &text, font, spaced);
                    chunk_width = 0.0;
                    self.new_line();
                    origin = 0.0;
                    spaced = false;
                } else if !self.current.is_empty() {
                    self.new_line();
                    origin = 0.0;
                    spaced = false;
                }
            }
            chunk.push(ch);
            chunk_width += char_width;
        }

        if !chunk.is_empty() {
            self.push_item(origin, chunk_width, &chunk, font, spaced);
        }
        Ok(())
    }

    /// Appends an item, folding it into the previous one when both share a
    /// font and are separated by a single space.
    fn push_item(&mut self, x: f32, width: f32, text: &str, font: &FontId, spaced: bool) {
        match self.current.items.last_mut() {
            Some(last) if spaced && last.font == *font => {
                last.text.push(' ');
                last.text.push_str(text);
                last.width = x + width - last.x;
            }
            _ => self.current.items.push(LineItem {
                x,
                width,
                text: text.to_string(),
                font: font.clone(),
            }),
        }
        self.current.width = x + width;
    }

    fn new_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.pending_space = false;
    }

    fn finish(mut self) -> Vec<LineLayout> {
        self.lines.push(self.current);
        self.lines
    }
}
