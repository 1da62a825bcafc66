//! Splits raw lines into styled runs.
//!
//! Style state is a single "current font" register. It starts at the base
//! font for every line (or table cell) and is dropped when the line ends,
//! so styling never carries over from one line to the next.

mod delimiter;
mod tags;

use ficopdf_style::{FontId, MarkupSyntax, StyleRuleTable};
use tags::TagSet;

/// A contiguous span of text sharing one font, or an explicit line break.
#[derive(Debug, Clone, PartialEq)]
pub enum StyledRun {
    Text { text: String, font: FontId },
    LineBreak,
}

impl StyledRun {
    pub fn text(text: impl Into<String>, font: impl Into<FontId>) -> Self {
        StyledRun::Text {
            text: text.into(),
            font: font.into(),
        }
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, StyledRun::LineBreak)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyledRun::Text { text, .. } => Some(text),
            StyledRun::LineBreak => None,
        }
    }

    pub fn font(&self) -> Option<&FontId> {
        match self {
            StyledRun::Text { font, .. } => Some(font),
            StyledRun::LineBreak => None,
        }
    }
}

/// Lexes lines under one marker syntax and rule table.
#[derive(Debug)]
pub struct InlineLexer<'r> {
    rules: &'r StyleRuleTable,
    syntax: MarkupSyntax,
    tags: TagSet,
}

impl<'r> InlineLexer<'r> {
    pub fn new(rules: &'r StyleRuleTable, syntax: MarkupSyntax) -> Self {
        Self {
            rules,
            syntax,
            tags: TagSet::new(rules),
        }
    }

    pub fn rules(&self) -> &StyleRuleTable {
        self.rules
    }

    /// Lexes one line starting in the table's default font.
    pub fn lex_line(&self, line: &str) -> Vec<StyledRun> {
        self.lex_line_from(line, self.rules.default_font())
    }

    /// Lexes one line starting in `base`. Closing markers revert to `base`.
    pub fn lex_line_from(&self, line: &str, base: &FontId) -> Vec<StyledRun> {
        let builder = RunBuilder::new(base);
        match self.syntax {
            MarkupSyntax::Delimiter => delimiter::lex(line, self.rules, builder),
            MarkupSyntax::Tags => tags::lex(line, self.rules, &self.tags, builder),
        }
    }

    /// Lexes text that may span several lines, such as a table cell.
    ///
    /// Each line is lexed independently and the lines are joined with
    /// [`StyledRun::LineBreak`].
    pub fn lex_block_from(&self, text: &str, base: &FontId) -> Vec<StyledRun> {
        let mut runs = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                runs.push(StyledRun::LineBreak);
            }
            runs.extend(self.lex_line_from(line, base));
        }
        runs
    }
}

/// Accumulates characters into the pending run and flushes it on style
/// changes. Empty runs are never emitted.
#[derive(Debug)]
pub(crate) struct RunBuilder<'a> {
    base: &'a FontId,
    current: FontId,
    pending: String,
    runs: Vec<StyledRun>,
}

impl<'a> RunBuilder<'a> {
    pub(crate) fn new(base: &'a FontId) -> Self {
        Self {
            base,
            current: base.clone(),
            pending: String::new(),
            runs: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, ch: char) {
        self.pending.push(ch);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    /// Emits the pending text, merging it into the previous run when a
    /// toggle pair left the font unchanged.
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if let Some(StyledRun::Text { text, font }) = self.runs.last_mut()
            && *font == self.current
        {
            text.push_str(&self.pending);
            self.pending.clear();
        } else {
            self.runs.push(StyledRun::Text {
                text: std::mem::take(&mut self.pending),
                font: self.current.clone(),
            });
        }
    }

    /// Switches to `font`, or back to the base font if `font` is active.
    pub(crate) fn toggle(&mut self, font: &FontId) {
        self.flush();
        self.current = if self.current == *font {
            self.base.clone()
        } else {
            font.clone()
        };
    }

    pub(crate) fn switch(&mut self, font: &FontId) {
        self.flush();
        self.current = font.clone();
    }

    pub(crate) fn revert(&mut self) {
        self.flush();
        self.current = self.base.clone();
    }

    pub(crate) fn line_break(&mut self) {
        self.flush();
        self.runs.push(StyledRun::LineBreak);
    }

    pub(crate) fn finish(mut self) -> Vec<StyledRun> {
        self.flush();
        self.runs
    }
}
