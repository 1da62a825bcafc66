//! Style rules map inline markers to fonts.
//!
//! A rule's marker is a literal delimiter (`**`) under the delimiter-toggle
//! syntax, or a tag name (`bold`) under the tag syntax. Rules are kept in
//! declaration order and matched first-match-wins, so two rules sharing a
//! marker resolve to the earlier one.

use crate::error::StyleError;
use crate::font::FontId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "delimiter", alias = "tag")]
    pub marker: String,
    pub font: FontId,
}

impl StyleRule {
    pub fn new(name: impl Into<String>, marker: impl Into<String>, font: impl Into<FontId>) -> Self {
        Self {
            name: name.into(),
            marker: marker.into(),
            font: font.into(),
        }
    }
}

/// An ordered, immutable set of [`StyleRule`]s plus the default font.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRuleTable {
    rules: Vec<StyleRule>,
    default_font: FontId,
}

impl StyleRuleTable {
    /// Builds a table, rejecting rules whose marker is empty.
    pub fn new(rules: Vec<StyleRule>) -> Result<Self, StyleError> {
        if let Some(rule) = rules.iter().find(|r| r.marker.is_empty()) {
            return Err(StyleError::EmptyMarker(rule.name.clone()));
        }
        Ok(Self {
            rules,
            default_font: FontId::normal(),
        })
    }

    pub fn with_default_font(mut self, font: impl Into<FontId>) -> Self {
        self.default_font = font.into();
        self
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn default_font(&self) -> &FontId {
        &self.default_font
    }

    /// Returns the first rule whose marker equals `marker`.
    pub fn lookup(&self, marker: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.marker == marker)
    }

    /// Resolves a marker to its font.
    ///
    /// Unknown markers resolve to the default font and log a warning; they
    /// never fail the document.
    pub fn resolve(&self, marker: &str) -> &FontId {
        match self.lookup(marker) {
            Some(rule) => &rule.font,
            None => {
                log::warn!(
                    "No style rule for '{}', using default font '{}'",
                    marker,
                    self.default_font
                );
                &self.default_font
            }
        }
    }

    /// Resolves a tag name to its font.
    ///
    /// Tag markers are compared ASCII case-insensitively. When no marker
    /// matches, a rule whose name matches is used, so `<bold>` finds a rule
    /// named `bold` even if its marker is a delimiter such as `**`.
    pub fn resolve_tag(&self, tag: &str) -> &FontId {
        let rule = self
            .rules
            .iter()
            .find(|r| r.marker.eq_ignore_ascii_case(tag))
            .or_else(|| self.rules.iter().find(|r| r.name.eq_ignore_ascii_case(tag)));
        match rule {
            Some(rule) => &rule.font,
            None => {
                log::warn!(
                    "No style rule for tag <{}>, using default font '{}'",
                    tag,
                    self.default_font
                );
                &self.default_font
            }
        }
    }

    /// Returns the marker of the first rule that `text` starts with. Pass it
    /// to [`StyleRuleTable::resolve`] for the font.
    pub fn match_marker(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .map(|r| r.marker.as_str())
            .find(|marker| text.starts_with(marker))
    }

    /// Every font id the table can produce, default first, without repeats.
    pub fn fonts(&self) -> Vec<&FontId> {
        let mut fonts = vec![&self.default_font];
        for rule in &self.rules {
            if !fonts.contains(&&rule.font) {
                fonts.push(&rule.font);
            }
        }
        fonts
    }
}

impl Default for StyleRuleTable {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_font: FontId::normal(),
        }
    }
}
