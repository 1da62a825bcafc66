//! Maps logical font ids from the rule table onto fonts the surface has.
//!
//! A rule may reference a font that was never registered. Such ids resolve
//! to the default font with a single warning per id, so one bad rule
//! degrades the styling of a document instead of failing it.

use crate::LayoutError;
use crate::text::lexer::StyledRun;
use ficopdf_style::FontId;
use ficopdf_traits::{SurfaceError, TextMeasurer};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FontResolver {
    default: FontId,
    resolved: HashMap<FontId, FontId>,
}

impl FontResolver {
    /// # Errors
    ///
    /// Fails with `SurfaceError::UnknownFont` if the measurer does not know
    /// the default font, since there is nothing left to fall back to.
    pub fn new<M: TextMeasurer + ?Sized>(default: &FontId, measurer: &M) -> Result<Self, LayoutError> {
        if !measurer.has_font(default) {
            return Err(SurfaceError::UnknownFont(default.to_string()).into());
        }
        Ok(Self {
            default: default.clone(),
            resolved: HashMap::new(),
        })
    }

    pub fn default_font(&self) -> &FontId {
        &self.default
    }

    pub fn resolve<M: TextMeasurer + ?Sized>(&mut self, font: &FontId, measurer: &M) -> FontId {
        if *font == self.default {
            return font.clone();
        }
        if let Some(found) = self.resolved.get(font) {
            return found.clone();
        }
        let target = if measurer.has_font(font) {
            font.clone()
        } else {
            log::warn!(
                "Font '{}' is not registered, falling back to '{}'",
                font,
                self.default
            );
            self.default.clone()
        };
        self.resolved.insert(font.clone(), target.clone());
        target
    }

    pub fn resolve_runs<M: TextMeasurer + ?Sized>(
        &mut self,
        runs: Vec<StyledRun>,
        measurer: &M,
    ) -> Vec<StyledRun> {
        runs.into_iter()
            .map(|run| match run {
                StyledRun::Text { text, font } => StyledRun::Text {
                    font: self.resolve(&font, measurer),
                    text,
                },
                StyledRun::LineBreak => StyledRun::LineBreak,
            })
            .collect()
    }
}
