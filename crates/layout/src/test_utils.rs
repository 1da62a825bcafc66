use crate::{LayoutConfig, LayoutEngine};
use ficopdf_style::{FontId, StyleRule, StyleRuleTable};
use ficopdf_traits::{DrawingSurface, SurfaceError, TextMeasurer};
use ficopdf_types::PageGeometry;
use std::collections::HashSet;

/// Width of every character, in points, regardless of font or size.
pub const CHAR_WIDTH: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFont(FontId),
    Text {
        page: usize,
        x: f32,
        y: f32,
        text: String,
        font: FontId,
    },
    AddPage,
}

/// A fake surface with a fixed per-character width that records every
/// call made to it.
#[derive(Debug)]
pub struct RecordingSurface {
    pub geometry: PageGeometry,
    pub commands: Vec<DrawCommand>,
    fonts: HashSet<FontId>,
    font: Option<FontId>,
    pages: usize,
    fail_on_draw: bool,
}

impl RecordingSurface {
    /// A 200x200pt page with 10pt margins and one page already added.
    pub fn new() -> Self {
        Self {
            geometry: PageGeometry::new(200.0, 200.0).with_margins(10.0, 10.0, 10.0, 10.0),
            commands: Vec::new(),
            fonts: ["normal", "bold", "italic"].into_iter().map(FontId::from).collect(),
            font: None,
            pages: 1,
            fail_on_draw: false,
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_fonts(mut self, fonts: &[&str]) -> Self {
        self.fonts = fonts.iter().map(|f| FontId::from(*f)).collect();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_on_draw = true;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// All drawn text commands as `(page, x, y, text, font)`.
    pub fn texts(&self) -> Vec<(usize, f32, f32, &str, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { page, x, y, text, font } => {
                    Some((*page, *x, *y, text.as_str(), font.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Concatenation of every drawn string.
    pub fn drawn_text(&self) -> String {
        self.texts().into_iter().map(|t| t.3).collect()
    }
}

impl TextMeasurer for RecordingSurface {
    fn text_width(&self, text: &str, font: &FontId, _size: f32) -> Result<f32, SurfaceError> {
        if !self.fonts.contains(font) {
            return Err(SurfaceError::UnknownFont(font.to_string()));
        }
        Ok(text.chars().count() as f32 * CHAR_WIDTH)
    }

    fn has_font(&self, font: &FontId) -> bool {
        self.fonts.contains(font)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_font(&mut self, font: &FontId, _size: f32) -> Result<(), SurfaceError> {
        if !self.fonts.contains(font) {
            return Err(SurfaceError::UnknownFont(font.to_string()));
        }
        self.font = Some(font.clone());
        self.commands.push(DrawCommand::SetFont(font.clone()));
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), SurfaceError> {
        if self.fail_on_draw {
            return Err(SurfaceError::Backend("draw rejected".into()));
        }
        let font = self.font.clone().ok_or(SurfaceError::UnknownFont(String::new()))?;
        self.commands.push(DrawCommand::Text {
            page: self.pages,
            x,
            y,
            text: text.to_string(),
            font,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), SurfaceError> {
        self.pages += 1;
        self.commands.push(DrawCommand::AddPage);
        Ok(())
    }

    fn page_geometry(&self) -> PageGeometry {
        self.geometry
    }
}

pub fn bold_italic_rules() -> StyleRuleTable {
    StyleRuleTable::new(vec![
        StyleRule::new("bold", "**", "bold"),
        StyleRule::new("italic", "__", "italic"),
    ])
    .unwrap()
}

/// An engine with 10pt lines and `**`/`__` rules.
pub fn create_test_engine() -> LayoutEngine {
    let config = LayoutConfig {
        font_size: 10.0,
        line_height: 10.0,
        ..LayoutConfig::default()
    };
    LayoutEngine::new(config, bold_italic_rules()).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
