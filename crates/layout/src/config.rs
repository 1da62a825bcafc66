use crate::LayoutError;
use ficopdf_style::{FontId, MarkupSyntax};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Font size in points used for every run.
    pub font_size: f32,
    /// Vertical advance per wrapped line, in points.
    ///
    /// Defaults to `1.5 * font_size`.
    pub line_height: f32,
    /// The inline marker syntax raw text is written in.
    pub markup: MarkupSyntax,
    pub table: TableStyle,
}

impl LayoutConfig {
    pub fn with_font_size(font_size: f32) -> Self {
        Self {
            font_size,
            line_height: font_size * 1.5,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if !(self.table.cell_padding.is_finite() && self.table.cell_padding >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "cell padding must not be negative, got {}",
                self.table.cell_padding
            )));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            line_height: 16.5,
            markup: MarkupSyntax::default(),
            table: TableStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    /// Font the header row starts in. `None` uses the document default.
    pub header_font: Option<FontId>,
    /// Horizontal inset applied on both sides of every cell.
    pub cell_padding: f32,
}
