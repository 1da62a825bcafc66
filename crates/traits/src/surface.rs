//! The drawing-surface capability the layout engine renders through.
//!
//! The engine never produces PDF itself. It measures text and issues
//! drawing calls against these traits, which keeps it testable with a fake
//! measurer and independent of any particular PDF backend.
//!
//! A surface instance is not reentrant: one render drives it at a time.

use ficopdf_style::FontId;
use ficopdf_types::PageGeometry;
use thiserror::Error;

/// Failures reported by a surface. They abort the current document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("No page has been added to the surface")]
    NoPage,

    #[error("Font '{0}' is not registered with the surface")]
    UnknownFont(String),

    #[error("Font '{font}' could not be loaded: {message}")]
    InvalidFont { font: String, message: String },

    #[error("Surface backend error: {0}")]
    Backend(String),
}

/// Measures text in a given font and size.
pub trait TextMeasurer {
    /// Width in points of `text` set in `font` at `size`.
    fn text_width(&self, text: &str, font: &FontId, size: f32) -> Result<f32, SurfaceError>;

    /// Whether `font` can be measured and drawn.
    fn has_font(&self, font: &FontId) -> bool;
}

/// Places text on pages.
///
/// Coordinates are in points from the top-left corner of the page; `y` is
/// the top of the line box being drawn.
pub trait DrawingSurface: TextMeasurer {
    fn set_font(&mut self, font: &FontId, size: f32) -> Result<(), SurfaceError>;

    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), SurfaceError>;

    /// Starts a new page; later drawing goes to it.
    fn add_page(&mut self) -> Result<(), SurfaceError>;

    /// Bounds and margins of the current page.
    fn page_geometry(&self) -> PageGeometry;
}
