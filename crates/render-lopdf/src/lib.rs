//! PDF output for ficopdf using lopdf.
//!
//! [`LopdfSurface`] implements the layout engine's drawing-surface traits,
//! collecting text operations per page and serializing the document when
//! [`LopdfSurface::finish`] is called.

mod cmap;
mod encoding;
mod error;
mod fonts;
mod surface;

pub use encoding::encode_win_ansi;
pub use error::RenderError;
pub use fonts::{BuiltinFont, FontMetrics, FontSource, TrueTypeFont};
pub use surface::LopdfSurface;
