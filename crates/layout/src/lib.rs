use ficopdf_traits::SurfaceError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Node has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
    #[error("Drawing surface failed: {0}")]
    Surface(#[from] SurfaceError),
}

pub(crate) mod engine;
pub use self::engine::LayoutEngine;
pub use self::interface::LayoutContext;

pub mod algorithms;
pub mod config;
pub mod fonts;
pub mod interface;
pub mod nodes;
pub mod text;

pub use self::config::{LayoutConfig, TableStyle};
pub use self::fonts::FontResolver;
pub use self::text::lexer::{InlineLexer, StyledRun};
pub use self::text::wrapper::{LineItem, LineLayout};

pub use ficopdf_types::{LayoutCursor, PageGeometry, TableModel};

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod text_test;
