use crate::config::ConfigError;
use ficopdf_layout::LayoutError;
use ficopdf_render_lopdf::RenderError;
use ficopdf_style::StyleError;
use ficopdf_traits::StoreError;
use thiserror::Error;

/// A comprehensive error type for converting and watching documents.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Style rules are invalid: {0}")]
    Style(#[from] StyleError),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported input '{0}': expected a .txt or .csv file")]
    UnsupportedInput(String),
}
