use ficopdf_traits::SurfaceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Font '{font}' could not be parsed: {message}")]
    InvalidFont { font: String, message: String },
    #[error("The document has no pages")]
    NoPages,
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<RenderError> for SurfaceError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidFont { font, message } => SurfaceError::InvalidFont { font, message },
            other => SurfaceError::Backend(other.to_string()),
        }
    }
}
