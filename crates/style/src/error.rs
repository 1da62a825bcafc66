use thiserror::Error;

/// Errors raised while building style configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Style rule '{0}' has an empty delimiter or tag")]
    EmptyMarker(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),

    #[error("Unknown unit '{0}', expected one of pt, mm, cm, in")]
    UnknownUnit(String),
}
