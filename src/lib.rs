//! ficopdf: converts styled plain text and CSV files into PDFs.
//!
//! The layout itself lives in `ficopdf-layout`; this crate wires it to the
//! lopdf surface, a JSON configuration and a polling watcher over a
//! [`DocumentStore`].

pub mod config;
pub mod converter;
pub mod error;
pub mod source;
pub mod watcher;

pub use config::{AppConfig, ConfigError};
pub use converter::Converter;
pub use error::PipelineError;
pub use watcher::{PassReport, Watcher};

pub use ficopdf_layout::{LayoutConfig, LayoutEngine, LayoutError};
pub use ficopdf_resource::FilesystemDocumentStore;
pub use ficopdf_traits::{DocumentStore, InMemoryDocumentStore, StoreError};
pub use ficopdf_types::{LayoutCursor, PageGeometry, TableModel};
