//! DocumentStore trait for abstracting where source files come from and
//! where generated PDFs go.
//!
//! The watcher only sees flat file names inside one directory-like
//! location. Local directories, in-memory maps and remote sessions can all
//! sit behind this trait.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for store operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("Failed to access '{name}': {message}")]
    AccessFailed { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// A flat collection of named documents.
///
/// Implementations must be shareable across the watcher's worker threads.
pub trait DocumentStore: Send + Sync + Debug {
    /// Names of the regular, non-hidden documents currently in the store.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Creates or replaces `name`.
    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError>;

    fn exists(&self, name: &str) -> bool;

    /// Returns a human-readable name for this store (for logging).
    fn name(&self) -> &'static str;
}

/// An in-memory document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, replacing any previous one with the same name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessFailed` if the internal lock is poisoned.
    pub fn add(&self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<(), StoreError> {
        let name = name.into();
        let mut documents = self.documents.write().map_err(|_| StoreError::AccessFailed {
            name: name.clone(),
            message: "document store lock poisoned".to_string(),
        })?;
        documents.insert(name, data.into());
        Ok(())
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.documents.read().map(|d| d.is_empty()).unwrap_or(true)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::AccessFailed {
            name: String::new(),
            message: "document store lock poisoned".to_string(),
        })?;
        Ok(documents
            .keys()
            .filter(|name| !name.starts_with('.'))
            .cloned()
            .collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::AccessFailed {
            name: name.to_string(),
            message: "document store lock poisoned".to_string(),
        })?;
        documents
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        self.add(name, data)
    }

    fn exists(&self, name: &str) -> bool {
        self.documents
            .read()
            .map(|d| d.contains_key(name))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryDocumentStore"
    }
}
