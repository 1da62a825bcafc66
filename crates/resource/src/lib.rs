//! Document stores for the ficopdf watcher.
//!
//! ## Available Stores
//!
//! - [`FilesystemDocumentStore`]: A flat directory on the local filesystem
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory store from ficopdf-traits:
//! - [`InMemoryDocumentStore`]: Pre-populated in-memory storage

mod filesystem;

pub use filesystem::FilesystemDocumentStore;

pub use ficopdf_traits::InMemoryDocumentStore;
