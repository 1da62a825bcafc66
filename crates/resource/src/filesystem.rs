//! Filesystem-backed document store.
//!
//! # Security
//!
//! Document names are plain file names. Anything containing a path
//! separator, a parent reference or an absolute prefix is rejected, so the
//! store can never read or write outside its directory.

use ficopdf_traits::{DocumentStore, StoreError};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A document store over a single directory.
///
/// Subdirectories are not descended into. Writes go to a hidden temporary
/// file first and are renamed into place, so a listing never sees a
/// half-written document.
#[derive(Debug)]
pub struct FilesystemDocumentStore {
    base_path: PathBuf,
}

impl FilesystemDocumentStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Like [`FilesystemDocumentStore::new`], creating the directory if needed.
    pub fn create<P: AsRef<Path>>(base_path: P) -> Result<Self, StoreError> {
        fs::create_dir_all(base_path.as_ref())?;
        Ok(Self::new(base_path))
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves `name` inside the base directory.
    fn resolve_path_safe(&self, name: &str) -> Result<PathBuf, StoreError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Ok(self.base_path.join(file)),
            _ => Err(StoreError::InvalidName(name.to_string())),
        }
    }

    fn access_failed(name: &str, err: std::io::Error) -> StoreError {
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(name.to_string())
        } else {
            StoreError::AccessFailed {
                name: name.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl DocumentStore for FilesystemDocumentStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| Self::access_failed(&self.base_path.display().to_string(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => names.push(name),
                Ok(_) => {}
                Err(raw) => log::warn!("Skipping file with non UTF-8 name: {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve_path_safe(name)?;
        fs::read(&path).map_err(|e| Self::access_failed(name, e))
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve_path_safe(name)?;
        let staging = self.base_path.join(format!(".{}.partial", name));
        fs::write(&staging, data).map_err(|e| Self::access_failed(name, e))?;
        if let Err(err) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(Self::access_failed(name, err));
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve_path_safe(name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemDocumentStore"
    }
}
