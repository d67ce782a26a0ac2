// Resource Loader
//
// Loads external resources (templates, styles, translation files).

use std::sync::Arc;

use thiserror::Error;

use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};

/// Resource load error.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Compilation failed. Resource file not found: {url}")]
    NotFound { url: String },

    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },
}

impl ResourceError {
    pub fn not_found(url: &str) -> Self {
        Self::NotFound {
            url: url.to_string(),
        }
    }

    pub fn load_failed(url: &str, reason: &str) -> Self {
        Self::LoadFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The resource the error is about.
    pub fn url(&self) -> &str {
        match self {
            Self::NotFound { url } | Self::LoadFailed { url, .. } => url,
        }
    }
}

/// Resource loader trait.
pub trait ResourceLoader {
    fn can_preload(&self, url: &str) -> bool;
    fn load(&self, url: &str) -> Result<String, ResourceError>;
}

/// Loads resources through the compilation's file system.
pub struct FileSystemResourceLoader {
    fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
}

impl FileSystemResourceLoader {
    pub fn new(fs: Arc<dyn ReadonlyFileSystem + Send + Sync>) -> Self {
        Self { fs }
    }
}

impl ResourceLoader for FileSystemResourceLoader {
    fn can_preload(&self, url: &str) -> bool {
        self.fs.is_file(&AbsoluteFsPath::new(url))
    }

    fn load(&self, url: &str) -> Result<String, ResourceError> {
        let path = AbsoluteFsPath::new(url);
        if !self.fs.is_file(&path) {
            return Err(ResourceError::not_found(url));
        }
        self.fs
            .read_file(&path)
            .map_err(|e| ResourceError::load_failed(url, &e.to_string()))
    }
}
