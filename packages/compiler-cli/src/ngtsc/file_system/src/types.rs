use std::io;
use std::path::Path;

use super::util::normalize;

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: impl Into<String>) -> Self {
        AbsoluteFsPath(path.into())
    }

    /// Build from a native path, converting separators and collapsing `.`/`..` segments.
    pub fn from<P: AsRef<Path>>(path: P) -> Self {
        AbsoluteFsPath(normalize(&path.as_ref().to_string_lossy()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information about an object in the FileSystem.
/// This is analogous to the `fs.Stats` class in Node.js.
#[derive(Debug, Clone, Copy)]
pub struct FileStats {
    pub is_file: bool,
    pub is_directory: bool,
}

impl FileStats {
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }
}

/// An abstraction over the read-only aspects of a file-system.
pub trait ReadonlyFileSystem {
    fn is_case_sensitive(&self) -> bool;
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats>;
    fn pwd(&self) -> AbsoluteFsPath;

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        self.stat(path).map(|s| s.is_file()).unwrap_or(false)
    }

    fn is_directory(&self, path: &AbsoluteFsPath) -> bool {
        self.stat(path).map(|s| s.is_directory()).unwrap_or(false)
    }
}

/// A basic interface to abstract the underlying file-system.
pub trait FileSystem: ReadonlyFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()>;
    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()>;
}
