use crate::ngtsc::file_system::src::types::{
    AbsoluteFsPath, FileStats, FileSystem, ReadonlyFileSystem,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the real disk.
#[derive(Debug, Default)]
pub struct NodeJSReadonlyFileSystem {
    case_sensitive: Option<bool>,
}

impl NodeJSReadonlyFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override case sensitivity detection (mostly useful in tests).
    pub fn with_case_sensitivity(case_sensitive: bool) -> Self {
        Self {
            case_sensitive: Some(case_sensitive),
        }
    }
}

impl ReadonlyFileSystem for NodeJSReadonlyFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
            .unwrap_or(!cfg!(any(target_os = "macos", target_os = "windows")))
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        Path::new(path.as_str()).exists()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_str())
    }

    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats> {
        let meta = fs::metadata(path.as_str())?;
        Ok(FileStats {
            is_file: meta.is_file(),
            is_directory: meta.is_dir(),
        })
    }

    fn pwd(&self) -> AbsoluteFsPath {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        AbsoluteFsPath::from(cwd)
    }
}

/// Read/write access to the real disk.
#[derive(Debug, Default)]
pub struct NodeJSFileSystem {
    readonly: NodeJSReadonlyFileSystem,
}

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadonlyFileSystem for NodeJSFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.readonly.is_case_sensitive()
    }
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        self.readonly.exists(path)
    }
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        self.readonly.read_file(path)
    }
    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats> {
        self.readonly.stat(path)
    }
    fn pwd(&self) -> AbsoluteFsPath {
        self.readonly.pwd()
    }
}

impl FileSystem for NodeJSFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        fs::write(path.as_str(), data)
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::create_dir_all(path.as_str())
    }
}
