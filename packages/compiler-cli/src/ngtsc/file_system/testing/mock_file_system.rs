use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::sync::{Arc, Mutex};

use crate::ngtsc::file_system::src::types::{
    AbsoluteFsPath, FileStats, FileSystem, ReadonlyFileSystem,
};
use crate::ngtsc::file_system::src::util::{dirname, normalize};

/// In-memory POSIX file system.
///
/// Clones share the same tree, so a test can keep a handle while the host under test owns
/// another one. Every successful `read_file` is counted per path.
#[derive(Clone)]
pub struct MockFileSystem {
    case_sensitive: bool,
    cwd: Arc<Mutex<AbsoluteFsPath>>,
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    folders: Arc<Mutex<BTreeSet<String>>>,
    reads: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockFileSystem {
    pub fn new(case_sensitive: bool) -> Self {
        let mut folders = BTreeSet::new();
        folders.insert("/".to_string());
        MockFileSystem {
            case_sensitive,
            cwd: Arc::new(Mutex::new(AbsoluteFsPath::new("/"))),
            files: Arc::new(Mutex::new(BTreeMap::new())),
            folders: Arc::new(Mutex::new(folders)),
            reads: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn new_posix() -> Self {
        Self::new(true)
    }

    /// Build a file system pre-populated with `(path, content)` pairs.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new_posix();
        fs.init_with_files(files);
        fs
    }

    pub fn init_with_files(&self, files: &[(&str, &str)]) {
        for (path, content) in files {
            self.add_file(path, content);
        }
    }

    /// Write a file, creating every parent folder on the way.
    pub fn add_file(&self, path: &str, content: &str) {
        let key = self.key(path);
        self.add_folder_chain(&dirname(&key));
        self.files
            .lock()
            .unwrap()
            .insert(key, content.as_bytes().to_vec());
    }

    /// How many times `path` has been read so far.
    pub fn read_count(&self, path: &str) -> usize {
        let key = self.key(path);
        self.reads.lock().unwrap().get(&key).copied().unwrap_or(0)
    }

    /// Total number of reads across all paths.
    pub fn total_reads(&self) -> usize {
        self.reads.lock().unwrap().values().sum()
    }

    pub fn chdir(&self, path: &AbsoluteFsPath) {
        *self.cwd.lock().unwrap() = path.clone();
    }

    fn key(&self, path: &str) -> String {
        let normalized = normalize(path);
        if self.case_sensitive {
            normalized
        } else {
            normalized.to_lowercase()
        }
    }

    fn add_folder_chain(&self, folder: &str) {
        let mut folders = self.folders.lock().unwrap();
        let mut current = folder.to_string();
        while folders.insert(current.clone()) {
            let parent = dirname(&current);
            if parent == current {
                break;
            }
            current = parent;
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new_posix()
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        let key = self.key(path.as_str());
        self.files.lock().unwrap().contains_key(&key) || self.folders.lock().unwrap().contains(&key)
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        let key = self.key(path.as_str());
        let bytes = match self.files.lock().unwrap().get(&key) {
            Some(bytes) => bytes.clone(),
            None if self.folders.lock().unwrap().contains(&key) => {
                return Err(io::Error::new(io::ErrorKind::Other, "Is a directory"));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ));
            }
        };
        *self.reads.lock().unwrap().entry(key).or_insert(0) += 1;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats> {
        let key = self.key(path.as_str());
        if self.files.lock().unwrap().contains_key(&key) {
            Ok(FileStats {
                is_file: true,
                is_directory: false,
            })
        } else if self.folders.lock().unwrap().contains(&key) {
            Ok(FileStats {
                is_file: false,
                is_directory: true,
            })
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "Path not found"))
        }
    }

    fn pwd(&self) -> AbsoluteFsPath {
        self.cwd.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        let key = self.key(path.as_str());
        if !self.folders.lock().unwrap().contains(&dirname(&key)) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory {} not found", dirname(&key)),
            ));
        }
        self.files.lock().unwrap().insert(key, data.to_vec());
        Ok(())
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        let key = self.key(path.as_str());
        if self.files.lock().unwrap().contains_key(&key) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "Path component is not a directory",
            ));
        }
        self.add_folder_chain(&key);
        Ok(())
    }
}
