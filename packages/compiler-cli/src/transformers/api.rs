// Transformers API
//
// Program and option types shared by the AOT host and the code generator.

use std::rc::Rc;

use indexmap::IndexMap;

use super::error::{HostError, Result};
use super::path_mapper::PathConfig;
use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};

/// Options of one AOT compilation, with every directory already resolved to an absolute path.
#[derive(Debug, Clone, PartialEq)]
pub struct AotCompilerOptions {
    /// Root of the first-party sources.
    pub base_path: String,
    /// Root of the generated output.
    pub gen_dir: String,
    /// Alternate source roots, in priority order (later entries win).
    pub root_dirs: Vec<String>,
    /// Whether declaration files of libraries get code generated for them.
    pub generate_code_for_libraries: bool,
    /// Log every rootDirs containment check made while computing emit paths.
    pub trace: bool,
    /// Translation file used by the template compiler.
    pub i18n_file: Option<String>,
    /// Format of `i18n_file` (xlf, xmb, ...).
    pub i18n_format: Option<String>,
    /// Locale of `i18n_file`.
    pub locale: Option<String>,
}

impl AotCompilerOptions {
    pub fn new(base_path: impl Into<String>, gen_dir: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            gen_dir: gen_dir.into(),
            root_dirs: Vec::new(),
            generate_code_for_libraries: true,
            trace: false,
            i18n_file: None,
            i18n_format: None,
            locale: None,
        }
    }

    /// Build the immutable path configuration of this compilation.
    pub fn path_config(&self) -> Result<PathConfig> {
        Ok(PathConfig::new(&self.base_path, &self.gen_dir)?
            .with_root_dirs(&self.root_dirs)?
            .with_generate_code_for_libraries(self.generate_code_for_libraries))
    }
}

/// A file of the program being compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: String,
    text: String,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Program interface.
pub trait Program {
    /// All source files of the program, in a stable order.
    fn get_source_files(&self) -> Vec<Rc<SourceFile>>;

    /// Look up one file by its absolute path.
    fn get_source_file(&self, file_name: &str) -> Option<Rc<SourceFile>>;
}

/// Program whose files are held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProgram {
    files: IndexMap<String, Rc<SourceFile>>,
}

impl InMemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let file = SourceFile::new(path, content);
        self.files
            .insert(file.file_name().to_string(), Rc::new(file));
    }

    /// Read every root file from `fs`.
    pub fn from_file_system(
        fs: &dyn ReadonlyFileSystem,
        root_names: &[String],
    ) -> Result<Self> {
        let mut program = Self::new();
        for name in root_names {
            let text = fs
                .read_file(&AbsoluteFsPath::new(name.as_str()))
                .map_err(|source| HostError::Io {
                    path: name.clone(),
                    source,
                })?;
            program.add_file(name.as_str(), text);
        }
        Ok(program)
    }
}

impl Program for InMemoryProgram {
    fn get_source_files(&self) -> Vec<Rc<SourceFile>> {
        self.files.values().cloned().collect()
    }

    fn get_source_file(&self, file_name: &str) -> Option<Rc<SourceFile>> {
        self.files.get(file_name).cloned()
    }
}
