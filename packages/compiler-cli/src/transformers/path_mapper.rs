//! Path Mapper
//!
//! Pure path algebra that places generated files under `genDir` and computes the relative
//! specifiers generated code uses to reach other files.

use super::error::{HostError, Result};
use super::file_kind::dependency_marker_index;
use crate::ngtsc::file_system::{is_rooted, is_within, join, normalize, relative, replace_root};

/// Immutable path configuration of one compilation.
///
/// All directories are normalized, absolute, and free of trailing separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    base_path: String,
    gen_dir: String,
    root_dirs: Vec<String>,
    generate_code_for_libraries: bool,
    gen_dir_inside_base_path: bool,
}

impl PathConfig {
    pub fn new(base_path: &str, gen_dir: &str) -> Result<Self> {
        let base_path = absolute_dir("basePath", base_path)?;
        let gen_dir = absolute_dir("genDir", gen_dir)?;
        let gen_dir_inside_base_path = is_within(&base_path, &gen_dir);
        Ok(Self {
            base_path,
            gen_dir,
            root_dirs: Vec::new(),
            generate_code_for_libraries: true,
            gen_dir_inside_base_path,
        })
    }

    pub fn with_root_dirs<I, S>(mut self, root_dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.root_dirs = root_dirs
            .into_iter()
            .map(|dir| absolute_dir("rootDirs", dir.as_ref()))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn with_generate_code_for_libraries(mut self, generate: bool) -> Self {
        self.generate_code_for_libraries = generate;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn gen_dir(&self) -> &str {
        &self.gen_dir
    }

    pub fn root_dirs(&self) -> &[String] {
        &self.root_dirs
    }

    pub fn generate_code_for_libraries(&self) -> bool {
        self.generate_code_for_libraries
    }

    /// Whether `genDir` is `basePath` itself or one of its descendants.
    pub fn is_gen_dir_inside_base_path(&self) -> bool {
        self.gen_dir_inside_base_path
    }

    /// Where the generated counterpart of `file_path` is written.
    pub fn calculate_emit_path(&self, file_path: &str) -> String {
        self.calculate_emit_path_with(file_path, |_| {})
    }

    /// [`calculate_emit_path`](Self::calculate_emit_path), reporting each rootDirs entry as it is
    /// checked.
    ///
    /// The last `rootDirs` entry containing the file wins, even when an earlier entry is a more
    /// specific match.
    pub fn calculate_emit_path_with(
        &self,
        file_path: &str,
        mut on_root_check: impl FnMut(&str),
    ) -> String {
        let file_path = if is_rooted(file_path) {
            normalize(file_path)
        } else {
            join(&self.base_path, &[file_path])
        };

        let mut root = self.base_path.as_str();
        for root_dir in &self.root_dirs {
            on_root_check(root_dir);
            if is_within(root_dir, &file_path) {
                root = root_dir;
            }
        }

        let relative_path = relative(root, &file_path);
        join(&self.gen_dir, &[strip_parent_segments(&relative_path)])
    }

    /// Move `file_path` into `genDir` coordinates.
    ///
    /// Files of a dependency tree keep everything from the marker onward
    /// (`.../node_modules/lib/x` becomes `<genDir>/node_modules/lib/x`); first-party files have
    /// their `basePath` prefix replaced by `genDir`. Anything else is returned unchanged.
    pub fn rewrite_gen_dir_path(&self, file_path: &str) -> String {
        match dependency_marker_index(file_path) {
            Some(index) => join(&self.gen_dir, &[&file_path[index..]]),
            None => self.replace_base_path(file_path),
        }
    }

    /// Replace a leading `basePath` with `genDir`, leaving other paths untouched.
    pub fn replace_base_path(&self, file_path: &str) -> String {
        replace_root(file_path, &self.base_path, &self.gen_dir)
            .unwrap_or_else(|| file_path.to_string())
    }
}

/// Relative specifier from directory `from` to `to`, always starting with `./` or `../`.
pub fn dot_relative(from: &str, to: &str) -> String {
    let relative_path = relative(from, to);
    if relative_path == "."
        || relative_path == ".."
        || relative_path.starts_with("./")
        || relative_path.starts_with("../")
    {
        relative_path
    } else {
        format!("./{}", relative_path)
    }
}

fn strip_parent_segments(mut relative_path: &str) -> &str {
    while let Some(rest) = relative_path.strip_prefix("../") {
        relative_path = rest;
    }
    if relative_path == ".." {
        ""
    } else {
        relative_path
    }
}

fn absolute_dir(field: &'static str, path: &str) -> Result<String> {
    if !is_rooted(path) {
        return Err(HostError::InvalidPathConfig {
            field,
            path: path.to_string(),
        });
    }
    Ok(normalize(path))
}
