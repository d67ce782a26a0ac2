//! Module resolution collaborator.
//!
//! A node-style resolver over an abstract existence host, plus the planned-output set that lets
//! generated files be imported before they are written.

use std::cell::RefCell;
use std::collections::BTreeSet;

use serde::Deserialize;

use crate::ngtsc::file_system::{dirname, is_rooted, is_within, join, normalize, relative};

use super::file_kind::NODE_MODULES_DIR;

/// File-system view a [`ModuleResolver`] runs against.
pub trait ModuleResolutionHost {
    fn file_exists(&self, file_name: &str) -> bool;
    fn directory_exists(&self, directory_name: &str) -> bool;
    fn read_file(&self, file_name: &str) -> Option<String>;
}

/// Resolves an import specifier to the file it names.
pub trait ModuleResolver {
    fn resolve_module_name(
        &self,
        module_name: &str,
        containing_file: &str,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String>;
}

/// Why a file is considered to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileExistence {
    /// Present in the underlying file system.
    OnDisk,
    /// Not written yet, but will be emitted later in the same compilation.
    Planned,
}

/// Outputs of the current compilation that are known to be written later.
#[derive(Debug, Default)]
pub struct PlannedOutputs {
    files: RefCell<BTreeSet<String>>,
}

impl PlannedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `file_name`; returns `false` if it was already planned.
    pub fn plan(&self, file_name: &str) -> bool {
        let inserted = self.files.borrow_mut().insert(normalize(file_name));
        if inserted {
            tracing::debug!(file = file_name, "planned output");
        }
        inserted
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.borrow().contains(&normalize(file_name))
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

const EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".d.ts"];

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    typings: Option<String>,
    types: Option<String>,
}

/// Node-style resolution with TypeScript's `rootDirs` fallback for relative specifiers.
#[derive(Debug, Clone, Default)]
pub struct NodeModuleResolver {
    root_dirs: Vec<String>,
}

impl NodeModuleResolver {
    pub fn new(root_dirs: Vec<String>) -> Self {
        Self { root_dirs }
    }

    fn resolve_relative(&self, candidate: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
        if let Some(found) = load_as_file_or_directory(candidate, host) {
            return Some(found);
        }

        // The candidate may live in a root that is merged with the others at compile time.
        let owner = self
            .root_dirs
            .iter()
            .filter(|root| is_within(root, candidate))
            .max_by_key(|root| root.len())?;
        let suffix = relative(owner, candidate);
        self.root_dirs
            .iter()
            .filter(|root| *root != owner)
            .find_map(|root| load_as_file_or_directory(&join(root, &[&suffix]), host))
    }

    fn resolve_bare(
        &self,
        module_name: &str,
        containing_file: &str,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String> {
        let mut dir = dirname(containing_file);
        loop {
            let node_modules = join(&dir, &[NODE_MODULES_DIR]);
            if host.directory_exists(&node_modules) {
                let candidate = join(&node_modules, &[module_name]);
                if let Some(found) = load_as_file_or_directory(&candidate, host) {
                    return Some(found);
                }
            }
            let parent = dirname(&dir);
            if parent == dir {
                return None;
            }
            dir = parent;
        }
    }
}

impl ModuleResolver for NodeModuleResolver {
    fn resolve_module_name(
        &self,
        module_name: &str,
        containing_file: &str,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String> {
        let resolved = if is_rooted(module_name) {
            self.resolve_relative(&normalize(module_name), host)
        } else if module_name.starts_with("./")
            || module_name.starts_with("../")
            || module_name == "."
            || module_name == ".."
        {
            let candidate = join(&dirname(containing_file), &[module_name]);
            self.resolve_relative(&candidate, host)
        } else {
            self.resolve_bare(module_name, containing_file, host)
        };

        if resolved.is_none() {
            tracing::debug!(
                specifier = module_name,
                containing = containing_file,
                "module not resolved"
            );
        }
        resolved
    }
}

fn load_as_file_or_directory(candidate: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
    load_as_file(candidate, host).or_else(|| load_as_directory(candidate, host))
}

fn load_as_file(candidate: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
    if EXTENSIONS.iter().any(|ext| candidate.ends_with(ext)) && host.file_exists(candidate) {
        return Some(candidate.to_string());
    }
    EXTENSIONS
        .iter()
        .map(|ext| format!("{}{}", candidate, ext))
        .find(|file| host.file_exists(file))
}

fn load_as_directory(candidate: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
    if !host.directory_exists(candidate) {
        return None;
    }

    let package_json = join(candidate, &["package.json"]);
    if let Some(text) = host.read_file(&package_json) {
        let package: PackageJson = serde_json::from_str(&text).unwrap_or_default();
        if let Some(entry) = package.typings.or(package.types) {
            let entry = join(candidate, &[&entry]);
            if let Some(found) = load_as_file(&entry, host) {
                return Some(found);
            }
        }
    }

    load_as_file(&join(candidate, &["index"]), host)
}
