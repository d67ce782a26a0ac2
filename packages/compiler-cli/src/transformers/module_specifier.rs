//! Module Specifier Resolver
//!
//! Translates between file paths and the specifiers generated code uses to import them, across
//! the source, generated and dependency boundaries.

use std::sync::Arc;

use crate::ngtsc::file_system::{
    dirname, is_rooted, join, strip_extension, AbsoluteFsPath, ReadonlyFileSystem,
};

use super::error::{HostError, Result};
use super::file_kind::{
    is_declaration_file, is_shallow_import, replace_declaration_suffix, FileRole, NODE_MODULES_DIR,
};
use super::module_resolution::{
    FileExistence, ModuleResolutionHost, ModuleResolver, NodeModuleResolver, PlannedOutputs,
};
use super::path_mapper::{dot_relative, PathConfig};

/// Extension of the precompiled summary that can stand in for a declaration file.
pub const SUMMARY_EXTENSION: &str = ".ngsummary.json";

pub struct ModuleSpecifierResolver {
    config: PathConfig,
    fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
    resolver: Box<dyn ModuleResolver>,
    planned: PlannedOutputs,
}

impl ModuleSpecifierResolver {
    /// Resolver backed by [`NodeModuleResolver`] over the configured `rootDirs`.
    pub fn new(config: PathConfig, fs: Arc<dyn ReadonlyFileSystem + Send + Sync>) -> Self {
        let resolver = NodeModuleResolver::new(config.root_dirs().to_vec());
        Self::with_resolver(config, fs, Box::new(resolver))
    }

    pub fn with_resolver(
        config: PathConfig,
        fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
        resolver: Box<dyn ModuleResolver>,
    ) -> Self {
        Self {
            config,
            fs,
            resolver,
            planned: PlannedOutputs::new(),
        }
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn file_system(&self) -> &Arc<dyn ReadonlyFileSystem + Send + Sync> {
        &self.fs
    }

    pub fn planned_outputs(&self) -> &PlannedOutputs {
        &self.planned
    }

    /// Whether `file_name` exists, and if so whether it is on disk or only planned.
    pub fn file_existence(&self, file_name: &str) -> Option<FileExistence> {
        if self.fs.is_file(&AbsoluteFsPath::new(file_name)) {
            Some(FileExistence::OnDisk)
        } else if self.planned.contains(file_name) {
            Some(FileExistence::Planned)
        } else {
            None
        }
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.file_existence(file_name).is_some()
    }

    pub fn directory_exists(&self, directory_name: &str) -> bool {
        self.fs.is_directory(&AbsoluteFsPath::new(directory_name))
    }

    pub fn read_file(&self, file_name: &str) -> Result<String> {
        self.fs
            .read_file(&AbsoluteFsPath::new(file_name))
            .map_err(|source| HostError::Io {
                path: file_name.to_string(),
                source,
            })
    }

    /// On-disk absolute paths are already canonical.
    pub fn get_canonical_file_name<'a>(&self, file_name: &'a str) -> &'a str {
        file_name
    }

    /// Resolve `module_name` as imported from `containing_file`.
    ///
    /// `Ok(None)` means the specifier could not be resolved. Without a containing file, resolution
    /// starts from `<basePath>/index.ts`, which is only allowed for non-relative specifiers.
    pub fn module_name_to_file_name(
        &self,
        module_name: &str,
        containing_file: Option<&str>,
    ) -> Result<Option<String>> {
        let containing_file = match containing_file.filter(|file| !file.is_empty()) {
            Some(file) => file.to_string(),
            None => {
                if module_name.starts_with('.') {
                    return Err(HostError::RelativeWithoutContainingFile {
                        specifier: module_name.to_string(),
                    });
                }
                join(self.config.base_path(), &["index.ts"])
            }
        };

        let module_name = strip_extension(module_name);
        let host = SummaryAwareHost { specifiers: self };
        Ok(self
            .resolver
            .resolve_module_name(&module_name, &containing_file, &host)
            .map(|resolved| self.get_canonical_file_name(&resolved).to_string()))
    }

    /// The specifier `containing_file` (a generated file) must use to import `imported_file`.
    pub fn file_name_to_module_name(&self, imported_file: &str, containing_file: &str) -> String {
        if !self.file_exists(imported_file) {
            self.planned.plan(imported_file);
        }

        let containing_dir = dirname(&self.config.rewrite_gen_dir_path(containing_file));
        let imported = strip_extension(imported_file);

        match FileRole::classify(&imported) {
            FileRole::Generated {
                dependency: Some(module),
            } => {
                let target = join(self.config.gen_dir(), &[NODE_MODULES_DIR, module]);
                dot_relative(&containing_dir, &target)
            }
            FileRole::Generated { dependency: None } => {
                dot_relative(&containing_dir, &self.config.rewrite_gen_dir_path(&imported))
            }
            role => match role.dependency() {
                Some(module) => module.to_string(),
                None => {
                    let imported = if self.config.is_gen_dir_inside_base_path() {
                        imported.clone()
                    } else {
                        self.config.replace_base_path(&imported)
                    };
                    if is_shallow_import(&imported) {
                        imported
                    } else {
                        dot_relative(&containing_dir, &imported)
                    }
                }
            },
        }
    }

    fn summary_exists(&self, declaration_file: &str) -> bool {
        replace_declaration_suffix(declaration_file, SUMMARY_EXTENSION)
            .map(|summary| self.fs.is_file(&AbsoluteFsPath::new(summary)))
            .unwrap_or(false)
    }
}

/// Existence predicate handed to the resolver: planned outputs count as present, and a
/// declaration file counts as present when its summary does.
struct SummaryAwareHost<'a> {
    specifiers: &'a ModuleSpecifierResolver,
}

impl ModuleResolutionHost for SummaryAwareHost<'_> {
    fn file_exists(&self, file_name: &str) -> bool {
        if !is_rooted(file_name) {
            return false;
        }
        self.specifiers.file_exists(file_name)
            || (is_declaration_file(file_name) && self.specifiers.summary_exists(file_name))
    }

    fn directory_exists(&self, directory_name: &str) -> bool {
        self.specifiers.directory_exists(directory_name)
    }

    fn read_file(&self, file_name: &str) -> Option<String> {
        self.specifiers.read_file(file_name).ok()
    }
}
