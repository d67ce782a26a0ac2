use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::ngtsc::file_system::{is_rooted, join, normalize, AbsoluteFsPath};
use crate::transformers::api::AotCompilerOptions;

const ROOT_FILE_EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".d.ts"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: CompilerOptions,
    pub files: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub angular_compiler_options: AngularCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub base_url: Option<String>,
    pub root_dirs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngularCompilerOptions {
    pub gen_dir: Option<String>,
    pub base_path: Option<String>,
    #[serde(default = "default_true")]
    pub generate_code_for_libraries: bool,
    #[serde(default)]
    pub trace: bool,
    #[serde(default)]
    pub skip_metadata_emit: bool,
    pub i18n_file: Option<String>,
    pub i18n_format: Option<String>,
    pub locale: Option<String>,
}

impl Default for AngularCompilerOptions {
    fn default() -> Self {
        Self {
            gen_dir: None,
            base_path: None,
            generate_code_for_libraries: true,
            trace: false,
            skip_metadata_emit: false,
            i18n_file: None,
            i18n_format: None,
            locale: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl TsConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TsConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Compiler options with every directory resolved against `config_dir`.
    ///
    /// `basePath` defaults to `config_dir`, `genDir` to `basePath`.
    pub fn aot_options(&self, config_dir: &str) -> AotCompilerOptions {
        let config_dir = normalize(config_dir);
        let angular = &self.angular_compiler_options;

        let base_path = angular
            .base_path
            .as_deref()
            .map(|p| resolve(&config_dir, p))
            .unwrap_or_else(|| config_dir.clone());
        let gen_dir = angular
            .gen_dir
            .as_deref()
            .map(|p| resolve(&config_dir, p))
            .unwrap_or_else(|| base_path.clone());

        let mut options = AotCompilerOptions::new(base_path, gen_dir);
        options.root_dirs = self
            .compiler_options
            .root_dirs
            .iter()
            .flatten()
            .map(|dir| resolve(&config_dir, dir))
            .collect();
        options.generate_code_for_libraries = angular.generate_code_for_libraries;
        options.trace = angular.trace;
        options.i18n_file = angular.i18n_file.as_deref().map(|p| resolve(&config_dir, p));
        options.i18n_format = angular.i18n_format.clone();
        options.locale = angular.locale.clone();
        options
    }
}

/// Root files of the program described by `config`, sorted and deduplicated.
///
/// `files` entries are taken as they are; `include` patterns are expanded with `glob`, a pattern
/// naming a directory meaning everything below it. Without either, the whole `config_dir` is
/// included. Dependency trees are excluded unless `exclude` says otherwise.
pub fn discover_root_files(config: &TsConfig, config_dir: &str) -> anyhow::Result<Vec<String>> {
    let config_dir = normalize(config_dir);
    let mut roots = BTreeSet::new();

    for file in config.files.iter().flatten() {
        roots.insert(resolve(&config_dir, file));
    }

    let default_include = vec!["**/*".to_string()];
    let include = match (&config.include, &config.files) {
        (Some(include), _) => include,
        (None, Some(_)) => return Ok(roots.into_iter().collect()),
        (None, None) => &default_include,
    };

    let exclude = config
        .exclude
        .iter()
        .flatten()
        .map(|pattern| {
            let pattern = resolve(&config_dir, pattern);
            glob::Pattern::new(&pattern)
                .with_context(|| format!("Invalid exclude pattern {}", pattern))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for pattern in include {
        let pattern = include_pattern(&resolve(&config_dir, pattern));
        let entries =
            glob::glob(&pattern).with_context(|| format!("Invalid include pattern {}", pattern))?;
        for entry in entries {
            let path = AbsoluteFsPath::from(entry?).into_string();
            if !ROOT_FILE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
                continue;
            }
            let excluded = if exclude.is_empty() {
                path.contains("/node_modules/")
            } else {
                exclude
                    .iter()
                    .any(|p| p.matches(&path) || is_under_pattern(p, &path))
            };
            if !excluded {
                roots.insert(path);
            }
        }
    }

    Ok(roots.into_iter().collect())
}

fn resolve(config_dir: &str, path: &str) -> String {
    if is_rooted(path) {
        normalize(path)
    } else {
        join(config_dir, &[path])
    }
}

/// A pattern whose last segment has neither a wildcard nor an extension names a directory.
fn include_pattern(pattern: &str) -> String {
    let last = pattern.rsplit('/').next().unwrap_or_default();
    if last.contains('*') || last.contains('.') {
        pattern.to_string()
    } else {
        format!("{}/**/*", pattern)
    }
}

fn is_under_pattern(pattern: &glob::Pattern, path: &str) -> bool {
    let mut dir = path;
    while let Some(index) = dir.rfind('/') {
        dir = &dir[..index];
        if pattern.matches(dir) {
            return true;
        }
    }
    false
}
