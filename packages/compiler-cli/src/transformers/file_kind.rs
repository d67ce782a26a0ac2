//! Role classification of program files.
//!
//! Whether a path is hand-written source, generated output, a declaration file or part of a
//! dependency tree is derived purely from its shape. Every consumer goes through [`FileRole`]
//! so the patterns live in exactly one place.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker segment of an externally managed dependency tree.
pub const NODE_MODULES: &str = "/node_modules/";

/// Name segment of the dependency tree, as it is recreated under `genDir`.
pub const NODE_MODULES_DIR: &str = "node_modules";

static GENERATED_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?:ngfactory|ngstyle)(?:\.ts)?$").unwrap());

static DECLARATION_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.d\.ts$").unwrap());

/// A specifier that is a bare identifier or a two-part scoped package name (`@scope/name`).
static SHALLOW_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+|(@\w+/\w+))$").unwrap());

/// What a path is, as far as emitting and importing are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole<'a> {
    /// Hand-written first-party code.
    Source,
    /// Output of the template compiler (`*.ngfactory.ts`, `*.ngstyle.ts`), optionally produced
    /// for a file of a dependency tree.
    Generated { dependency: Option<&'a str> },
    /// A `.d.ts` file, first-party or from a dependency tree.
    Declaration { dependency: Option<&'a str> },
    /// Any other file inside a dependency tree. `module` is the path after the marker segment.
    Dependency { module: &'a str },
}

impl<'a> FileRole<'a> {
    pub fn classify(path: &'a str) -> Self {
        let dependency = dependency_module(path);
        if GENERATED_FILE.is_match(path) {
            FileRole::Generated { dependency }
        } else if DECLARATION_FILE.is_match(path) {
            FileRole::Declaration { dependency }
        } else if let Some(module) = dependency {
            FileRole::Dependency { module }
        } else {
            FileRole::Source
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, FileRole::Generated { .. })
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, FileRole::Declaration { .. })
    }

    /// The part of the path after the dependency marker, if the file lives in a dependency tree.
    pub fn dependency(&self) -> Option<&'a str> {
        match *self {
            FileRole::Source => None,
            FileRole::Generated { dependency } | FileRole::Declaration { dependency } => dependency,
            FileRole::Dependency { module } => Some(module),
        }
    }

    /// Whether code generation should consider this file.
    ///
    /// Generated files never are; declaration files only when code is generated for libraries.
    pub fn is_compilation_input(&self, generate_code_for_libraries: bool) -> bool {
        match self {
            FileRole::Generated { .. } => false,
            FileRole::Declaration { .. } => generate_code_for_libraries,
            FileRole::Source | FileRole::Dependency { .. } => true,
        }
    }
}

/// The path fragment after the first dependency marker segment.
pub fn dependency_module(path: &str) -> Option<&str> {
    path.find(NODE_MODULES)
        .map(|index| &path[index + NODE_MODULES.len()..])
}

/// Byte offset of the dependency marker (including its leading separator).
pub fn dependency_marker_index(path: &str) -> Option<usize> {
    path.find(NODE_MODULES)
}

pub fn is_declaration_file(path: &str) -> bool {
    DECLARATION_FILE.is_match(path)
}

pub fn is_shallow_import(specifier: &str) -> bool {
    SHALLOW_IMPORT.is_match(specifier)
}

/// `foo.d.ts` -> `foo<suffix>`; `None` for other files.
pub fn replace_declaration_suffix(path: &str, suffix: &str) -> Option<String> {
    path.strip_suffix(".d.ts")
        .map(|base| format!("{}{}", base, suffix))
}
