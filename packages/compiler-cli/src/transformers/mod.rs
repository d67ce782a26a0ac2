//! AOT build host.
//!
//! Maps program files into the generated output tree, converts between file paths and import
//! specifiers, and serves versioned per-file metadata.

pub mod api;
pub mod compiler_host;
pub mod error;
pub mod file_kind;
pub mod metadata;
pub mod module_resolution;
pub mod module_specifier;
pub mod path_mapper;

#[cfg(test)]
mod test;

pub use api::{AotCompilerOptions, InMemoryProgram, Program, SourceFile};
pub use compiler_host::AotCompilerHost;
pub use error::{HostError, Result};
pub use file_kind::FileRole;
pub use module_resolution::{
    FileExistence, ModuleResolutionHost, ModuleResolver, NodeModuleResolver, PlannedOutputs,
};
pub use module_specifier::ModuleSpecifierResolver;
pub use path_mapper::{dot_relative, PathConfig};
