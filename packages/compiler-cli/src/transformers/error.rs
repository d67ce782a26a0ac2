//! Error types of the AOT host.

use std::io;

use thiserror::Error;

use crate::ngtsc::resource::ResourceError;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Resolution of relative paths requires a containing file. (resolving `{specifier}`)")]
    RelativeWithoutContainingFile { specifier: String },

    #[error("`{field}` must be an absolute path, got `{path}`")]
    InvalidPathConfig { field: &'static str, path: String },

    #[error("Source file {path} not present in program.")]
    SourceFileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read JSON file {path}: {source}")]
    MetadataParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(
        "The translation file ({translation_file}) locale must be provided. Use the --locale option."
    )]
    MissingLocale { translation_file: String },

    #[error("Failed to write generated file {path}: {source}")]
    Emit {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Compilation failed: {0}")]
    Compilation(String),
}
