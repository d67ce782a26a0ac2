#![deny(clippy::all)]

/**
 * Angular AOT build host - Rust Implementation
 *
 * Path mapping, module specifier resolution and versioned metadata for
 * ahead-of-time template compilation.
 */
pub mod codegen;
pub mod config;
pub mod ngtsc;
pub mod transformers;
pub mod version;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
