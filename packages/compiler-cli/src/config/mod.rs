//! Project configuration.

pub mod tsconfig;


pub use tsconfig::{discover_root_files, AngularCompilerOptions, CompilerOptions, TsConfig};
