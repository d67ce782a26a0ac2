//! Compiler infrastructure
//!
//! File system, logging and resource loading shared by the AOT host.

pub mod file_system;
pub mod logging;
pub mod resource;
