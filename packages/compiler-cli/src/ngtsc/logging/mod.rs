//! Logging
//!
//! The `Logger` seam used for user-facing diagnostics.

pub mod src;

#[cfg(test)]
mod test;

pub use src::*;
