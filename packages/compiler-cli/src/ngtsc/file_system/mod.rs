//! File System Abstraction
//!
//! Path algebra plus the read/write surface the AOT host needs from a disk.

pub mod src;
pub mod testing;

#[cfg(test)]
mod test;

pub use src::*;
