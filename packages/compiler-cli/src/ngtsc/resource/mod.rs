//! Resource loading for template-referenced files.

pub mod src;

#[cfg(test)]
mod test;

pub use src::*;
