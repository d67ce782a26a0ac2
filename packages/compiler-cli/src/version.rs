//! Version
//!
//! Version information for the AOT host.

use std::fmt;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string printed by the tools.
pub fn version_string() -> String {
    format!("Angular AOT host v{}", VERSION)
}

/// Parsed semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Prerelease tag.
    pub prerelease: Option<String>,
}

impl Version {
    /// Parse `major.minor.patch[-prerelease]`.
    pub fn parse(version: &str) -> Option<Self> {
        let (core, prerelease) = match version.split_once('-') {
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (version, None),
        };

        let mut nums = core.split('.');
        let major = nums.next()?.parse().ok()?;
        let minor = nums.next()?.parse().ok()?;
        let patch = nums.next()?.parse().ok()?;

        Some(Self {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// Version of this build.
    pub fn current() -> Self {
        Self::parse(VERSION).unwrap_or(Self {
            major: 0,
            minor: 0,
            patch: 1,
            prerelease: Some("dev".to_string()),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
