// Capabilities for reading and writing the host's version

use crate::utils::error::Result;

/// Read access to the authoritative version string
pub trait VersionSource {
    fn current_version(&self) -> Result<String>;
}

/// Write access to the authoritative version string
pub trait VersionSink {
    fn write_version(&mut self, version: &str) -> Result<()>;
}

/// Host that keeps the version in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHost {
    version: String,
    writes: usize,
}

impl MemoryHost {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            writes: 0,
        }
    }

    /// Change the version behind the session's back
    pub fn set_external(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Number of times a sink write happened
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl VersionSource for MemoryHost {
    fn current_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }
}

impl VersionSink for MemoryHost {
    fn write_version(&mut self, version: &str) -> Result<()> {
        self.version = version.to_string();
        self.writes += 1;
        Ok(())
    }
}
