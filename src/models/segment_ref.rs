use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Conventional names for the first segments of a version
pub const SEGMENT_NAMES: [&str; 4] = ["major", "minor", "patch", "build"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid segment '{0}' (expected an index or one of major, minor, patch, build)")]
pub struct SegmentRefError(pub String);

/// A segment addressed from the command line, by index or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentRef(usize);

impl SegmentRef {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Default display name for a segment index
pub fn segment_name(index: usize) -> Option<&'static str> {
    SEGMENT_NAMES.get(index).copied()
}

impl FromStr for SegmentRef {
    type Err = SegmentRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Ok(Self(index));
        }

        let lowered = trimmed.to_lowercase();
        SEGMENT_NAMES
            .iter()
            .position(|name| *name == lowered)
            .map(Self)
            .ok_or_else(|| SegmentRefError(s.to_string()))
    }
}

impl fmt::Display for SegmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match segment_name(self.0) {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.0),
        }
    }
}
