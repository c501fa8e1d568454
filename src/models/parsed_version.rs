// Version string parsing and composition

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::stepper::StepperState;

/// Shape accepted by [`ParsedVersion::parse`]: a non-digit prefix, dotted
/// digit groups, and an optional non-digit suffix.
pub const VERSION_PATTERN: &str = r"^([^0-9]*)([0-9]+(?:\.[0-9]+)*)([^0-9]+)?$";

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(VERSION_PATTERN).expect("VERSION_PATTERN is a valid regex")
});

/// Reasons a version string cannot be split into segments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string does not have the prefix / digits / suffix shape
    #[error("{input} does not match regex {pattern}")]
    NoMatch { input: String, pattern: &'static str },
    /// A digit group is too large to be stepped
    #[error("segment {index} of {input} ('{digits}') is too large")]
    SegmentOutOfRange {
        input: String,
        index: usize,
        digits: String,
    },
}

/// A single numeric component and the zero-padded width it was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub value: u64,
    pub width: usize,
}

impl Segment {
    fn from_digits(digits: &str) -> Option<Self> {
        let value = digits.parse::<u64>().ok()?;
        // Only a leading zero makes the width significant
        let width = if digits.len() > 1 && digits.starts_with('0') {
            digits.len()
        } else {
            1
        };
        Some(Self { value, width })
    }
}

/// A version string split into prefix, numeric segments and suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVersion {
    prefix: String,
    segments: Vec<Segment>,
    suffix: String,
}

impl ParsedVersion {
    /// Split `raw` into its prefix, dotted numeric core and suffix.
    ///
    /// ```
    /// use version_updater::models::ParsedVersion;
    ///
    /// let parsed = ParsedVersion::parse("v1.2.3-beta").unwrap();
    /// assert_eq!(parsed.prefix(), "v");
    /// assert_eq!(parsed.values(), vec![1, 2, 3]);
    /// assert_eq!(parsed.suffix(), "-beta");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let captures = VERSION_REGEX.captures(raw).ok_or_else(|| ParseError::NoMatch {
            input: raw.to_string(),
            pattern: VERSION_PATTERN,
        })?;

        let prefix = captures.get(1).map_or("", |m| m.as_str()).to_string();
        let core = captures.get(2).map_or("", |m| m.as_str());
        let suffix = captures.get(3).map_or("", |m| m.as_str()).to_string();

        let segments = core
            .split('.')
            .enumerate()
            .map(|(index, digits)| {
                Segment::from_digits(digits).ok_or_else(|| ParseError::SegmentOutOfRange {
                    input: raw.to_string(),
                    index,
                    digits: digits.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prefix,
            segments,
            suffix,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Numeric values of the segments in order
    pub fn values(&self) -> Vec<u64> {
        self.segments.iter().map(|s| s.value).collect()
    }

    /// Number of segments (always at least one)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Fresh stepper seeded with the parsed values
    pub fn stepper(&self) -> StepperState {
        StepperState::new(self.values())
    }

    /// Rebuild the version string from `state`'s current values.
    ///
    /// The suffix and the zero padding of each segment come from the
    /// original parse; segments beyond the parsed count print unpadded.
    pub fn compose(&self, state: &StepperState) -> String {
        let core = state
            .values()
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let width = self.segments.get(i).map_or(1, |s| s.width);
                format!("{value:0width$}")
            })
            .collect::<Vec<_>>()
            .join(".");

        format!("{}{}{}", self.prefix, core, self.suffix)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compose(&self.stepper()))
    }
}

impl FromStr for ParsedVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// True when the composed version differs from what the host currently holds
pub fn is_dirty(current_host_version: &str, composed: &str) -> bool {
    composed != current_host_version
}
