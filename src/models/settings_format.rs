use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kinds of build-settings files a version can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SettingsFormat {
    /// Unity `ProjectSettings.asset` (`PlayerSettings.bundleVersion`)
    Unity,
    /// TOML manifest (`Cargo.toml`, `project.toml`, `pyproject.toml`)
    Toml,
    /// A file containing nothing but the version
    Plain,
}

impl SettingsFormat {
    /// Guess the format from a file name
    pub fn detect(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if file_name == "ProjectSettings.asset" {
            return Self::Unity;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            Some("asset") => Self::Unity,
            _ => Self::Plain,
        }
    }

    /// Human-readable name of where the version is stored
    pub fn location(&self) -> &'static str {
        match self {
            Self::Unity => "bundleVersion",
            Self::Toml => "version key",
            Self::Plain => "file contents",
        }
    }

    /// Files probed, in order, when no settings file is configured
    pub fn discovery_candidates() -> &'static [&'static str] {
        &[
            "ProjectSettings/ProjectSettings.asset",
            "Cargo.toml",
            "project.toml",
            "pyproject.toml",
            "VERSION",
        ]
    }
}

impl fmt::Display for SettingsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unity => write!(f, "unity"),
            Self::Toml => write!(f, "toml"),
            Self::Plain => write!(f, "plain"),
        }
    }
}
