// Configuration loading for vup.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::SettingsFormat;
use crate::services::settings_file::SettingsFile;
use crate::utils::error::{Result, VupError};

/// Project-level config file names, in lookup order
pub const PROJECT_CONFIG_NAMES: [&str; 2] = ["vup.toml", ".vup.toml"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VupConfig {
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub segments: SegmentsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    /// Settings file holding the version
    pub file: Option<PathBuf>,
    /// Format override when the file name is not enough
    pub format: Option<SettingsFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentsSection {
    /// Display names for segments, most significant first
    #[serde(default)]
    pub names: Vec<String>,
}

impl VupConfig {
    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merge(mut self, other: VupConfig) -> Self {
        if other.settings.file.is_some() {
            self.settings.file = other.settings.file;
        }
        if other.settings.format.is_some() {
            self.settings.format = other.settings.format;
        }
        if !other.segments.names.is_empty() {
            self.segments.names = other.segments.names;
        }
        self
    }

    /// Pick the settings file: explicit override, then config, then discovery in `dir`
    pub fn settings_file(
        &self,
        file_override: Option<&Path>,
        format_override: Option<SettingsFormat>,
        dir: &Path,
    ) -> Result<SettingsFile> {
        let file = match file_override.or(self.settings.file.as_deref()) {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    dir.join(path)
                };
                SettingsFile::detect(path)
            }
            None => SettingsFile::discover(dir)?,
        };

        Ok(match format_override.or(self.settings.format) {
            Some(format) => SettingsFile::new(file.path(), format),
            None => file,
        })
    }
}

/// Configuration parsing and lookup utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load a config file; a relative `settings.file` is resolved against
    /// the directory holding the config
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<VupConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(VupError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            VupError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::parse_config(&content).map_err(|e| match e {
            VupError::ConfigError(msg) => {
                VupError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        if let (Some(file), Some(base)) = (config.settings.file.as_ref(), path.parent()) {
            if file.is_relative() {
                config.settings.file = Some(base.join(file));
            }
        }

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse_config(content: &str) -> Result<VupConfig> {
        toml::from_str(content)
            .map_err(|e| VupError::ConfigError(format!("Invalid TOML syntax: {e}")))
    }

    /// First project config file present in `dir`
    pub fn find_project_config(dir: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// `<config_dir>/vup/config.toml` for the current user
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vup").join("config.toml"))
    }

    /// Effective configuration for `dir`: user config overlaid by project config
    pub fn resolve(dir: &Path, user_config: Option<&Path>) -> Result<VupConfig> {
        let mut config = VupConfig::default();

        if let Some(path) = user_config.filter(|p| p.is_file()) {
            config = config.merge(Self::load_config(path)?);
        }

        if let Some(path) = Self::find_project_config(dir) {
            config = config.merge(Self::load_config(path)?);
        }

        Ok(config)
    }
}
