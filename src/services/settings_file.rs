// File-backed version host

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item};
use tracing::{debug, info};

use crate::models::SettingsFormat;
use crate::services::version_host::{VersionSink, VersionSource};
use crate::utils::error::{Result, VupError};

static UNITY_BUNDLE_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*bundleVersion:[ \t]*)(.*?)[ \t]*\r?$")
        .expect("bundleVersion regex is valid")
});

/// Keys probed in TOML manifests, in order
const TOML_VERSION_PATHS: [&[&str]; 3] = [
    &["package", "version"],
    &["project", "version"],
    &["workspace", "package", "version"],
];

/// Build-settings file holding the project's version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
    format: SettingsFormat,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>, format: SettingsFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Use the file name to pick the format
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SettingsFormat::detect(&path);
        Self { path, format }
    }

    /// Find the first known settings file under `dir`
    pub fn discover(dir: &Path) -> Result<Self> {
        for candidate in SettingsFormat::discovery_candidates() {
            let path = dir.join(candidate);
            if path.is_file() {
                debug!(path = %path.display(), "discovered settings file");
                return Ok(Self::detect(path));
            }
        }

        Err(VupError::SettingsError(format!(
            "No settings file found in {} (looked for {})",
            dir.display(),
            SettingsFormat::discovery_candidates().join(", ")
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SettingsFormat {
        self.format
    }

    fn read_contents(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(VupError::SettingsError(format!(
                "Settings file not found: {}",
                self.path.display()
            )));
        }

        fs::read_to_string(&self.path).map_err(|e| {
            VupError::SettingsError(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    fn missing_version(&self) -> VupError {
        VupError::SettingsError(format!(
            "No {} found in {} ({} format)",
            self.format.location(),
            self.path.display(),
            self.format
        ))
    }

    /// Replace the file in one step so readers never see a partial write.
    /// A symlinked path is resolved so the link survives and its target is
    /// rewritten; the target's permissions carry over to the new file.
    fn write_atomically(&self, contents: &str) -> Result<()> {
        let target = fs::canonicalize(&self.path).map_err(|e| {
            VupError::SettingsError(format!("Failed to resolve {}: {}", self.path.display(), e))
        })?;
        let permissions = fs::metadata(&target)?.permissions();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().set_permissions(permissions)?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| {
            VupError::SettingsError(format!("Failed to write {}: {}", target.display(), e.error))
        })?;
        Ok(())
    }
}

impl VersionSource for SettingsFile {
    fn current_version(&self) -> Result<String> {
        let contents = self.read_contents()?;
        let version =
            extract_version(self.format, &contents).ok_or_else(|| self.missing_version())?;
        debug!(path = %self.path.display(), %version, "read host version");
        Ok(version)
    }
}

impl VersionSink for SettingsFile {
    fn write_version(&mut self, version: &str) -> Result<()> {
        let contents = self.read_contents()?;
        let updated = replace_version(self.format, &contents, version)
            .ok_or_else(|| self.missing_version())?;
        self.write_atomically(&updated)?;
        info!(path = %self.path.display(), %version, "wrote host version");
        Ok(())
    }
}

/// Pull the version string out of a settings file's contents
pub fn extract_version(format: SettingsFormat, contents: &str) -> Option<String> {
    match format {
        SettingsFormat::Unity => {
            let captures = UNITY_BUNDLE_VERSION.captures(contents)?;
            Some(unquote(captures.get(2)?.as_str()))
        }
        SettingsFormat::Toml => {
            let doc = contents.parse::<DocumentMut>().ok()?;
            TOML_VERSION_PATHS
                .iter()
                .find_map(|path| lookup(doc.as_item(), path)?.as_str().map(str::to_string))
        }
        SettingsFormat::Plain => {
            let trimmed = contents.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

/// Contents with the version swapped for `version`; everything else is kept
pub fn replace_version(format: SettingsFormat, contents: &str, version: &str) -> Option<String> {
    match format {
        SettingsFormat::Unity => {
            let captures = UNITY_BUNDLE_VERSION.captures(contents)?;
            let value = captures.get(2)?;
            let mut updated = String::with_capacity(contents.len() + version.len() + 2);
            updated.push_str(&contents[..value.start()]);
            updated.push_str(&unity_scalar(version, quote_char(value.as_str())));
            updated.push_str(&contents[value.end()..]);
            Some(updated)
        }
        SettingsFormat::Toml => {
            let mut doc = contents.parse::<DocumentMut>().ok()?;
            let path = TOML_VERSION_PATHS
                .iter()
                .find(|path| lookup(doc.as_item(), path).is_some_and(Item::is_str))?;
            let item = lookup_mut(doc.as_item_mut(), path)?;
            let decor = item.as_value().map(|v| v.decor().clone());
            *item = toml_edit::value(version);
            if let (Some(decor), Some(value)) = (decor, item.as_value_mut()) {
                *value.decor_mut() = decor;
            }
            Some(doc.to_string())
        }
        SettingsFormat::Plain => Some(format!("{version}\n")),
    }
}

fn lookup<'a>(root: &'a Item, path: &[&str]) -> Option<&'a Item> {
    path.iter().try_fold(root, |item, key| item.get(*key))
}

fn lookup_mut<'a>(root: &'a mut Item, path: &[&str]) -> Option<&'a mut Item> {
    path.iter().try_fold(root, |item, key| item.get_mut(*key))
}

fn quote_char(value: &str) -> Option<char> {
    let first = value.chars().next()?;
    ((first == '\'' || first == '"') && value.len() >= 2 && value.ends_with(first)).then_some(first)
}

fn unquote(value: &str) -> String {
    match quote_char(value) {
        Some('\'') => value[1..value.len() - 1].replace("''", "'"),
        Some(_) => value[1..value.len() - 1].to_string(),
        None => value.to_string(),
    }
}

/// Whether a bare YAML scalar would read back as something other than `value`
fn needs_yaml_quotes(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];

    value.is_empty()
        || value.starts_with(INDICATORS)
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.trim() != value
}

/// `version` as it should appear after `bundleVersion:`; an existing quote style is kept
fn unity_scalar(version: &str, quote: Option<char>) -> String {
    match quote {
        Some('"') if !version.contains(['"', '\\']) => format!("\"{version}\""),
        None if !needs_yaml_quotes(version) => version.to_string(),
        _ => format!("'{}'", version.replace('\'', "''")),
    }
}
