// Resolution of config, settings file and session for a command

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::SettingsFormat;
use crate::services::{Session, SettingsFile};
use crate::utils::config::{ConfigParser, VupConfig};
use crate::utils::error::Result;

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Settings file holding the version (default: auto-detect)
    #[arg(long, global = true, env = "VUP_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Settings file format (default: detect from the file name)
    #[arg(long, global = true, value_enum, env = "VUP_FORMAT")]
    pub format: Option<SettingsFormat>,

    /// Configuration file to use instead of ./vup.toml
    #[arg(long, global = true, env = "VUP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging filter directive, e.g. "debug" (RUST_LOG wins when set)
    #[arg(long, global = true, env = "VUP_LOG", default_value = "warn")]
    pub log_filter: String,
}

/// Everything a command needs to talk to the host
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config: VupConfig,
    pub settings: SettingsFile,
}

impl Workspace {
    /// Resolve configuration and the settings file relative to `dir`
    pub fn open(global: &GlobalArgs, dir: &Path) -> Result<Self> {
        let user_config = ConfigParser::user_config_path();
        let config = match &global.config {
            Some(path) => {
                let base = match user_config.as_deref().filter(|p| p.is_file()) {
                    Some(user) => ConfigParser::load_config(user)?,
                    None => VupConfig::default(),
                };
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    dir.join(path)
                };
                base.merge(ConfigParser::load_config(path)?)
            }
            None => ConfigParser::resolve(dir, user_config.as_deref())?,
        };

        let settings = config.settings_file(global.file.as_deref(), global.format, dir)?;
        debug!(
            path = %settings.path().display(),
            format = %settings.format(),
            "using settings file"
        );

        Ok(Self { config, settings })
    }

    /// Open a session on the settings file's current version
    pub fn session(&self) -> Result<Session> {
        let mut session = Session::new().with_segment_names(self.config.segments.names.clone());
        session.reset(&self.settings)?;
        Ok(session)
    }
}
