// Common error types for vup

use thiserror::Error;

use crate::models::{ParseError, SegmentRefError, StepError};

#[derive(Debug, Error)]
pub enum VupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Unsupported version format: {0}")]
    ParseError(#[from] ParseError),
    #[error("Cannot change version: {0}")]
    StepError(#[from] StepError),
    #[error("Invalid segment: {0}")]
    SegmentError(#[from] SegmentRefError),
    #[error("Session error: {0}")]
    SessionError(String),
    #[error("Settings error: {0}")]
    SettingsError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VupError>;

/// Error ready to be shown to a person at the terminal
#[derive(Debug)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const UNSUPPORTED_VERSION: i32 = 3;
    pub const SETTINGS: i32 = 4;

    pub fn from_vup_error(err: &VupError) -> Self {
        let (hint, exit_code) = match err {
            VupError::ParseError(_) => (
                Some("Expected an optional prefix, dot-separated numbers and an optional suffix, e.g. v1.2.3-beta".to_string()),
                Self::UNSUPPORTED_VERSION,
            ),
            VupError::StepError(StepError::BelowZero { .. }) => (
                Some("Segments cannot go below 0".to_string()),
                Self::USAGE,
            ),
            VupError::StepError(StepError::IndexOutOfRange { len, .. }) => (
                Some(format!("Use an index between 0 and {}", len.saturating_sub(1))),
                Self::USAGE,
            ),
            VupError::StepError(StepError::Overflow { .. }) | VupError::SegmentError(_) => {
                (None, Self::USAGE)
            }
            VupError::SettingsError(_) | VupError::ConfigError(_) => (
                Some("Point vup at a settings file with --file or a vup.toml [settings] section".to_string()),
                Self::SETTINGS,
            ),
            VupError::IoError(_) | VupError::SessionError(_) | VupError::SerializationError(_) => {
                (None, Self::GENERAL)
            }
        };

        Self {
            message: err.to_string(),
            hint,
            exit_code,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("\n{hint}");
        }
    }
}
