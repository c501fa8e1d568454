// Editing session over a host's version

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{is_dirty, segment_name, ParseError, ParsedVersion, StepperState};
use crate::services::version_host::{VersionSink, VersionSource};
use crate::utils::error::{Result, VupError};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing read from the host yet
    Uninitialized,
    /// Host version parsed; segments can be stepped
    Parsed {
        parsed: ParsedVersion,
        stepper: StepperState,
    },
    /// Host version has no recognizable numeric core
    Unsupported { error: ParseError },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Parsed { .. } => "parsed",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}

/// One stepper column: increment control, value, decrement control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentControl {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: u64,
    pub can_increment: bool,
    pub can_decrement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyControl {
    pub enabled: bool,
    pub label: String,
}

/// Everything a front-end needs to draw the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionView {
    Uninitialized,
    Unsupported {
        message: String,
    },
    Parsed {
        current: String,
        composed: String,
        dirty: bool,
        settings_label: String,
        updater_label: String,
        apply: ApplyControl,
        segments: Vec<SegmentControl>,
        reset: bool,
    },
}

/// A version-editing session bound to no particular host.
///
/// The host is passed into each operation that needs it, so the same
/// session logic drives an in-memory host in tests and a settings file in
/// the CLI.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    current_version: Option<String>,
    segment_names: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            current_version: None,
            segment_names: Vec::new(),
        }
    }

    /// Override the default major/minor/patch/build labels
    pub fn with_segment_names(mut self, names: Vec<String>) -> Self {
        self.segment_names = names;
        self
    }

    /// Create a session and read the host immediately
    pub fn open<S: VersionSource + ?Sized>(source: &S) -> Result<Self> {
        let mut session = Self::new();
        session.reload(source)?;
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Host version recorded at the last reload
    pub fn current_version(&self) -> Option<&str> {
        self.current_version.as_deref()
    }

    /// True when the host no longer holds the version this session was built from
    pub fn needs_reload<S: VersionSource + ?Sized>(&self, source: &S) -> Result<bool> {
        let host_version = source.current_version()?;
        Ok(self.current_version.as_deref() != Some(host_version.as_str()))
    }

    /// Lifecycle re-check: reload only if the host changed. Returns whether
    /// a reload happened. Pending edits are discarded when it does.
    pub fn refresh<S: VersionSource + ?Sized>(&mut self, source: &S) -> Result<bool> {
        if !self.needs_reload(source)? {
            return Ok(false);
        }

        if self.is_dirty() {
            if let Some(composed) = self.composed() {
                warn!(
                    discarded = %composed,
                    "host version changed externally, discarding pending edits"
                );
            }
        }
        self.reload(source)?;
        Ok(true)
    }

    /// Drop all edits and rebuild from the host's current version
    pub fn reset<S: VersionSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.reload(source)
    }

    fn reload<S: VersionSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.state = SessionState::Uninitialized;
        self.current_version = None;
        let version = source.current_version()?;
        self.load(version);
        Ok(())
    }

    fn load(&mut self, version: String) {
        self.state = match ParsedVersion::parse(&version) {
            Ok(parsed) => {
                debug!(%version, segments = parsed.len(), "parsed host version");
                let stepper = parsed.stepper();
                SessionState::Parsed { parsed, stepper }
            }
            Err(err) => {
                warn!(%version, "unsupported version format");
                SessionState::Unsupported { error: err }
            }
        };
        self.current_version = Some(version);
    }

    fn stepper_mut(&mut self) -> Result<&mut StepperState> {
        match &mut self.state {
            SessionState::Parsed { stepper, .. } => Ok(stepper),
            SessionState::Unsupported { error } => Err(VupError::ParseError(error.clone())),
            other => Err(VupError::SessionError(format!(
                "cannot edit segments while the session is {}",
                other.name()
            ))),
        }
    }

    pub fn increment(&mut self, index: usize) -> Result<u64> {
        Ok(self.stepper_mut()?.increment(index)?)
    }

    pub fn decrement(&mut self, index: usize) -> Result<u64> {
        Ok(self.stepper_mut()?.decrement(index)?)
    }

    pub fn set_segment(&mut self, index: usize, value: u64) -> Result<()> {
        Ok(self.stepper_mut()?.set(index, value)?)
    }

    /// Version string built from the current stepper values
    pub fn composed(&self) -> Option<String> {
        match &self.state {
            SessionState::Parsed { parsed, stepper } => Some(parsed.compose(stepper)),
            _ => None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match (self.current_version.as_deref(), self.composed()) {
            (Some(current), Some(composed)) => is_dirty(current, &composed),
            _ => false,
        }
    }

    /// Write the composed version to the host and re-derive the session
    /// from the new host value. Returns the written version, or `None` when
    /// there was nothing to write. Once the write succeeds the apply counts
    /// as done: if the host cannot be re-read, the session is rebuilt from
    /// the written version and the next refresh picks up the host again.
    pub fn apply<H: VersionSource + VersionSink + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<String>> {
        let composed = match &self.state {
            SessionState::Parsed { parsed, stepper } => parsed.compose(stepper),
            SessionState::Unsupported { error } => return Err(VupError::ParseError(error.clone())),
            SessionState::Uninitialized => {
                return Err(VupError::SessionError(
                    "nothing to apply before the host version is read".to_string(),
                ))
            }
        };

        if !self.is_dirty() {
            debug!(version = %composed, "version already in settings");
            return Ok(None);
        }

        host.write_version(&composed)?;
        info!(
            from = self.current_version.as_deref().unwrap_or_default(),
            to = %composed,
            "applied version"
        );
        if let Err(err) = self.reload(&*host) {
            warn!(version = %composed, error = %err, "could not re-read host after apply");
            self.load(composed.clone());
        }
        Ok(Some(composed))
    }

    /// Snapshot of the session for rendering
    pub fn view(&self) -> SessionView {
        match &self.state {
            SessionState::Uninitialized => SessionView::Uninitialized,
            SessionState::Unsupported { error } => SessionView::Unsupported {
                message: error.to_string(),
            },
            SessionState::Parsed { parsed, stepper } => {
                let current = self.current_version.clone().unwrap_or_default();
                let composed = parsed.compose(stepper);
                let dirty = is_dirty(&current, &composed);

                let segments = stepper
                    .values()
                    .iter()
                    .enumerate()
                    .map(|(index, &value)| SegmentControl {
                        index,
                        name: self.segment_label(index),
                        value,
                        can_increment: stepper.can_increment(index),
                        can_decrement: stepper.can_decrement(index),
                    })
                    .collect();

                let label = if dirty {
                    "Apply version to settings".to_string()
                } else {
                    format!("Version {composed} already in settings")
                };

                SessionView::Parsed {
                    settings_label: format!("Version in settings: {current}"),
                    updater_label: format!("Version in updater: {composed}"),
                    apply: ApplyControl {
                        enabled: dirty,
                        label,
                    },
                    segments,
                    reset: true,
                    current,
                    composed,
                    dirty,
                }
            }
        }
    }

    fn segment_label(&self, index: usize) -> Option<String> {
        self.segment_names
            .get(index)
            .cloned()
            .or_else(|| segment_name(index).map(str::to_string))
    }
}
