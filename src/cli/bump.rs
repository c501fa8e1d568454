use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::cli::context::Workspace;
use crate::models::SegmentRef;
use crate::services::Session;
use crate::utils::error::Result;

/// Increment (or decrement) one segment and write the result
#[derive(Debug, Args)]
pub struct BumpCommand {
    /// Segment index (0 = most significant) or major/minor/patch/build
    pub segment: SegmentRef,

    /// Decrement instead of increment
    #[arg(long)]
    pub down: bool,

    /// Show the new version without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Set one segment to an explicit value and write the result
#[derive(Debug, Args)]
pub struct SetCommand {
    /// Segment index (0 = most significant) or major/minor/patch/build
    pub segment: SegmentRef,

    /// New value for the segment
    pub value: u64,

    /// Show the new version without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeStatus {
    Updated,
    Unchanged,
    DryRun,
}

/// JSON response format for bump and set commands
#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    pub status: ChangeStatus,
    pub previous: String,
    pub version: String,
    pub file: String,
}

impl BumpCommand {
    pub fn execute<W: Write>(&self, workspace: &mut Workspace, out: &mut W) -> Result<()> {
        let mut session = workspace.session()?;
        let index = self.segment.index();
        if self.down {
            session.decrement(index)?;
        } else {
            session.increment(index)?;
        }
        finish(session, workspace, self.dry_run, self.json, out)
    }
}

impl SetCommand {
    pub fn execute<W: Write>(&self, workspace: &mut Workspace, out: &mut W) -> Result<()> {
        let mut session = workspace.session()?;
        session.set_segment(self.segment.index(), self.value)?;
        finish(session, workspace, self.dry_run, self.json, out)
    }
}

fn finish<W: Write>(
    mut session: Session,
    workspace: &mut Workspace,
    dry_run: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let previous = session.current_version().unwrap_or_default().to_string();
    let composed = session.composed().unwrap_or_default();

    let status = if !session.is_dirty() {
        ChangeStatus::Unchanged
    } else if dry_run {
        ChangeStatus::DryRun
    } else {
        session.apply(&mut workspace.settings)?;
        ChangeStatus::Updated
    };

    let file = workspace.settings.path().display().to_string();
    if json {
        let response = ChangeResponse {
            status,
            previous,
            version: composed,
            file,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    } else {
        match status {
            ChangeStatus::Updated => writeln!(out, "Updated {file}: {previous} -> {composed}")?,
            ChangeStatus::DryRun => writeln!(out, "Would update {file}: {previous} -> {composed}")?,
            ChangeStatus::Unchanged => writeln!(out, "Version {composed} already in {file}")?,
        }
    }

    Ok(())
}
