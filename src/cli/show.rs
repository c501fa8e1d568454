use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::cli::context::Workspace;
use crate::cli::render::render_view;
use crate::services::SessionView;
use crate::utils::error::Result;

/// Print the current version broken into segments
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for show command
#[derive(Debug, Serialize)]
pub struct ShowResponse<'a> {
    pub file: String,
    pub format: String,
    #[serde(flatten)]
    pub view: &'a SessionView,
}

impl ShowCommand {
    pub fn execute<W: Write>(&self, workspace: &Workspace, out: &mut W) -> Result<()> {
        let session = workspace.session()?;
        let view = session.view();

        if self.json {
            let response = ShowResponse {
                file: workspace.settings.path().display().to_string(),
                format: workspace.settings.format().to_string(),
                view: &view,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        } else {
            write!(out, "{}", render_view(&view))?;
        }

        Ok(())
    }
}
