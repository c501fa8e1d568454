// Interactive editing session

use clap::Args;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

use crate::cli::context::Workspace;
use crate::cli::render::render_view;
use crate::models::SegmentRef;
use crate::services::Session;
use crate::utils::error::Result;

const HELP: &str = "\
Commands:
  +N, up N          increment segment N (lower segments reset to 0)
  -N, down N        decrement segment N (lower segments reset to 0)
  =N V, set N V     set segment N to V
  apply             write the new version to the settings file
  reset             discard edits and reload from the settings file
  show              print the current state
  help              print this help
  quit              leave without writing";

/// Step through the version interactively
#[derive(Debug, Args)]
pub struct EditCommand {}

/// One line of input in the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Increment(SegmentRef),
    Decrement(SegmentRef),
    Set(SegmentRef, u64),
    Apply,
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for EditAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let line = s.trim();
        let segment = |text: &str| text.parse::<SegmentRef>().map_err(|e| e.to_string());

        if let Some(rest) = line.strip_prefix('+') {
            return Ok(Self::Increment(segment(rest)?));
        }
        if let Some(rest) = line.strip_prefix('-') {
            return Ok(Self::Decrement(segment(rest)?));
        }
        if let Some(rest) = line.strip_prefix('=') {
            return parse_set(rest.split_whitespace().collect());
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("show").to_lowercase();
        let args: Vec<&str> = words.collect();

        match (command.as_str(), args.as_slice()) {
            ("up" | "inc", [n]) => Ok(Self::Increment(segment(*n)?)),
            ("down" | "dec", [n]) => Ok(Self::Decrement(segment(*n)?)),
            ("set", rest) => parse_set(rest.to_vec()),
            ("apply" | "a", []) => Ok(Self::Apply),
            ("reset" | "r", []) => Ok(Self::Reset),
            ("show" | "s", []) => Ok(Self::Show),
            ("help" | "?" | "h", []) => Ok(Self::Help),
            ("quit" | "q" | "exit", []) => Ok(Self::Quit),
            _ => Err(format!("Unknown command '{line}' (type 'help' for commands)")),
        }
    }
}

fn parse_set(args: Vec<&str>) -> std::result::Result<EditAction, String> {
    match args.as_slice() {
        [n, value] => {
            let segment = n.parse::<SegmentRef>().map_err(|e| e.to_string())?;
            let value = value
                .parse::<u64>()
                .map_err(|_| format!("Invalid value '{value}' (expected a non-negative integer)"))?;
            Ok(EditAction::Set(segment, value))
        }
        _ => Err("Usage: set <segment> <value>".to_string()),
    }
}

impl EditCommand {
    pub fn execute<R: BufRead, W: Write>(
        &self,
        workspace: &mut Workspace,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        let session = workspace.session()?;
        Self::run(session, workspace, input, out)
    }

    fn run<R: BufRead, W: Write>(
        mut session: Session,
        workspace: &mut Workspace,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        write!(out, "{}", render_view(&session.view()))?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };

            let action = match line.parse::<EditAction>() {
                Ok(action) => action,
                Err(msg) => {
                    writeln!(out, "{msg}")?;
                    continue;
                }
            };
            debug!(?action, "edit command");

            match action {
                EditAction::Quit => break,
                EditAction::Help => {
                    writeln!(out, "{HELP}")?;
                    continue;
                }
                // reset reloads unconditionally
                EditAction::Reset => {}
                _ => match session.refresh(&workspace.settings) {
                    Ok(true) => writeln!(out, "Settings changed externally; edits discarded.")?,
                    Ok(false) => {}
                    Err(err) => {
                        writeln!(out, "Error: {err}")?;
                        continue;
                    }
                },
            }

            match perform(action, &mut session, workspace) {
                Ok(Some(message)) => writeln!(out, "{message}")?,
                Ok(None) => {}
                Err(err) => {
                    writeln!(out, "Error: {err}")?;
                    continue;
                }
            }
            write!(out, "{}", render_view(&session.view()))?;
        }

        if session.is_dirty() {
            if let Some(composed) = session.composed() {
                writeln!(out, "Discarded unapplied version {composed}")?;
            }
        }
        Ok(())
    }
}

fn perform(
    action: EditAction,
    session: &mut Session,
    workspace: &mut Workspace,
) -> Result<Option<String>> {
    match action {
        EditAction::Increment(segment) => {
            session.increment(segment.index())?;
            Ok(None)
        }
        EditAction::Decrement(segment) => {
            session.decrement(segment.index())?;
            Ok(None)
        }
        EditAction::Set(segment, value) => {
            session.set_segment(segment.index(), value)?;
            Ok(None)
        }
        EditAction::Apply => Ok(Some(match session.apply(&mut workspace.settings)? {
            Some(version) => format!(
                "Applied {version} to {}",
                workspace.settings.path().display()
            ),
            None => "Nothing to apply".to_string(),
        })),
        EditAction::Reset => {
            session.reset(&workspace.settings)?;
            Ok(Some("Reset to settings".to_string()))
        }
        EditAction::Show | EditAction::Help | EditAction::Quit => Ok(None),
    }
}
