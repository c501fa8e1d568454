// CLI module for command-line interface

pub mod bump;
pub mod context;
pub mod edit;
pub mod render;
pub mod show;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use crate::utils::error::Result;

use self::bump::{BumpCommand, SetCommand};
use self::context::{GlobalArgs, Workspace};
use self::edit::EditCommand;
use self::show::ShowCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "vup")]
#[command(about = "Bump the segments of a project's version and write it back to its settings")]
#[command(long_about = r#"vup shows a project's version as independent segments (major, minor,
patch, ...), bumps the one you pick, resets the lower-order segments to 0
and writes the result back into the project's build settings.

Supported settings files:
  • Unity ProjectSettings/ProjectSettings.asset (bundleVersion)
  • TOML manifests: Cargo.toml, project.toml, pyproject.toml
  • Plain files holding only the version, e.g. VERSION

Examples:
  vup show                     Show the current version and its segments
  vup bump minor               1.2.3 -> 1.3.0
  vup bump 0 --down            2.0.0 -> 1.0.0
  vup set patch 7              1.2.3 -> 1.2.7
  vup edit                     Step through segments interactively"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current version broken into segments
    Show(ShowCommand),

    /// Increment or decrement one segment and write the new version
    #[command(long_about = r#"Increment (or with --down, decrement) one segment and write the
new version to the settings file. Every lower-order segment resets to 0.

A segment is addressed by its zero-based index or by name:
major (0), minor (1), patch (2), build (3).

Decrementing a segment that is already 0 is refused.

Examples:
  vup bump patch               v1.2.3 -> v1.2.4
  vup bump major               v1.2.3 -> v2.0.0
  vup bump minor --down        v1.2.3 -> v1.1.0
  vup bump 1 --dry-run         Print the result without writing"#)]
    Bump(BumpCommand),

    /// Set one segment to a value and write the new version
    Set(SetCommand),

    /// Edit the version interactively
    #[command(long_about = r#"Open an interactive session. The version is re-read from the
settings file before every command; if it changed on disk, pending edits are
discarded. Type 'help' inside the session for the command list."#)]
    Edit(EditCommand),
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command in the current directory
    pub fn execute(global: &GlobalArgs, command: Commands) -> Result<()> {
        let dir = std::env::current_dir()?;
        let mut workspace = Workspace::open(global, &dir)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match command {
            Commands::Show(cmd) => cmd.execute(&workspace, &mut out),
            Commands::Bump(cmd) => cmd.execute(&mut workspace, &mut out),
            Commands::Set(cmd) => cmd.execute(&mut workspace, &mut out),
            Commands::Edit(cmd) => {
                let stdin = io::stdin();
                cmd.execute(&mut workspace, stdin.lock(), &mut out)
            }
        }?;

        out.flush()?;
        Ok(())
    }
}
