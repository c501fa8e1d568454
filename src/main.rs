// vup - segmented version updater
// Main CLI entry point

use clap::Parser;
use std::process;
use version_updater::cli::{Cli, CliDispatcher};
use version_updater::utils::error::UserError;
use version_updater::utils::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global.log_filter);

    let result = CliDispatcher::execute(&cli.global, cli.command);

    if let Err(err) = result {
        let user_error = UserError::from_vup_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
