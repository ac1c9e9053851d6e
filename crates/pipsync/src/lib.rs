//! pipsync: sync requirements.txt files with a project Pipfile.
//!
//! This crate provides the main entry point for the pipsync binary. It parses
//! CLI arguments, resolves the project root, and reconciles every discovered
//! requirements file against the versions pinned in `Pipfile.lock`.

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsString;
use std::process::ExitCode;

use anstream::eprintln;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::printer::Printer;

pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod pipfile;
pub mod printer;
pub mod reconcile;
pub mod requirements;

/// Entry point for the pipsync CLI.
///
/// Parses CLI arguments and runs the sync in a single pass: discover
/// requirements files, reconcile each against the lockfile, rewrite.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let printer = Printer::new(cli.verbose, cli.quiet);

    match commands::sync::execute(&cli, printer) {
        Ok(code) => code.into(),
        Err(err) => {
            let mut causes = err.chain();
            // An anyhow::Error always has at least one cause (itself).
            if let Some(cause) = causes.next() {
                printer.error(&cause.to_string());
            }
            for cause in causes {
                eprintln!(
                    "  {}: {}",
                    "Caused by".red().bold(),
                    cause.to_string().trim()
                );
            }
            ExitStatus::Error.into()
        }
    }
}
