//! CLI argument definitions for pipsync.
//!
//! pipsync is a single-purpose tool, so the surface is one flat [`Cli`]
//! struct rather than subcommands.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Clap v3-style help menu colors.
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Sync requirements.txt files with a project Pipfile.
#[derive(Parser, Debug)]
#[command(
    name = "pipsync",
    author,
    version,
    about = "Sync requirements.txt files with a project Pipfile.",
    styles = STYLES
)]
pub struct Cli {
    /// Project root or Pipfile.lock location.
    ///
    /// If omitted, pipsync searches the current directory and its parents
    /// for a Pipfile.lock.
    pub path: Option<PathBuf>,

    /// Exclude top level directories from the requirements file search.
    #[arg(short = 'x', long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Remove packages in requirements.txt files that are not in the Pipfile.
    #[arg(short, long)]
    pub force: bool,

    /// Rewrite requirements.txt files directly instead of generating them
    /// from requirements.direct.txt inputs.
    #[arg(short, long = "in-place")]
    pub in_place: bool,

    /// Include dev-packages from the Pipfile.
    #[arg(long)]
    pub dev: bool,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output.
    #[arg(short, long)]
    pub quiet: bool,
}
