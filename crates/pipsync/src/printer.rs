//! Output for pipsync.
//!
//! All messages go to stderr so that stdout stays clean. The [`Printer`]
//! collapses the `--quiet`/`--verbose` flags into a [`Verbosity`] level and
//! gates each message class on it. Errors are always printed.

use anstream::eprintln;
use owo_colors::OwoColorize;

/// How much output the user asked for.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// `--quiet`: nothing but errors.
    Quiet,
    /// Default: info and warnings.
    Normal,
    /// `-v` and up: also debug messages.
    Verbose,
}

/// Gates pipsync's stderr output on the user's verbosity flags.
#[derive(Copy, Clone)]
pub struct Printer {
    verbosity: Verbosity,
}

impl Printer {
    /// Build a printer from the raw CLI flags. `--quiet` wins over `-v`.
    pub fn new(verbose: u8, quiet: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Self { verbosity }
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}: {}", "warning".yellow().bold(), message);
        }
    }

    /// Print an error message.
    ///
    /// Errors are always printed, even in quiet mode, because suppressing
    /// error output would hide actionable failures from the user.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", "error".red().bold(), message);
    }

    /// Print a debug message (only with `--verbose`).
    pub fn debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{}: {}", "debug".dimmed(), message);
        }
    }
}
