//! Command layer for pipsync.
//!
//! pipsync has a single operation — the sync pass — so there is no
//! subcommand dispatch; [`sync::execute`] is the whole driver.

use std::process::ExitCode;

pub mod sync;

/// Exit status for pipsync.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The sync completed (including the nothing-to-sync case).
    Success,

    /// The lockfile could not be located at the resolved root.
    Failure,

    /// The run aborted with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}
