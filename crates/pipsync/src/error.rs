//! Error taxonomy for pipsync.
//!
//! Every fatal condition the core can hit is a [`SyncError`] variant. The
//! command layer wraps these in `anyhow` with additional context; per-package
//! conditions (graph misses, removal notices) are logged, never errored.

use std::path::PathBuf;

/// Errors raised by the pipsync core.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The Pipfile does not exist at the expected location.
    #[error("Pipfile not found at {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// The Pipfile.lock does not exist at the expected location.
    #[error("Pipfile.lock not found at {}", .0.display())]
    LockfileNotFound(PathBuf),

    /// The Pipfile exists but could not be parsed.
    #[error("failed to parse Pipfile at {}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The Pipfile.lock exists but could not be parsed.
    #[error("failed to parse Pipfile.lock at {}", .path.display())]
    LockfileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The external dependency graph command failed.
    #[error("failed to obtain the dependency graph: {0}")]
    GraphCommand(String),

    /// A package selected for output has no pinned requirement line.
    ///
    /// The version map is seeded from the target file's own entries before
    /// lockfile entries override them, so this cannot occur for any name the
    /// reconciler retains. Hitting it means the selection logic is broken.
    #[error("internal consistency failure: no requirement line for package '{0}'")]
    MissingPin(String),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
