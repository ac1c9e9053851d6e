//! Pipfile.lock parsing: the resolved package pins.
//!
//! The lockfile is a JSON document with `default` and `develop` tables
//! mapping package names to locked entries. Each entry is turned into a
//! [`Requirement`] via the three-tier derivation rule (version pin, VCS
//! reference, bare name). Parsing is lazy and memoized.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::SyncError;
use crate::requirements::Requirement;

/// Top-level Pipfile.lock structure.
///
/// `_meta` is present in every real lockfile but irrelevant here; unknown
/// keys are ignored. The two package tables are required.
#[derive(Debug, Deserialize)]
struct LockDoc {
    /// Production dependencies.
    default: BTreeMap<String, LockedPackage>,

    /// Development dependencies.
    develop: BTreeMap<String, LockedPackage>,
}

/// A locked package entry in the `default` or `develop` tables.
///
/// Registry packages carry `version` (with its comparison operator, e.g.
/// `"==1.2.3"`). Git-installed packages carry `git`/`ref`/`editable`
/// instead. Hashes, markers, and index fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockedPackage {
    /// Pinned version string, including the operator prefix.
    pub version: Option<String>,

    /// Git repository URL.
    pub git: Option<String>,

    /// Git ref (branch, tag, or commit).
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Whether the package is installed as editable.
    #[serde(default)]
    pub editable: bool,
}

/// Derived requirement tables, keyed by lower-cased package name.
#[derive(Debug)]
struct LockTables {
    default: BTreeMap<String, Requirement>,
    develop: BTreeMap<String, Requirement>,
}

/// The project Pipfile.lock: resolved pins for default and development
/// environments.
///
/// Parsing is lazy and memoized, like [`Manifest`](super::Manifest). A
/// missing file is a construction-time error.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    cache: OnceCell<LockTables>,
}

impl LockFile {
    /// Create a lockfile model for the Pipfile.lock at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SyncError::LockfileNotFound(path));
        }
        Ok(Self {
            path,
            cache: OnceCell::new(),
        })
    }

    /// Resolved production pins, keyed by lower-cased package name.
    pub fn default(&self) -> Result<&BTreeMap<String, Requirement>, SyncError> {
        Ok(&self.parsed()?.default)
    }

    /// Resolved development pins, keyed by lower-cased package name.
    pub fn dev(&self) -> Result<&BTreeMap<String, Requirement>, SyncError> {
        Ok(&self.parsed()?.develop)
    }

    /// Parse on first access, returning the cached result thereafter.
    fn parsed(&self) -> Result<&LockTables, SyncError> {
        if let Some(tables) = self.cache.get() {
            return Ok(tables);
        }

        let content = fs_err::read_to_string(&self.path)?;
        let doc: LockDoc =
            serde_json::from_str(&content).map_err(|source| SyncError::LockfileParse {
                path: self.path.clone(),
                source,
            })?;

        let tables = LockTables {
            default: derive_requirements(&doc.default),
            develop: derive_requirements(&doc.develop),
        };
        Ok(self.cache.get_or_init(|| tables))
    }
}

/// Map a raw locked table through the requirement derivation rule.
///
/// Keys are lower-cased for lookup; the emitted line keeps the casing the
/// lockfile entry used.
fn derive_requirements(table: &BTreeMap<String, LockedPackage>) -> BTreeMap<String, Requirement> {
    table
        .iter()
        .map(|(name, entry)| {
            (
                name.to_lowercase(),
                Requirement::from_lock_entry(name, entry),
            )
        })
        .collect()
}
