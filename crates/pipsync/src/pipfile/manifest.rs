//! Pipfile parsing: the declared package sets.
//!
//! The Pipfile TOML schema allows packages to be specified as either a
//! simple version string (`"*"`, `">=1.0"`) or a table with extended fields
//! (`{version = ">=1.0", extras = ["security"]}`). pipsync only cares about
//! which names are declared; the constraint values are never interpreted.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::SyncError;

/// Top-level Pipfile structure.
///
/// Both package tables are required; a Pipfile without them is malformed
/// (pipenv always writes both sections).
#[derive(Debug, Deserialize)]
struct PipfileDoc {
    /// Production dependencies.
    packages: BTreeMap<String, PipfilePackage>,

    /// Development dependencies.
    #[serde(rename = "dev-packages")]
    dev_packages: BTreeMap<String, PipfilePackage>,
}

/// A package dependency in the Pipfile.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PipfilePackage {
    /// Simple version string: `requests = "*"` or `requests = ">=1.0"`.
    Simple(String),

    /// Table with extended fields: `requests = {version = ">=1.0", extras = ["security"]}`.
    Detailed(PipfilePackageDetail),
}

/// Extended package specification fields.
#[derive(Debug, Default, Deserialize)]
pub struct PipfilePackageDetail {
    /// Version specifier (e.g., `">=1.0"`, `"*"`).
    pub version: Option<String>,

    /// Extra features to install.
    #[serde(default)]
    pub extras: Vec<String>,

    /// PEP 508 environment markers.
    pub markers: Option<String>,

    /// Git repository URL.
    pub git: Option<String>,

    /// Git ref (branch, tag, or commit).
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Local path to a package.
    pub path: Option<String>,

    /// Whether the package is installed as editable.
    #[serde(default)]
    pub editable: bool,

    /// Specific index to install from.
    pub index: Option<String>,
}

/// Declared package name sets, lower-cased for lookup.
#[derive(Debug)]
struct DeclaredPackages {
    default: BTreeSet<String>,
    dev: BTreeSet<String>,
}

/// The project Pipfile: declared default and development package sets.
///
/// Parsing is lazy and memoized: the file is read and deserialized at most
/// once, on the first accessor call. A missing file is a construction-time
/// error.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    cache: OnceCell<DeclaredPackages>,
}

impl Manifest {
    /// Create a manifest for the Pipfile at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SyncError::ManifestNotFound(path));
        }
        Ok(Self {
            path,
            cache: OnceCell::new(),
        })
    }

    /// Declared production package names, lower-cased.
    pub fn default_packages(&self) -> Result<&BTreeSet<String>, SyncError> {
        Ok(&self.parsed()?.default)
    }

    /// Declared development package names, lower-cased.
    pub fn dev_packages(&self) -> Result<&BTreeSet<String>, SyncError> {
        Ok(&self.parsed()?.dev)
    }

    /// Union of default and development package names.
    pub fn all_packages(&self) -> Result<BTreeSet<String>, SyncError> {
        let declared = self.parsed()?;
        Ok(declared.default.union(&declared.dev).cloned().collect())
    }

    /// Parse on first access, returning the cached result thereafter.
    fn parsed(&self) -> Result<&DeclaredPackages, SyncError> {
        if let Some(declared) = self.cache.get() {
            return Ok(declared);
        }

        let content = fs_err::read_to_string(&self.path)?;
        let doc: PipfileDoc =
            toml::from_str(&content).map_err(|source| SyncError::ManifestParse {
                path: self.path.clone(),
                source,
            })?;

        let declared = DeclaredPackages {
            default: doc.packages.keys().map(|name| name.to_lowercase()).collect(),
            dev: doc
                .dev_packages
                .keys()
                .map(|name| name.to_lowercase())
                .collect(),
        };
        Ok(self.cache.get_or_init(|| declared))
    }
}
