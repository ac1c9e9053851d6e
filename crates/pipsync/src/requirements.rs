//! The [`Requirement`] model: one package name plus the exact line to emit.
//!
//! A requirement is built exactly once, by one of two factory paths: parsed
//! from a line of an existing requirements file, or derived from a
//! `Pipfile.lock` entry. The formatted line is never mutated afterwards.

use std::path::Path;

use crate::error::SyncError;
use crate::pipfile::lock::LockedPackage;

/// A single package pin: the package name and the line that represents it
/// in a requirements file (without trailing newline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The package name, in whatever casing the source used.
    pub package_name: String,

    /// The exact text to emit for this package.
    pub requirement_line: String,
}

impl Requirement {
    /// Parse a single line of a requirements file.
    ///
    /// Returns `None` for blank lines. For VCS references
    /// (`[-e ]git+URL[@ref]#egg=name`) the package name is taken from the
    /// `egg=` fragment; otherwise it is the text before the first `==`, or
    /// the whole line when no separator is present. Malformed lines
    /// degenerate to the bare-name case rather than failing.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let package_name = vcs_egg_name(line)
            .unwrap_or_else(|| line.split_once("==").map_or(line, |(name, _)| name))
            .to_owned();

        Some(Self {
            package_name,
            requirement_line: line.to_owned(),
        })
    }

    /// Derive a requirement from a `Pipfile.lock` package entry.
    ///
    /// Priority order: an explicit version pin (`<name><version>`, the
    /// version string carries its own comparison operator), then a VCS
    /// reference (`[-e ]git+<url>[@<ref>]#egg=<name>`), then the bare name.
    pub fn from_lock_entry(name: &str, entry: &LockedPackage) -> Self {
        let requirement_line = if let Some(ref version) = entry.version {
            format!("{name}{version}")
        } else if let Some(ref git) = entry.git {
            let prefix = if entry.editable { "-e " } else { "" };
            let reference = entry
                .git_ref
                .as_deref()
                .map(|r| format!("@{r}"))
                .unwrap_or_default();
            format!("{prefix}git+{git}{reference}#egg={name}")
        } else {
            name.to_owned()
        };

        Self {
            package_name: name.to_owned(),
            requirement_line,
        }
    }
}

/// Parse a requirements file into its non-blank entries, in file order.
pub fn parse_requirements_file(path: &Path) -> Result<Vec<Requirement>, SyncError> {
    let content = fs_err::read_to_string(path)?;
    Ok(content.lines().filter_map(Requirement::parse_line).collect())
}

/// Extract the `egg=` package name from a VCS reference line, if the line
/// has the `[-e ]git+...#egg=<name>` shape.
fn vcs_egg_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("-e ").unwrap_or(line);
    if !rest.starts_with("git+") {
        return None;
    }
    let (_, egg) = rest.split_once("#egg=")?;
    Some(egg)
}
