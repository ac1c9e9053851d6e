//! File discovery: find requirements files under the project root, and the
//! project root itself.
//!
//! The walk descends into every subdirectory except those in the caller's
//! exclusion set and those whose name marks them hidden. Each invocation
//! re-walks from scratch.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use walkdir::WalkDir;

/// The filename rewritten in place (and generated in default mode).
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// The input filename for generated-file mode.
pub const DIRECT_REQUIREMENTS_FILE: &str = "requirements.direct.txt";

/// The lockfile name used for project-root resolution.
pub const LOCKFILE_NAME: &str = "Pipfile.lock";

/// The manifest name.
pub const PIPFILE_NAME: &str = "Pipfile";

/// Recursively find every file named `target_name` (case-insensitive) under
/// `root`, skipping excluded and hidden directories.
pub fn find_requirements_files(
    root: &Path,
    excludes: &FxHashSet<PathBuf>,
    target_name: &str,
) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            // Never prune the walk root, even if its own name is hidden.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            !excludes.contains(entry.path())
                && !entry.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .eq_ignore_ascii_case(target_name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Find the project root by walking up from `start` looking for a
/// `Pipfile.lock`. Returns the directory containing it.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(LOCKFILE_NAME).is_file())
        .map(Path::to_path_buf)
}
