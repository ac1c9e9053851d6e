//! The sync driver: resolve the project root, discover requirements files,
//! reconcile each against the lockfile, and rewrite them.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::discovery::{
    DIRECT_REQUIREMENTS_FILE, LOCKFILE_NAME, PIPFILE_NAME, REQUIREMENTS_FILE,
    find_project_root, find_requirements_files,
};
use crate::graph::{GraphProvider, PipenvGraph};
use crate::pipfile::{LockFile, Manifest};
use crate::printer::Printer;
use crate::reconcile::{Reconciler, SyncOptions};
use crate::requirements::parse_requirements_file;

/// Execute the sync pass.
pub fn execute(cli: &Cli, printer: Printer) -> Result<ExitStatus> {
    let Some(root) = resolve_project_root(cli.path.as_deref(), printer)? else {
        return Ok(ExitStatus::Failure);
    };

    let excludes: FxHashSet<PathBuf> = cli.exclude.iter().map(|dir| root.join(dir)).collect();
    let target_name = if cli.in_place {
        REQUIREMENTS_FILE
    } else {
        DIRECT_REQUIREMENTS_FILE
    };

    let mut files = find_requirements_files(&root, &excludes, target_name);
    if files.is_empty() {
        printer.warn("No requirements files found.");
        return Ok(ExitStatus::Success);
    }
    files.sort();

    let manifest = Manifest::new(root.join(PIPFILE_NAME))?;
    let lockfile = LockFile::new(root.join(LOCKFILE_NAME))?;
    let graph = PipenvGraph::new(&root).dependency_graph()?;

    let options = SyncOptions {
        dev: cli.dev,
        force: cli.force,
        in_place: cli.in_place,
    };
    let reconciler = Reconciler::new(manifest, lockfile, graph, options, printer);

    let mut synced = 0u32;
    let mut skipped = 0u32;
    for file in files {
        let existing = parse_requirements_file(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let lines = reconciler.reconcile(&existing)?;

        if lines.is_empty() {
            printer.debug(&format!("Empty requirements file: {}", file.display()));
            skipped += 1;
            continue;
        }

        let output_path = if cli.in_place {
            file
        } else {
            file.with_file_name(REQUIREMENTS_FILE)
        };
        let mut content = lines.join("\n");
        content.push('\n');
        fs_err::write(&output_path, content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        printer.info(&format!("Syncing file: {}", output_path.display()));
        synced += 1;
    }

    printer.info(&format!("Synced {synced} files | Skipped {skipped} files"));
    Ok(ExitStatus::Success)
}

/// Resolve the project root from the optional PATH argument.
///
/// An explicit path may point at the Pipfile.lock itself or at the directory
/// containing it; with no path, the current directory and its ancestors are
/// searched. Returns `None` (after printing) when no lockfile can be
/// located — the caller exits with status 1.
fn resolve_project_root(path: Option<&Path>, printer: Printer) -> Result<Option<PathBuf>> {
    match path {
        Some(path) if path.file_name().is_some_and(|name| name == LOCKFILE_NAME) => {
            if path.is_file() {
                let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
                Ok(Some(parent.unwrap_or(Path::new(".")).to_path_buf()))
            } else {
                printer.error("Pipfile.lock not found at given path");
                Ok(None)
            }
        }
        Some(path) => {
            if path.join(LOCKFILE_NAME).is_file() {
                Ok(Some(path.to_path_buf()))
            } else {
                printer.error("Pipfile.lock not found at given path");
                Ok(None)
            }
        }
        None => {
            let cwd = env::current_dir().context("failed to resolve current directory")?;
            match find_project_root(&cwd) {
                Some(root) => Ok(Some(root)),
                None => {
                    printer.error("Pipfile.lock not found in the current directory or its parents");
                    Ok(None)
                }
            }
        }
    }
}
