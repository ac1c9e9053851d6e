//! Reconciliation of a requirements file against the Pipfile and lockfile.
//!
//! The [`Reconciler`] computes, for one target file's existing entries, the
//! definitive replacement content: which package names belong in the output
//! (roots declared in the Pipfile, expanded through the dependency graph)
//! and which line each name resolves to (lockfile pins take precedence over
//! the file's pre-existing entries).

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashMap;

use crate::error::SyncError;
use crate::graph::DependencyGraph;
use crate::pipfile::{LockFile, Manifest};
use crate::printer::Printer;
use crate::requirements::Requirement;

/// Behavior switches for a reconciliation run.
#[derive(Debug, Copy, Clone, Default)]
pub struct SyncOptions {
    /// Include dev-packages in the eligible-root set and the version map.
    pub dev: bool,

    /// Remove entries that are not resolvable through the closure.
    pub force: bool,

    /// Rewrite requirements.txt files directly. Without `force`, in-place
    /// mode never drops a name already present in the file.
    pub in_place: bool,
}

/// Reconciles requirements files against the Pipfile, Pipfile.lock, and the
/// dependency graph. Shared across every target file in a run.
pub struct Reconciler {
    manifest: Manifest,
    lockfile: LockFile,
    graph: DependencyGraph,
    options: SyncOptions,
    printer: Printer,
}

impl Reconciler {
    /// Create a reconciler over the parsed project state.
    pub fn new(
        manifest: Manifest,
        lockfile: LockFile,
        graph: DependencyGraph,
        options: SyncOptions,
        printer: Printer,
    ) -> Self {
        Self {
            manifest,
            lockfile,
            graph,
            options,
            printer,
        }
    }

    /// Compute the replacement lines for one target file.
    ///
    /// Returns the requirement lines sorted ascending by package name. An
    /// empty input yields an empty output (the caller skips the file).
    pub fn reconcile(&self, existing: &[Requirement]) -> Result<Vec<String>, SyncError> {
        // Lower-cased name -> entry, last occurrence wins on duplicates.
        let mut requirements: FxHashMap<String, Requirement> = FxHashMap::default();
        for requirement in existing {
            requirements.insert(
                requirement.package_name.to_lowercase(),
                requirement.clone(),
            );
        }

        // The names the Pipfile declares as legitimate top-level deps.
        let environment: BTreeSet<String> = if self.options.dev {
            self.manifest.all_packages()?
        } else {
            self.manifest.default_packages()?.clone()
        };

        // Version map precedence, lowest first: the file's own entries,
        // then lockfile default pins, then lockfile dev pins.
        let mut version_map = requirements.clone();
        for (name, requirement) in self.lockfile.default()? {
            version_map.insert(name.clone(), requirement.clone());
        }
        if self.options.dev {
            for (name, requirement) in self.lockfile.dev()? {
                version_map.insert(name.clone(), requirement.clone());
            }
        }

        // Closure roots: names the file already lists AND the Pipfile knows.
        let roots: Vec<&str> = requirements
            .keys()
            .filter(|name| environment.contains(*name))
            .map(String::as_str)
            .collect();

        let mut full_dependencies = self.expand_roots(&roots);

        if self.options.in_place && !self.options.force {
            // Non-destructive default: nothing already present is dropped.
            full_dependencies.extend(requirements.keys().cloned());
        } else {
            let mut missing: Vec<&String> = requirements
                .keys()
                .filter(|name| !full_dependencies.contains(*name))
                .collect();
            missing.sort();
            for name in missing {
                if self.options.in_place {
                    self.printer
                        .info(&format!("Force Sync: package '{name}' removed"));
                } else if !self.options.dev && self.manifest.dev_packages()?.contains(name) {
                    self.printer
                        .debug(&format!("Skipped dev package '{name}'"));
                } else {
                    self.printer
                        .debug(&format!("Package '{name}' not found in Pipfile"));
                }
            }
        }

        // Resolve every selected name and emit sorted by stored name.
        let mut selected: Vec<&Requirement> = Vec::with_capacity(full_dependencies.len());
        for name in &full_dependencies {
            let requirement = version_map
                .get(name)
                .ok_or_else(|| SyncError::MissingPin(name.clone()))?;
            selected.push(requirement);
        }
        selected.sort_by(|a, b| a.package_name.cmp(&b.package_name));

        Ok(selected
            .into_iter()
            .map(|requirement| requirement.requirement_line.clone())
            .collect())
    }

    /// Worklist closure over the dependency graph from the given roots.
    ///
    /// Each root is included itself; a name absent from the graph gets one
    /// warning and no expansion.
    fn expand_roots(&self, roots: &[&str]) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<String> = roots.iter().map(|name| (*name).to_owned()).collect();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }
            if let Some(dependencies) = self.graph.get(&name) {
                for dependency in dependencies {
                    if !visited.contains(dependency) {
                        queue.push_back(dependency.clone());
                    }
                }
            } else {
                self.printer
                    .warn(&format!("package '{name}' not found in dependency graph"));
            }
        }
        visited
    }
}
