//! Directory walking and rename execution

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::planner::{DirectoryPlan, Entry, plan_directory};

/// Counters reported after a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    pub directories: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of a single rename attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    WouldRename,
    TargetExists,
    Failed,
}

impl RenameSummary {
    pub(crate) fn record(&mut self, outcome: RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed | RenameOutcome::WouldRename => self.renamed += 1,
            RenameOutcome::TargetExists => self.skipped += 1,
            RenameOutcome::Failed => self.failed += 1,
        }
    }
}

/// Normalize every name under `root`, deepest directories first
///
/// A directory's contents are renamed before the directory itself, so paths
/// already visited stay valid. Unreadable directories and failed renames are
/// reported and skipped.
pub fn normalize_library(root: &Path, dry_run: bool) -> Result<RenameSummary> {
    let mut summary = RenameSummary::default();

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read directory entry: {}", e);
                summary.failed += 1;
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        match normalize_directory(entry.path(), dry_run, &mut summary) {
            Ok(()) => summary.directories += 1,
            Err(e) => {
                warn!("Skipping {}: {:#}", entry.path().display(), e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Plan and apply the renames for one directory, without recursing
pub fn normalize_directory(dir: &Path, dry_run: bool, summary: &mut RenameSummary) -> Result<()> {
    info!("Processing directory: {}", dir.display());

    let entries = list_entries(dir)?;
    let plan = plan_directory(&entries);
    log_plan(&plan);

    for (from, to) in plan.renames() {
        summary.record(rename_entry(dir, from, to, dry_run));
    }

    Ok(())
}

/// Read the names in a directory, sorted for a stable order
///
/// Only failing to open the directory is an error. Entries that cannot be
/// read or stat'ed are warned about and left out.
pub fn list_entries(dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    for item in read_dir {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if let Some(entry) = classify_entry(item.file_name(), item.file_type()) {
            entries.push(entry);
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

fn classify_entry(raw_name: OsString, file_type: io::Result<fs::FileType>) -> Option<Entry> {
    let name = match raw_name.into_string() {
        Ok(name) => name,
        Err(raw) => {
            warn!("Skipping non UTF-8 name {:?}", raw);
            return None;
        }
    };

    match file_type {
        Ok(file_type) if file_type.is_dir() => Some(Entry::directory(name)),
        Ok(_) => Some(Entry::file(name)),
        Err(e) => {
            warn!("Skipping {}: cannot stat: {}", name, e);
            None
        }
    }
}

/// Whether two paths resolve to the same entry, e.g. names differing only in
/// case on a case-insensitive filesystem
fn is_same_entry(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Rename `from` to `to` inside `dir`, never overwriting an existing entry
pub fn rename_entry(dir: &Path, from: &str, to: &str, dry_run: bool) -> RenameOutcome {
    let old_path = dir.join(from);
    let new_path = dir.join(to);

    if new_path.exists() && !is_same_entry(&old_path, &new_path) {
        warn!("Target already exists, skipping: {} -> {}", from, to);
        return RenameOutcome::TargetExists;
    }

    if dry_run {
        info!("Would rename: {} -> {}", from, to);
        return RenameOutcome::WouldRename;
    }

    match fs::rename(&old_path, &new_path) {
        Ok(()) => {
            info!("Renamed: {} -> {}", from, to);
            RenameOutcome::Renamed
        }
        Err(e) => {
            warn!("Failed to rename {}: {}", from, e);
            RenameOutcome::Failed
        }
    }
}

fn log_plan(plan: &DirectoryPlan) {
    if plan.strip_track_numbers {
        info!("Track numbers detected, removing them");
    }
    for prefix in plan.prefixes() {
        info!("Common prefix detected: {:?}", prefix.text);
    }
    for suffix in plan.suffixes() {
        info!("Common suffix detected: {:?}", suffix.text);
    }
}
