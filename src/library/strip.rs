//! Bulk removal of a literal piece of text from audio filenames

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::planner::EntryKind;
use super::renamer::{RenameSummary, list_entries, rename_entry};
use crate::naming::Filename;

/// New name for `name` with every occurrence of `pattern` removed
///
/// Returns `None` when the name is not an audio file, does not contain the
/// pattern, or would become empty.
pub fn strip_from_name(name: &str, pattern: &str) -> Option<String> {
    if pattern.is_empty() || !Filename::parse(name).is_audio() || !name.contains(pattern) {
        return None;
    }

    let stripped = name.replace(pattern, "");
    let stripped = stripped.trim();
    let parsed = Filename::parse(stripped);

    if !parsed.is_audio() || parsed.stem.trim().is_empty() || stripped == name {
        return None;
    }
    Some(stripped.to_string())
}

/// Remove `pattern` from every audio filename directly inside `dir`
pub fn strip_pattern(dir: &Path, pattern: &str, dry_run: bool) -> Result<RenameSummary> {
    let mut summary = RenameSummary {
        directories: 1,
        ..Default::default()
    };

    for entry in list_entries(dir)? {
        if entry.kind != EntryKind::File {
            continue;
        }
        match strip_from_name(&entry.name, pattern) {
            Some(new_name) => {
                summary.record(rename_entry(dir, &entry.name, &new_name, dry_run));
            }
            None => debug!("File not changed: {}", entry.name),
        }
    }

    Ok(summary)
}
