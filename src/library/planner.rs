//! Rename planning for a single directory listing

use tracing::debug;

use crate::naming::{
    Filename, Pattern, PatternKind, apply_patterns, detect_patterns, normalize,
    should_strip_track_numbers, strip_html_entity_artifact, strip_track_number,
};

/// Whether a listed entry is a regular file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One name from a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    fn is_audio_file(&self) -> bool {
        self.kind == EntryKind::File && Filename::parse(&self.name).is_audio()
    }
}

/// What should happen to one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameAction {
    Unchanged { name: String },
    Rename { from: String, to: String },
}

/// The analysis and per-entry actions for one directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryPlan {
    pub patterns: Vec<Pattern>,
    pub strip_track_numbers: bool,
    pub actions: Vec<RenameAction>,
}

impl DirectoryPlan {
    pub fn prefixes(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(|p| p.kind == PatternKind::Prefix)
    }

    pub fn suffixes(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(|p| p.kind == PatternKind::Suffix)
    }

    /// Only the entries that actually change
    pub fn renames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actions.iter().filter_map(|action| match action {
            RenameAction::Rename { from, to } => Some((from.as_str(), to.as_str())),
            RenameAction::Unchanged { .. } => None,
        })
    }
}

/// Plan the new name of every entry in a directory listing
///
/// Artifacts are cleaned before pattern detection so a `39` does not hide a
/// shared prefix. Track numbers are judged on the original names.
pub fn plan_directory(entries: &[Entry]) -> DirectoryPlan {
    let audio_files: Vec<&str> = entries
        .iter()
        .filter(|entry| entry.is_audio_file())
        .map(|entry| entry.name.as_str())
        .collect();

    let strip_track_numbers = should_strip_track_numbers(&audio_files);

    let cleaned: Vec<String> = audio_files.iter().map(|name| clean_artifacts(name)).collect();
    let patterns = detect_patterns(&cleaned);

    let actions = entries
        .iter()
        .map(|entry| plan_entry(entry, &patterns, strip_track_numbers))
        .collect();

    DirectoryPlan {
        patterns,
        strip_track_numbers,
        actions,
    }
}

fn clean_artifacts(name: &str) -> String {
    let Filename { stem, extension } = Filename::parse(name);
    format!("{}{}", strip_html_entity_artifact(&stem), extension)
}

fn plan_entry(entry: &Entry, patterns: &[Pattern], strip_track_numbers: bool) -> RenameAction {
    let audio = entry.is_audio_file();

    let cleaned = if audio {
        clean_artifacts(&entry.name)
    } else {
        entry.name.clone()
    };

    let stripped = Filename::parse(&apply_patterns(&cleaned, patterns));
    let mut stem = normalize(&stripped.stem);
    if audio {
        stem = strip_track_number(&stem, strip_track_numbers);
    }

    if stem.is_empty() {
        debug!("Nothing left of {:?} after normalization, leaving it alone", entry.name);
        return RenameAction::Unchanged {
            name: entry.name.clone(),
        };
    }

    let new_name = Filename::new(stem, stripped.extension).to_name();
    if new_name == entry.name {
        RenameAction::Unchanged {
            name: entry.name.clone(),
        }
    } else {
        RenameAction::Rename {
            from: entry.name.clone(),
            to: new_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renamed(plan: &DirectoryPlan) -> Vec<(String, String)> {
        plan.renames()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    #[test]
    fn test_track_numbers_and_non_audio() {
        let entries = vec![
            Entry::file("01 Intro.mp3"),
            Entry::file("02 Verse.mp3"),
            Entry::file("03 Outro.mp3"),
            Entry::file("cover.jpg"),
        ];
        let plan = plan_directory(&entries);

        assert!(plan.strip_track_numbers);
        assert_eq!(
            renamed(&plan),
            vec![
                ("01 Intro.mp3".to_string(), "Intro.mp3".to_string()),
                ("02 Verse.mp3".to_string(), "Verse.mp3".to_string()),
                ("03 Outro.mp3".to_string(), "Outro.mp3".to_string()),
                ("cover.jpg".to_string(), "Cover.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_shared_prefix_removed() {
        let entries = vec![
            Entry::file("Artist - Song One.mp3"),
            Entry::file("Artist - Song Two.mp3"),
            Entry::file("Artist - Song Three.mp3"),
        ];
        let plan = plan_directory(&entries);

        assert_eq!(plan.prefixes().count(), 1);
        assert_eq!(plan.suffixes().count(), 0);
        assert_eq!(
            renamed(&plan),
            vec![
                ("Artist - Song One.mp3".to_string(), "Song One.mp3".to_string()),
                ("Artist - Song Two.mp3".to_string(), "Song Two.mp3".to_string()),
                ("Artist - Song Three.mp3".to_string(), "Song Three.mp3".to_string()),
            ]
        );
    }

    #[test]
    fn test_already_clean_is_unchanged() {
        let entries = vec![Entry::file("Intro.mp3"), Entry::directory("Live")];
        let plan = plan_directory(&entries);

        assert_eq!(renamed(&plan), Vec::<(String, String)>::new());
        assert_eq!(plan.actions.len(), 2);
    }

    #[test]
    fn test_directories_are_normalized_but_not_audio() {
        let entries = vec![
            Entry::directory("01 best of.mp3"),
            Entry::file("01 Intro.mp3"),
            Entry::file("02 Verse.mp3"),
        ];
        let plan = plan_directory(&entries);

        assert!(plan.strip_track_numbers);
        assert_eq!(
            plan.actions[0],
            RenameAction::Rename {
                from: "01 best of.mp3".to_string(),
                to: "01 Best Of.mp3".to_string(),
            }
        );
    }

    #[test]
    fn test_html_artifact_cleaned_for_audio_only() {
        let entries = vec![Entry::file("Song 39s Title.mp3"), Entry::file("1939 Song.mp3")];
        let plan = plan_directory(&entries);

        assert_eq!(
            renamed(&plan),
            vec![("Song 39s Title.mp3".to_string(), "Songs Title.mp3".to_string())]
        );
    }

    #[test]
    fn test_empty_result_left_alone() {
        let entries = vec![Entry::file("日本語.mp3")];
        let plan = plan_directory(&entries);

        assert_eq!(
            plan.actions,
            vec![RenameAction::Unchanged {
                name: "日本語.mp3".to_string()
            }]
        );
    }
}
