//! Detection of prefixes and suffixes shared by sibling filenames
//!
//! Channel or artist branding such as `"Artist - "` or `" (Official Video)"`
//! is found across a directory listing so it can be removed before
//! normalization.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::filename::Filename;

/// Separators tried when looking for delimited prefixes
const PREFIX_SEPARATORS: &[&str] = &[" - ", " \u{2013} ", " \u{2014} ", " _ ", " | "];

/// Separators tried when looking for delimited suffixes
const SUFFIX_SEPARATORS: &[&str] = &[" - ", " \u{2013} ", " \u{2014} ", " | ", " "];

/// Word prefixes must cover this share of the files
const WORD_PREFIX_SHARE: f64 = 0.7;

/// Delimited patterns must cover this share of the files (capped at three files)
const SEPARATOR_SHARE: f64 = 0.3;

/// Which end of the stem a pattern is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Prefix,
    Suffix,
}

/// A shared piece of text to strip from filenames
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub text: String,
    pub kind: PatternKind,
}

impl Pattern {
    pub fn prefix(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PatternKind::Prefix,
        }
    }

    pub fn suffix(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PatternKind::Suffix,
        }
    }

    fn matches(&self, stem: &str) -> bool {
        match self.kind {
            PatternKind::Prefix => stem.starts_with(&self.text),
            PatternKind::Suffix => stem.ends_with(&self.text),
        }
    }
}

/// Occurrence counter that remembers first-seen order
///
/// `most_common` sorts by count and keeps insertion order among ties.
#[derive(Default)]
struct Tally {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, candidate: String) {
        match self.index.get(&candidate) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(candidate.clone(), self.order.len());
                self.order.push((candidate, 1));
            }
        }
    }

    fn most_common(mut self) -> Vec<String> {
        self.order.sort_by(|a, b| b.1.cmp(&a.1));
        self.order.into_iter().map(|(candidate, _)| candidate).collect()
    }
}

/// Find prefixes and suffixes shared by the audio files in a listing
///
/// Only names with an audio extension take part, and fewer than two of them
/// yield no patterns. The result is ordered longest first with redundant
/// shorter patterns of the same kind removed.
pub fn detect_patterns<S: AsRef<str>>(filenames: &[S]) -> Vec<Pattern> {
    let stems: Vec<String> = filenames
        .iter()
        .map(|name| Filename::parse(name.as_ref()))
        .filter(Filename::is_audio)
        .map(|name| name.stem)
        .collect();

    if stems.len() < 2 {
        return Vec::new();
    }

    let mut found_prefixes = HashSet::new();
    let mut patterns = Vec::new();

    for prefix in separator_prefixes(&stems, &mut found_prefixes) {
        patterns.push(Pattern::prefix(prefix));
    }
    for prefix in word_prefixes(&stems, &mut found_prefixes) {
        patterns.push(Pattern::prefix(prefix));
    }
    for suffix in separator_suffixes(&stems) {
        patterns.push(Pattern::suffix(suffix));
    }

    let patterns = drop_redundant(patterns);
    debug!("Detected {} shared patterns across {} files", patterns.len(), stems.len());
    patterns
}

/// Minimum number of files a delimited pattern must appear in
///
/// A pattern only counts as shared when at least two files carry it.
fn separator_threshold(file_count: usize) -> f64 {
    (file_count as f64 * SEPARATOR_SHARE).min(3.0).max(2.0)
}

fn count_starting_with(stems: &[String], prefix: &str) -> usize {
    stems.iter().filter(|stem| stem.starts_with(prefix)).count()
}

fn count_ending_with(stems: &[String], suffix: &str) -> usize {
    stems.iter().filter(|stem| stem.ends_with(suffix)).count()
}

/// Prefixes made of the first 1..k separator-delimited segments
fn separator_prefixes(stems: &[String], found: &mut HashSet<String>) -> Vec<String> {
    let threshold = separator_threshold(stems.len());
    let mut accepted = Vec::new();

    for &separator in PREFIX_SEPARATORS {
        let mut tally = Tally::default();
        for stem in stems.iter().filter(|stem| stem.contains(separator)) {
            let parts: Vec<&str> = stem.split(separator).collect();
            for i in 1..parts.len() {
                tally.add(format!("{}{}", parts[..i].join(separator), separator));
            }
        }

        for prefix in tally.most_common() {
            if found.contains(&prefix) {
                continue;
            }
            if count_starting_with(stems, &prefix) as f64 >= threshold {
                found.insert(prefix.clone());
                accepted.push(prefix);
            }
        }
    }

    accepted
}

/// Prefixes of the first one to three bare words, for branding without a separator
fn word_prefixes(stems: &[String], found: &mut HashSet<String>) -> Vec<String> {
    let threshold = stems.len() as f64 * WORD_PREFIX_SHARE;
    let mut tally = Tally::default();

    for stem in stems {
        let words: Vec<&str> = stem.split_whitespace().collect();
        for count in 1..words.len().min(4) {
            tally.add(format!("{} ", words[..count].join(" ")));
        }
    }

    let mut accepted = Vec::new();
    for prefix in tally.most_common() {
        if prefix.trim().len() < 3 {
            continue;
        }
        // Overlap with a delimited prefix in either direction means the
        // separator pass already owns this branding.
        if found
            .iter()
            .any(|known| known.contains(prefix.as_str()) || prefix.starts_with(known.as_str()))
        {
            continue;
        }
        if count_starting_with(stems, &prefix) as f64 >= threshold {
            found.insert(prefix.clone());
            accepted.push(prefix);
        }
    }

    accepted
}

/// Suffixes made of the last 1..3 separator-delimited segments
fn separator_suffixes(stems: &[String]) -> Vec<String> {
    let threshold = separator_threshold(stems.len());
    let mut found = HashSet::new();
    let mut accepted = Vec::new();

    for &separator in SUFFIX_SEPARATORS {
        let mut tally = Tally::default();
        for stem in stems.iter().filter(|stem| stem.contains(separator)) {
            let mut parts: Vec<&str> = stem.rsplitn(4, separator).collect();
            parts.reverse();
            for i in 1..parts.len() {
                let tail = parts[parts.len() - i..].join(separator);
                tally.add(format!("{}{}", separator, tail));
            }
        }

        for suffix in tally.most_common() {
            if found.contains(&suffix) {
                continue;
            }
            if count_ending_with(stems, &suffix) as f64 >= threshold {
                found.insert(suffix.clone());
                accepted.push(suffix);
            }
        }
    }

    accepted
}

/// Sort longest first and drop patterns contained in a kept pattern of the same kind
fn drop_redundant(mut patterns: Vec<Pattern>) -> Vec<Pattern> {
    patterns.sort_by_key(|pattern| std::cmp::Reverse(pattern.text.chars().count()));

    let mut kept: Vec<Pattern> = Vec::new();
    for pattern in patterns {
        let redundant = kept
            .iter()
            .any(|existing| existing.kind == pattern.kind && existing.text.contains(&pattern.text));
        if !redundant {
            kept.push(pattern);
        }
    }
    kept
}

/// Strip every matching pattern from a filename's stem until none applies
///
/// Whitespace exposed by a removal is trimmed and the original extension is
/// reattached. Each removal shortens the stem, so the loop always ends.
pub fn apply_patterns(filename: &str, patterns: &[Pattern]) -> String {
    let Filename { mut stem, extension } = Filename::parse(filename);

    let mut changed = true;
    while changed {
        changed = false;
        for pattern in patterns {
            if pattern.text.is_empty() || !pattern.matches(&stem) {
                continue;
            }
            let remaining = match pattern.kind {
                PatternKind::Prefix => &stem[pattern.text.len()..],
                PatternKind::Suffix => &stem[..stem.len() - pattern.text.len()],
            };
            stem = remaining.trim().to_string();
            changed = true;
        }
    }

    format!("{}{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp3s(stems: &[&str]) -> Vec<String> {
        stems.iter().map(|stem| format!("{stem}.mp3")).collect()
    }

    #[test]
    fn test_single_artist_prefix() {
        let files = mp3s(&["Artist - Song One", "Artist - Song Two", "Artist - Song Three"]);
        let patterns = detect_patterns(&files);

        assert_eq!(patterns, vec![Pattern::prefix("Artist - ")]);
        assert_eq!(apply_patterns(&files[0], &patterns), "Song One.mp3");
        assert_eq!(apply_patterns(&files[1], &patterns), "Song Two.mp3");
        assert_eq!(apply_patterns(&files[2], &patterns), "Song Three.mp3");
    }

    #[test]
    fn test_longer_prefix_wins() {
        let files = mp3s(&[
            "Artist - Live - First",
            "Artist - Live - Second",
            "Artist - Live - Third",
        ]);
        let patterns = detect_patterns(&files);

        assert_eq!(patterns, vec![Pattern::prefix("Artist - Live - ")]);
        assert_eq!(apply_patterns(&files[1], &patterns), "Second.mp3");
    }

    #[test]
    fn test_word_prefix_without_separator() {
        let files = mp3s(&["Aespa Next Level", "Aespa Savage", "Aespa Spicy", "Aespa Drama"]);
        let patterns = detect_patterns(&files);

        assert_eq!(patterns, vec![Pattern::prefix("Aespa ")]);
        assert_eq!(apply_patterns("Aespa Spicy.mp3", &patterns), "Spicy.mp3");
    }

    #[test]
    fn test_word_prefix_needs_seventy_percent() {
        let files = mp3s(&["Aespa Next Level", "Aespa Savage", "Other Song", "Another Tune"]);
        assert!(detect_patterns(&files).is_empty());
    }

    #[test]
    fn test_short_word_prefix_ignored() {
        let files = mp3s(&["DJ One", "DJ Two", "DJ Three"]);
        assert!(detect_patterns(&files).is_empty());
    }

    #[test]
    fn test_shared_suffix() {
        let files = mp3s(&[
            "First Light (Official Video)",
            "Northern Sky (Official Video)",
            "Ember (Official Video)",
        ]);
        let patterns = detect_patterns(&files);

        assert_eq!(patterns, vec![Pattern::suffix(" (Official Video)")]);
        assert_eq!(apply_patterns(&files[0], &patterns), "First Light.mp3");
        assert_eq!(apply_patterns(&files[2], &patterns), "Ember.mp3");
    }

    #[test]
    fn test_non_audio_files_ignored() {
        let files = vec![
            "Artist - One.jpg".to_string(),
            "Artist - Two.txt".to_string(),
            "Artist - Three.mp3".to_string(),
        ];
        assert!(detect_patterns(&files).is_empty());
    }

    #[test]
    fn test_fewer_than_two_files() {
        assert!(detect_patterns(&["Only - One.mp3"]).is_empty());
        assert!(detect_patterns::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_unrelated_files_have_no_patterns() {
        let files = mp3s(&["Alpha", "Bravo Charlie", "Delta - Echo"]);
        assert!(detect_patterns(&files).is_empty());
    }

    #[test]
    fn test_prefix_tolerates_mistagged_siblings() {
        let mut stems: Vec<String> = (1..=8).map(|i| format!("Channel - Track {i}")).collect();
        stems.push("Unrelated".to_string());
        stems.push("Something Else".to_string());
        let files: Vec<String> = stems.iter().map(|s| format!("{s}.flac")).collect();

        let patterns = detect_patterns(&files);
        assert!(patterns.contains(&Pattern::prefix("Channel - ")));
        assert_eq!(apply_patterns("Unrelated.flac", &patterns), "Unrelated.flac");
    }

    #[test]
    fn test_drop_redundant_keeps_kinds_apart() {
        let patterns = drop_redundant(vec![
            Pattern::prefix("Artist - "),
            Pattern::suffix(" - Artist - "),
            Pattern::prefix("Artist - Live - "),
        ]);
        assert_eq!(
            patterns,
            vec![Pattern::prefix("Artist - Live - "), Pattern::suffix(" - Artist - ")]
        );
    }

    #[test]
    fn test_drop_redundant_orders_by_characters() {
        // The en dash is one character but three bytes
        let patterns = drop_redundant(vec![
            Pattern::prefix("A \u{2013} "),
            Pattern::suffix(" Live"),
        ]);
        assert_eq!(
            patterns,
            vec![Pattern::suffix(" Live"), Pattern::prefix("A \u{2013} ")]
        );
    }

    #[test]
    fn test_apply_repeats_until_fixpoint() {
        let patterns = vec![Pattern::prefix("Artist - "), Pattern::suffix(" [HD]")];
        let once = apply_patterns("Artist - Artist - Song [HD] [HD].mp3", &patterns);
        assert_eq!(once, "Song.mp3");
        assert_eq!(apply_patterns(&once, &patterns), once);
    }

    #[test]
    fn test_apply_keeps_extension_and_unmatched_names() {
        let patterns = vec![Pattern::prefix("Artist - ")];
        assert_eq!(apply_patterns("Other - Song.FLAC", &patterns), "Other - Song.FLAC");
        assert_eq!(apply_patterns("Artist - Folder", &patterns), "Folder");
    }

    #[test]
    fn test_apply_can_consume_whole_stem() {
        let patterns = vec![Pattern::suffix(" Live")];
        assert_eq!(apply_patterns("Live.mp3", &patterns), "Live.mp3");
        assert_eq!(apply_patterns("x Live.mp3", &patterns), "x.mp3");
    }
}
