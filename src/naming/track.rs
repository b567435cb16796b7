//! Leading track-number detection and removal

use once_cell::sync::Lazy;
use regex::Regex;

use super::filename::Filename;

/// Share of audio files that must carry a track number before stripping
const TRACK_NUMBER_SHARE: f64 = 0.7;

/// Digits followed by one or more space, dot, hyphen or underscore
static TRACK_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[\s.\-_]+").unwrap());

/// Decide whether a listing is numbered, e.g. `01 Intro.mp3`, `02 Verse.mp3`
///
/// Only names with an audio extension are considered. Returns false when
/// there are none.
pub fn should_strip_track_numbers<S: AsRef<str>>(filenames: &[S]) -> bool {
    let stems: Vec<String> = filenames
        .iter()
        .map(|name| Filename::parse(name.as_ref()))
        .filter(Filename::is_audio)
        .map(|name| name.stem)
        .collect();

    if stems.is_empty() {
        return false;
    }

    let numbered = stems.iter().filter(|stem| TRACK_NUMBER.is_match(stem)).count();
    numbered as f64 / stems.len() as f64 >= TRACK_NUMBER_SHARE
}

/// Remove a leading track number from a stem when `enabled`
pub fn strip_track_number(stem: &str, enabled: bool) -> String {
    if !enabled {
        return stem.to_string();
    }
    TRACK_NUMBER.replace(stem, "").into_owned()
}
