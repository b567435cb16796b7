//! Stem/extension splitting and the recognized audio extensions

/// Extensions that take part in pattern detection and track-number stripping
pub const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".flac", ".wav", ".m4a", ".aac", ".ogg", ".wma", ".opus",
];

/// Check whether an extension (with its leading dot) is a known audio extension
///
/// Comparison is case-insensitive, so `.MP3` and `.mp3` both match.
pub fn is_audio_extension(extension: &str) -> bool {
    AUDIO_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// A directory entry name split into stem and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filename {
    /// Everything before the extension
    pub stem: String,
    /// The extension including its dot (`".mp3"`), or empty
    pub extension: String,
}

impl Filename {
    /// Split a name at its last dot
    ///
    /// Leading dots never start an extension, so `.hidden` has none and
    /// `..mp3` keeps the whole name as its stem.
    pub fn parse(name: &str) -> Self {
        match name.rfind('.') {
            Some(idx) if !name[..idx].chars().all(|c| c == '.') => Self {
                stem: name[..idx].to_string(),
                extension: name[idx..].to_string(),
            },
            _ => Self {
                stem: name.to_string(),
                extension: String::new(),
            },
        }
    }

    /// Build a filename from an already-separated stem and extension
    pub fn new(stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    pub fn is_audio(&self) -> bool {
        is_audio_extension(&self.extension)
    }

    /// Reassemble the full name
    pub fn to_name(&self) -> String {
        format!("{}{}", self.stem, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let name = Filename::parse("Song.mp3");
        assert_eq!(name.stem, "Song");
        assert_eq!(name.extension, ".mp3");
    }

    #[test]
    fn test_parse_multiple_dots() {
        let name = Filename::parse("a.b.mp3");
        assert_eq!(name.stem, "a.b");
        assert_eq!(name.extension, ".mp3");
    }

    #[test]
    fn test_parse_no_extension() {
        assert_eq!(Filename::parse("Folder").extension, "");
        assert_eq!(Filename::parse(".hidden").stem, ".hidden");
        assert_eq!(Filename::parse(".hidden").extension, "");
        assert_eq!(Filename::parse("..mp3").extension, "");
    }

    #[test]
    fn test_trailing_dot() {
        let name = Filename::parse("odd.");
        assert_eq!(name.stem, "odd");
        assert_eq!(name.extension, ".");
    }

    #[test]
    fn test_audio_extension_case_insensitive() {
        assert!(is_audio_extension(".MP3"));
        assert!(is_audio_extension(".Flac"));
        assert!(!is_audio_extension(".jpg"));
        assert!(!is_audio_extension("mp3"));
        assert!(Filename::parse("Track.OPUS").is_audio());
    }

    #[test]
    fn test_round_trip_name() {
        assert_eq!(Filename::parse("Cover.jpg").to_name(), "Cover.jpg");
        assert_eq!(Filename::new("Intro", ".mp3").to_name(), "Intro.mp3");
    }
}
