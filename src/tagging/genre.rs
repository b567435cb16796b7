//! Genre vocabulary and tag value selection

use crate::naming::normalize;

/// Genres accepted in the library
pub const VALID_GENRES: &[&str] = &[
    "Book", "Game", "Kid", "Movie", "Other", "Pop", "Rap", "Rock", "Tango", "Web",
];

/// Map free-form genre text onto one of [`VALID_GENRES`]
///
/// An exact (case-insensitive) match on the normalized text wins; otherwise
/// the first genre contained in the text, or containing it, is used.
pub fn normalize_genre(genre: &str) -> Option<&'static str> {
    let converted = normalize(genre).to_lowercase();
    if converted.is_empty() {
        return None;
    }

    VALID_GENRES
        .iter()
        .find(|valid| valid.to_lowercase() == converted)
        .or_else(|| {
            VALID_GENRES.iter().find(|valid| {
                let valid = valid.to_lowercase();
                converted.contains(&valid) || valid.contains(&converted)
            })
        })
        .copied()
}

/// Most frequent non-empty value, earliest first among ties
pub fn most_common<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values.into_iter().flatten().filter(|v| !v.trim().is_empty()) {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let best = counts.iter().map(|(_, count)| *count).max()?;
    counts
        .into_iter()
        .find(|(_, count)| *count == best)
        .map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_genre() {
        assert_eq!(normalize_genre("rock"), Some("Rock"));
        assert_eq!(normalize_genre("  TANGO "), Some("Tango"));
    }

    #[test]
    fn test_partial_genre() {
        assert_eq!(normalize_genre("rock music"), Some("Rock"));
        assert_eq!(normalize_genre("Hip-Hop/Rap"), Some("Rap"));
        assert_eq!(normalize_genre("kids"), Some("Kid"));
    }

    #[test]
    fn test_unknown_genre() {
        assert_eq!(normalize_genre("jazz"), None);
        assert_eq!(normalize_genre(""), None);
        assert_eq!(normalize_genre("!!"), None);
    }

    #[test]
    fn test_most_common() {
        let values = [Some("A"), Some("B"), Some("B"), None, Some("A"), Some("B")];
        assert_eq!(most_common(values), Some("B".to_string()));
    }

    #[test]
    fn test_most_common_tie_keeps_first_seen() {
        let values = [Some("Second"), Some("First"), Some("First"), Some("Second")];
        assert_eq!(most_common(values), Some("Second".to_string()));
    }

    #[test]
    fn test_most_common_empty() {
        assert_eq!(most_common([None, Some(""), Some("  ")]), None);
        assert_eq!(most_common(Vec::<Option<&str>>::new()), None);
    }
}
