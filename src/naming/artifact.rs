//! Repair of literal `&#39;` leftovers in titles
//!
//! Titles that were unescaped improperly carry a stray `39` where an
//! apostrophe used to be, either on its own (`Don 39 t`) or already glued to
//! a possessive by an earlier normalization (`Song 39s`).

use once_cell::sync::Lazy;
use regex::Regex;

static GLUED_POSSESSIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s39s\b").unwrap());

static STANDALONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b39\b").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove `39` tokens left behind by `&#39;`
///
/// Digits inside a longer number (`1939`) are untouched. Passes repeat until
/// the stem stops changing, since dropping a standalone token can expose a
/// new ` 39s`.
pub fn strip_html_entity_artifact(stem: &str) -> String {
    let mut current = clean_once(stem);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(stem: &str) -> String {
    let removed = STANDALONE.replace_all(stem, "");
    let collapsed = WHITESPACE.replace_all(&removed, " ");
    let glued = GLUED_POSSESSIVE.replace_all(&collapsed, "s");
    glued.trim().to_string()
}
