//! Title normalization into a filesystem-safe, title-cased form
//!
//! The order of the passes is load-bearing: apostrophes are removed before
//! ASCII folding, and contractions are repaired before casing.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Apostrophe look-alikes removed before folding
const APOSTROPHES: &[char] = &[
    '\'',       // straight
    '`',        // backtick
    '\u{00B4}', // acute accent
    '\u{2018}', // left single quote
    '\u{2019}', // right single quote
    '\u{201B}', // reversed single quote
    '\u{02BC}', // modifier letter apostrophe
    '\u{FF07}', // fullwidth apostrophe
];

/// Runs of anything that is not an ASCII letter, digit or hyphen
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z-]+").unwrap());

/// A word followed by a lone `s` or `t` left over from a dropped apostrophe
static CONTRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\w+)\s([st])\b").unwrap());

/// Normalize an arbitrary title into `Title Cased Words`
///
/// Never fails: input without any convertible character yields an empty
/// string. Output only contains ASCII letters, digits, hyphens and single
/// interior spaces.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !APOSTROPHES.contains(c))
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase();

    let spaced = NON_WORD.replace_all(&folded, " ");
    let joined = join_contractions(&spaced);

    title_case(&joined)
}

/// Re-glue `it s` -> `its` and `don t` -> `dont`
///
/// Repeats until stable so that normalizing an already-normalized title is a
/// no-op.
fn join_contractions(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = CONTRACTION.replace_all(&current, "$1$2").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Collapse whitespace and capitalize the first letter of every word
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
