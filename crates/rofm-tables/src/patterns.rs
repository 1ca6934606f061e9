//! Line patterns shared by the table parsers.

use once_cell::sync::Lazy;
use regex::Regex;

/// A heading line: optional count, `d`, face count, then free text.
pub static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)?[dD]([0-9]+)(.*)").expect("valid heading regex"));

/// An outcome line: a number or `A-B` range, then the outcome text.
pub static ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(\s*-+\s*[0-9]+)?(.*)").expect("valid item regex"));

/// A die marker inside outcome text, capturing the face count and the rest.
pub static INLINE_DIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[dD]([0-9]+)(.*)").expect("valid inline die regex"));

/// Strip ASCII punctuation and whitespace from both ends of `text`.
pub fn strip_trash(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
}

/// True when `line` reads as a table heading.
pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(strip_trash(line))
}
