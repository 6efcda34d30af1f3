//! Segment normalization.
//!
//! Each step is a pure `&str -> String` function; [`normalize`] applies them
//! in [`STEPS`] order.

use std::sync::OnceLock;

use regex::Regex;

/// A single normalization step.
pub type Step = fn(&str) -> String;

/// The normalization pipeline, in application order.
pub const STEPS: [Step; 5] = [
    fold_nbsp,
    fold_thin_spaces,
    tighten_terminal_punctuation,
    collapse_whitespace,
    trim,
];

/// Runs every step of [`STEPS`] over `s`.
pub fn normalize(s: &str) -> String {
    STEPS.iter().fold(s.to_owned(), |acc, step| step(&acc))
}

/// Non-breaking space to plain space.
pub fn fold_nbsp(s: &str) -> String {
    s.replace('\u{00A0}', " ")
}

/// Four-per-em, thin and narrow no-break spaces to plain space.
pub fn fold_thin_spaces(s: &str) -> String {
    s.replace(['\u{2005}', '\u{2009}', '\u{202F}'], " ")
}

/// Removes the gap in `word .`, `word ?` and `word !` when the punctuation
/// ends a sentence.
pub fn tighten_terminal_punctuation(s: &str) -> String {
    static TERMINAL_GAP: OnceLock<Regex> = OnceLock::new();
    let re = TERMINAL_GAP.get_or_init(|| {
        Regex::new(r"(\w)[ \t]+([.?!]+)(\s|$)").expect("Invalid terminal punctuation regex")
    });
    re.replace_all(s, "${1}${2}${3}").into_owned()
}

/// Collapses every whitespace run to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
    re.replace_all(s, " ").into_owned()
}

pub fn trim(s: &str) -> String {
    s.trim().to_owned()
}
