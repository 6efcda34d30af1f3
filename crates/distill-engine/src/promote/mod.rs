//! # Plain-Text Promotion
//!
//! Turns raw text without markup into an HTML skeleton the tree walker can
//! consume: blank lines become paragraph boundaries, bullet lines become
//! `<ul>` items and numbered lines become `<ol>` items.
//!
//! ## Phases
//!
//! 1. **Marking** ([`MARKING_STEPS`]): ordered string rewrites that wrap the
//!    input in `<p>`, drop separator lines, and replace list prefixes with the
//!    `<li> ` / `<oli> ` line markers
//! 2. **List wrapping** ([`lists`]): a line scan that groups consecutive marked
//!    lines into list runs and wraps each run in its container

pub mod lists;

use std::sync::OnceLock;

use regex::Regex;

/// Line marker for an unordered item.
pub const UNORDERED_MARKER: &str = "<li> ";
/// Line marker for an ordered item, rewritten to `<li> ` when wrapped.
pub const ORDERED_MARKER: &str = "<oli> ";

/// A single marking rewrite.
pub type MarkingStep = fn(&str) -> String;

/// Marking rewrites, in application order.
pub const MARKING_STEPS: [MarkingStep; 6] = [
    wrap_paragraph,
    break_separator_lines,
    mark_bullets,
    mark_numbers,
    split_paragraphs,
    drop_empty_items,
];

/// Converts raw text into HTML with detected paragraphs and lists.
pub fn text_to_html(text: &str) -> String {
    let marked = MARKING_STEPS
        .iter()
        .fold(text.to_owned(), |acc, step| step(&acc));
    lists::wrap_lists(&marked)
}

/// Heuristic used by callers that receive either markup or plain text.
pub fn looks_like_markup(input: &str) -> bool {
    input.contains('<')
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid promotion regex"))
}

pub fn wrap_paragraph(s: &str) -> String {
    format!("<p>{s}</p>")
}

/// A line made only of `-`/`*` runs becomes a blank line. On the first line
/// there is nothing to separate, so the run is dropped.
pub fn break_separator_lines(s: &str) -> String {
    static LEADING_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let s = regex(&LEADING_SEPARATOR, r"\A<p>[ \t]*[-*]{2,}[ \t]*\n").replace(s, "<p>");
    regex(&SEPARATOR, r"\n[ \t]*[-*]{2,}[ \t]*\n")
        .replace_all(&s, "\n\n")
        .into_owned()
}

/// Bullet glyphs at the start of a line become [`UNORDERED_MARKER`].
pub fn mark_bullets(s: &str) -> String {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    regex(
        &BULLET,
        r"(?m)(\A<p>|\n)[ \t]*(?:[-*\x{2022}\x{25CF}\x{25B6}]|\x{25AA}\x{FE0F}?)+(?:[ \t]+|$)",
    )
    .replace_all(s, "${1}<li> ")
    .into_owned()
}

/// `1.` to `99.` at the start of a line become [`ORDERED_MARKER`].
pub fn mark_numbers(s: &str) -> String {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    regex(&NUMBER, r"(\A<p>|\n)[ \t]*\d{1,2}\.[ \t]+")
        .replace_all(s, "${1}<oli> ")
        .into_owned()
}

/// Blank lines become paragraph boundaries.
pub fn split_paragraphs(s: &str) -> String {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    regex(&BLANK_LINE, r"\n\s*\n")
        .replace_all(s, "</p>\n<p>")
        .into_owned()
}

/// Item markers with nothing after them before the line or paragraph ends.
pub fn drop_empty_items(s: &str) -> String {
    static EMPTY_ITEM: OnceLock<Regex> = OnceLock::new();
    regex(&EMPTY_ITEM, r"<o?li> [ \t]*(</p>|\n)")
        .replace_all(s, "${1}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn bullet_lines_become_unordered_list() {
        let html = text_to_html("- item one\n- item two");
        assert_eq!(html, "<p>\n<ul>\n<li> item one\n<li> item two\n</ul></p>");
    }

    #[test]
    fn numbered_lines_become_ordered_list() {
        let html = text_to_html("Steps:\n1. Preheat\n2. Bake");
        assert_eq!(html, "<p>Steps:\n<ol>\n<li> Preheat\n<li> Bake\n</ol></p>");
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        let html = text_to_html("First paragraph.\n\nSecond paragraph.");
        assert_eq!(html, "<p>First paragraph.</p>\n<p>Second paragraph.</p>");
    }

    #[test]
    fn separator_line_becomes_paragraph_break() {
        let html = text_to_html("Above\n-----\nBelow");
        assert_eq!(html, "<p>Above</p>\n<p>Below</p>");
    }

    #[rstest]
    #[case("plain words")]
    #[case("- a list")]
    #[case("1. numbered")]
    #[case("\n\nleading blank lines")]
    #[case("**bold** start")]
    #[case("---\nText after rule")]
    fn output_starts_with_paragraph(#[case] input: &str) {
        assert!(text_to_html(input).starts_with("<p>"));
    }

    #[rstest]
    #[case("\n\u{2022} dot", "\n<li> dot")]
    #[case("\n  \u{25CF} circle", "\n<li> circle")]
    #[case("\n\u{25B6} arrow", "\n<li> arrow")]
    #[case("\n\u{25AA}\u{FE0F} square", "\n<li> square")]
    #[case("\n** starred", "\n<li> starred")]
    fn bullet_glyphs_are_marked(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mark_bullets(input), expected);
    }

    #[rstest]
    #[case("\n**bold**")]
    #[case("\n-5 degrees")]
    fn glyphs_without_space_are_not_bullets(#[case] input: &str) {
        assert_eq!(mark_bullets(input), input);
    }

    #[rstest]
    #[case("---\nText after rule", "<p>Text after rule</p>")]
    #[case("-\nLone dash", "<p>\nLone dash</p>")]
    #[case("Intro\n-\n- real item", "<p>Intro\n\n<ul>\n<li> real item\n</ul></p>")]
    fn glyph_only_lines_are_not_items(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(text_to_html(input), expected);
    }

    #[test]
    fn three_digit_numbers_are_not_items() {
        assert_eq!(mark_numbers("\n100. too long"), "\n100. too long");
        assert_eq!(mark_numbers("\n12. fine"), "\n<oli> fine");
    }

    #[rstest]
    #[case("\n2.Second")]
    #[case("\n1.5 litres")]
    fn numbers_without_following_space_are_not_items(#[case] input: &str) {
        assert_eq!(mark_numbers(input), input);
    }

    #[test]
    fn empty_item_before_blank_line_is_dropped() {
        let marked = MARKING_STEPS
            .iter()
            .fold("Intro\n- \n\nNext".to_owned(), |acc, step| step(&acc));
        assert!(!marked.contains("<li>"));
        assert_eq!(marked, "<p>Intro\n</p>\n<p>Next</p>");
    }

    #[test]
    fn markup_detection() {
        assert!(looks_like_markup("<p>hi</p>"));
        assert!(!looks_like_markup("just text"));
    }
}
