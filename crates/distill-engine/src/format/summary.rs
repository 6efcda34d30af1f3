use std::sync::OnceLock;

use regex::Regex;

use super::{ElementFilter, FilterOutcome, FilterScope, links::contains_url, run_filters};
use crate::segment::{Element, ElementKind};
use crate::text::{BREAK_MARKER, normalize};

/// Leading characters that mark decoration rather than prose.
const DECORATION_PREFIXES: [char; 4] = ['#', '~', '_', '='];
/// BLACK RECTANGLE, used in divider lines.
const DIVIDER: char = '\u{25AC}';

/// Tracks whether a title may still open the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    /// Nothing seen yet; one title may lead.
    Unset,
    /// A leading title was taken.
    Leading,
    /// Body text was seen; titles are no longer wanted.
    Closed,
}

/// Builds a plain-text summary from the prose elements.
///
/// Elements are appended whole, space-separated, until the summary grows
/// past `min_length`. An element that would push it past `max_length` ends
/// the summary without being added. Lengths count `char`s.
pub fn format_summary(
    elements: &[Element],
    filters: &[Box<dyn ElementFilter>],
    min_length: usize,
    max_length: usize,
) -> String {
    let mut header = HeaderState::Unset;
    let mut summary = String::new();
    let mut length = 0;

    for element in elements {
        let admitted_title = match element.kind() {
            ElementKind::Title if header == HeaderState::Unset => {
                header = HeaderState::Leading;
                true
            }
            ElementKind::Text => {
                header = HeaderState::Closed;
                false
            }
            _ => false,
        };

        match element.kind() {
            ElementKind::Quote
            | ElementKind::Pre
            | ElementKind::List
            | ElementKind::Table
            | ElementKind::Figure
            | ElementKind::Iframe
            | ElementKind::Timestamp => continue,
            ElementKind::Title if !admitted_title && header == HeaderState::Closed => continue,
            _ => {}
        }

        let mut text = clean_text(element.text());
        match run_filters(filters, FilterScope::Summary, &mut text) {
            FilterOutcome::Stop => break,
            FilterOutcome::Skip => continue,
            FilterOutcome::Pass => {}
        }

        if contains_url(&text) {
            match drop_url_sentences(&text) {
                Some(kept) => text = kept,
                None => continue,
            }
        }

        if element.kind() == ElementKind::Title && !admitted_title {
            log::debug!("Second title ends summary: {:?}", element.text());
            break;
        }

        if text.is_empty() || text.starts_with(DECORATION_PREFIXES) || text.contains(DIVIDER) {
            continue;
        }

        let added = text.chars().count() + usize::from(!summary.is_empty());
        if length + added > max_length {
            log::debug!("Summary would exceed {max_length} chars; stopping at {length}");
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(&text);
        length += added;

        if length > min_length {
            break;
        }
    }

    if summary.ends_with(':') {
        summary.pop();
        summary.push('.');
    }
    summary
}

/// Flattens line breaks and drops `[...]` spans and `__` runs.
fn clean_text(text: &str) -> String {
    static BRACKETED: OnceLock<Regex> = OnceLock::new();
    static UNDERSCORES: OnceLock<Regex> = OnceLock::new();
    let bracketed =
        BRACKETED.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("Invalid bracket regex"));
    let underscores =
        UNDERSCORES.get_or_init(|| Regex::new(r"_{2,}").expect("Invalid underscore regex"));

    let flat = text.replace(BREAK_MARKER, " ").replace('\n', " ");
    let flat = bracketed.replace_all(&flat, "");
    let flat = underscores.replace_all(&flat, "");
    normalize(&flat)
}

/// Keeps only the `". "`-separated sentences without a URL, each ending in
/// terminal punctuation. `None` when every sentence had one.
fn drop_url_sentences(text: &str) -> Option<String> {
    let kept: Vec<String> = text
        .split(". ")
        .filter(|sentence| !contains_url(sentence))
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| {
            if sentence.ends_with(['.', '?', '!']) {
                sentence.to_owned()
            } else {
                format!("{sentence}.")
            }
        })
        .collect();
    (!kept.is_empty()).then(|| kept.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FnFilter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(content: &str) -> Element {
        Element::new(ElementKind::Text, "p", content)
    }

    fn title(content: &str) -> Element {
        Element::new(ElementKind::Title, "h2", content)
    }

    #[test]
    fn stops_after_crossing_min_length() {
        let first = "The council approved the new budget on Monday.";
        let second = "Spending on parks rises by a fifth next year.";
        let third = "Critics say the plan ignores rising rents too.";
        let elements = vec![text(first), text(second), text(third)];

        let summary = format_summary(&elements, &[], 50, 100);

        assert_eq!(summary, format!("{first} {second}"));
        assert!(summary.chars().count() > 50);
        assert!(summary.chars().count() <= 100);
    }

    #[test]
    fn element_exceeding_max_is_not_consumed() {
        let elements = vec![text("Short opener."), text(&"long ".repeat(40))];
        assert_eq!(format_summary(&elements, &[], 50, 100), "Short opener.");
    }

    #[test]
    fn trailing_colon_becomes_period() {
        let elements = vec![text("The statement was issued by Acme Inc:")];
        assert_eq!(
            format_summary(&elements, &[], 10, 200),
            "The statement was issued by Acme Inc."
        );
    }

    #[test]
    fn leading_title_is_kept() {
        let elements = vec![title("Budget passes"), text("Councillors voted late.")];
        assert_eq!(
            format_summary(&elements, &[], 100, 200),
            "Budget passes Councillors voted late."
        );
    }

    #[test]
    fn title_after_text_is_skipped() {
        let elements = vec![
            text("Opening line."),
            title("Section"),
            text("Closing line."),
        ];
        assert_eq!(
            format_summary(&elements, &[], 100, 200),
            "Opening line. Closing line."
        );
    }

    #[test]
    fn second_consecutive_title_stops() {
        let elements = vec![title("Main"), title("Sub"), text("Body.")];
        assert_eq!(format_summary(&elements, &[], 100, 200), "Main");
    }

    #[test]
    fn non_prose_kinds_are_skipped() {
        let elements = vec![
            Element::new(ElementKind::Quote, "blockquote", "Quote"),
            Element::new(ElementKind::Pre, "pre", "code"),
            Element::new(ElementKind::List, "li", "item"),
            Element::new(ElementKind::Table, "table", "cells"),
            Element::new(ElementKind::Figure, "figure", "caption"),
            Element::new(ElementKind::Iframe, "iframe", "embed"),
            Element::new(ElementKind::Timestamp, "p", "12:30 - update"),
            text("Prose."),
        ];
        assert_eq!(format_summary(&elements, &[], 100, 200), "Prose.");
    }

    #[test]
    fn url_sentences_are_dropped() {
        let elements = vec![text(
            "Prices rose again. Details at https://example.com/report. Analysts expect more",
        )];
        let summary = format_summary(&elements, &[], 100, 200);
        assert_eq!(summary, "Prices rose again. Analysts expect more.");
        assert!(!contains_url(&summary));
    }

    #[test]
    fn element_made_only_of_urls_is_skipped() {
        let elements = vec![text("https://example.com/only"), text("Real text.")];
        assert_eq!(format_summary(&elements, &[], 100, 200), "Real text.");
    }

    #[rstest]
    #[case("# heading-ish")]
    #[case("~ signature")]
    #[case("_ underline")]
    #[case("=== banner")]
    #[case("Divider \u{25AC}\u{25AC}")]
    fn decorations_are_skipped(#[case] content: &str) {
        let elements = vec![text(content), text("Kept.")];
        assert_eq!(format_summary(&elements, &[], 100, 200), "Kept.");
    }

    #[test]
    fn brackets_underscores_and_breaks_are_cleaned() {
        let elements = vec![text("Fact [1] checked\n<br>by ____ editors")];
        assert_eq!(
            format_summary(&elements, &[], 100, 200),
            "Fact checked by editors"
        );
    }

    #[test]
    fn summary_filters_apply() {
        let filters: Vec<Box<dyn ElementFilter>> = vec![Box::new(FnFilter::new(
            FilterScope::Summary,
            |text: &mut String| {
                if text.starts_with("Advertisement") {
                    FilterOutcome::Skip
                } else if text.starts_with("Related") {
                    FilterOutcome::Stop
                } else {
                    FilterOutcome::Pass
                }
            },
        ))];
        let elements = vec![
            text("Advertisement"),
            text("Story begins."),
            text("Related: more stories"),
            text("Never reached."),
        ];
        assert_eq!(format_summary(&elements, &filters, 100, 200), "Story begins.");
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        assert_eq!(format_summary(&[], &[], 10, 20), "");
    }
}
