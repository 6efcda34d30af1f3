use std::sync::OnceLock;

use regex::Regex;

use super::{
    classify::classify,
    types::{DisplayMode, Element, ElementKind},
};
use crate::text::{BREAK_MARKER, normalize, strip_break};

/// Tags whose leaf text ends its element with a line break.
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "li", "table", "figure",
    "iframe", "div", "section", "article", "header", "footer", "aside", "nav", "main", "ul", "ol",
    "dl", "dt", "dd", "figcaption", "address", "tr", "td", "th", "caption",
];

/// Text extracted from one leaf node, plus what the builder needs to know
/// about where it came from.
#[derive(Debug, Clone, Copy)]
pub struct Leaf<'a> {
    pub tag: &'a str,
    pub parent_tag: Option<&'a str>,
    pub text: &'a str,
    /// Serialized markup of the leaf, used for the bold-run check.
    pub markup: &'a str,
}

/// The per-document parser context.
///
/// Holds the element sequence; `previous` is always its last element. Only
/// the last element is ever mutated, so anything before it is final.
#[derive(Debug, Default)]
pub struct ElementBuilder {
    elements: Vec<Element>,
}

impl ElementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Clears the context so it can be reused for another document.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    pub fn finish(self) -> Vec<Element> {
        self.elements
    }

    /// Segments a leaf's text and merges each segment into the sequence.
    pub fn push_leaf(&mut self, leaf: &Leaf<'_>) {
        let mut text = leaf.text.to_owned();
        if BLOCK_TAGS.contains(&leaf.tag) {
            text.push('\n');
        }
        if leaf.tag == "p" {
            text = mark_breaks(&text);
        }

        // Trailing empty segments are kept: a final one closes the element.
        let raw: Vec<&str> = text.split('\n').collect();
        let segments: Vec<String> = raw.iter().map(|line| normalize(line)).collect();
        let filled = segments.iter().filter(|s| !s.is_empty()).count();
        let strong = filled == 1 && starts_with_bold(leaf.markup);
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                if i == last
                    && let Some(previous) = self.elements.last_mut()
                {
                    previous.promote_to_block();
                }
                continue;
            }

            let leading_break = segment.starts_with(BREAK_MARKER);
            let kind = classify(leaf.tag, strip_break(segment));
            let inline_eligible = self
                .elements
                .last()
                .is_some_and(|previous| !leading_break && previous.display() != DisplayMode::Block);
            let display = if i > 0 || !inline_eligible {
                DisplayMode::InlineBlock
            } else {
                DisplayMode::Inline
            };

            if !display.is_block_level()
                && let Some(previous) = self.elements.last_mut()
            {
                previous.append(segment);
                continue;
            }

            if leading_break && let Some(previous) = self.elements.last_mut() {
                // The prior line is checked before normalization: a line of
                // spaces between two breaks does not end the element.
                let continues_line = i == 0 || {
                    let prior = raw[i - 1];
                    !prior.is_empty() && prior != BREAK_MARKER && kind != ElementKind::Timestamp
                };
                if continues_line {
                    previous.append_break(segment);
                    continue;
                }
            }

            if let Some(previous) = self.elements.last_mut()
                && previous.kind() == ElementKind::Text
                && previous.is_strong()
                && !previous.text().ends_with('.')
                && previous.display().is_block_level()
                && display.is_block_level()
            {
                log::debug!("Promoting bold run to title: {:?}", previous.text());
                previous.promote_to_title();
            }

            let mut element = Element::new(kind, leaf.tag, strip_break(segment))
                .with_strong(strong)
                .with_display(display)
                .with_leading_break(leading_break);
            if kind == ElementKind::List
                && let Some(list_type) = list_type(leaf)
            {
                element = element.with_list_type(list_type);
            }
            log::trace!("New {:?} element from <{}>", element.kind(), leaf.tag);
            self.elements.push(element);
        }
    }
}

fn list_type<'a>(leaf: &Leaf<'a>) -> Option<&'a str> {
    match (leaf.parent_tag, leaf.tag) {
        (Some(parent @ ("ul" | "ol")), _) => Some(parent),
        (_, tag @ ("ul" | "ol")) => Some(tag),
        _ => None,
    }
}

/// Inserts [`BREAK_MARKER`] at the start of every non-blank line after the
/// first, so in-paragraph breaks stay distinguishable from boundaries.
pub fn mark_breaks(text: &str) -> String {
    static LINE_START: OnceLock<Regex> = OnceLock::new();
    LINE_START
        .get_or_init(|| Regex::new(r"\n[^\S\n]*(\S)").expect("Invalid line start regex"))
        .replace_all(text, format!("\n{BREAK_MARKER}${{1}}").as_str())
        .into_owned()
}

/// Whether the markup, minus one `<p>` wrapper and any `<br>`s, opens with
/// `<strong>` or `<b>`.
pub fn starts_with_bold(markup: &str) -> bool {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static BREAKS: OnceLock<Regex> = OnceLock::new();
    static BOLD_OPEN: OnceLock<Regex> = OnceLock::new();

    let paragraph = PARAGRAPH.get_or_init(|| {
        Regex::new(r"(?s)^\s*<p(?:\s[^>]*)?>(.*)</p>\s*$").expect("Invalid paragraph regex")
    });
    let breaks =
        BREAKS.get_or_init(|| Regex::new(r"<br\s*/?>").expect("Invalid break regex"));
    let bold_open = BOLD_OPEN.get_or_init(|| {
        Regex::new(r"^<(?:strong|b)(?:\s[^>]*)?>").expect("Invalid bold regex")
    });

    let inner = paragraph
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map_or(markup, |m| m.as_str());
    let inner = breaks.replace_all(inner, "");
    bold_open.is_match(inner.trim_start())
}
