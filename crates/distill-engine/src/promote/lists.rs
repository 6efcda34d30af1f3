//! List wrapping over marked paragraphs.
//!
//! Each paragraph is tokenized into [`Line`]s and scanned as
//! `prefix, item run, rest`, repeating on the rest until no items remain.
//! A run is a maximal sequence of consecutive items of one [`ListKind`].

use super::{ORDERED_MARKER, UNORDERED_MARKER};

const PARAGRAPH_OPEN: &str = "<p>";
const PARAGRAPH_CLOSE: &str = "</p>";
const PARAGRAPH_BOUNDARY: &str = "</p>\n<p>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// One line of a marked paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Text(&'a str),
    Item(ListKind, &'a str),
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(UNORDERED_MARKER) {
            Line::Item(ListKind::Unordered, rest)
        } else if let Some(rest) = line.strip_prefix(ORDERED_MARKER) {
            Line::Item(ListKind::Ordered, rest)
        } else {
            Line::Text(line)
        }
    }

    fn kind(&self) -> Option<ListKind> {
        match self {
            Line::Item(kind, _) => Some(*kind),
            Line::Text(_) => None,
        }
    }

    fn text(&self) -> &'a str {
        match self {
            Line::Text(text) | Line::Item(_, text) => text,
        }
    }
}

pub fn tokenize(paragraph: &str) -> Vec<Line<'_>> {
    paragraph.split('\n').map(Line::parse).collect()
}

/// Wraps every run of marked items in `<ul>`/`<ol>`.
///
/// Input is the output of the marking steps: `<p>…</p>` paragraphs joined by
/// `\n`. Paragraphs without items are returned untouched.
pub fn wrap_lists(html: &str) -> String {
    if !html.contains(UNORDERED_MARKER) && !html.contains(ORDERED_MARKER) {
        return html.to_owned();
    }
    let Some(inner) = html
        .strip_prefix(PARAGRAPH_OPEN)
        .and_then(|s| s.strip_suffix(PARAGRAPH_CLOSE))
    else {
        return html.to_owned();
    };

    inner
        .split(PARAGRAPH_BOUNDARY)
        .map(wrap_paragraph)
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_paragraph(paragraph: &str) -> String {
    let lines = tokenize(paragraph);
    if lines.iter().all(|line| line.kind().is_none()) {
        return format!("{PARAGRAPH_OPEN}{paragraph}{PARAGRAPH_CLOSE}");
    }

    let mut out = String::with_capacity(paragraph.len() + 32);
    let mut rest = lines.as_slice();

    while let Some(start) = rest.iter().position(|line| line.kind().is_some()) {
        let (prefix, tail) = rest.split_at(start);
        let kind = tail[0].kind().unwrap_or(ListKind::Unordered);
        let run_len = tail
            .iter()
            .take_while(|line| line.kind() == Some(kind))
            .count();
        let (run, remainder) = tail.split_at(run_len);

        let items = run
            .iter()
            .map(|line| format!("{UNORDERED_MARKER}{}", line.text()))
            .collect::<Vec<_>>()
            .join("\n");
        let tag = kind.tag();
        out.push_str(&format!(
            "{PARAGRAPH_OPEN}{}\n<{tag}>\n{items}\n</{tag}>{PARAGRAPH_CLOSE}",
            join_lines(prefix)
        ));
        rest = remainder;
    }

    if rest.iter().any(|line| !line.text().trim().is_empty()) {
        out.push_str(&format!(
            "{PARAGRAPH_OPEN}{}{PARAGRAPH_CLOSE}",
            join_lines(rest)
        ));
    }
    out
}

fn join_lines(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenizes_markers() {
        assert_eq!(
            tokenize("Intro\n<li> a\n<oli> b"),
            vec![
                Line::Text("Intro"),
                Line::Item(ListKind::Unordered, "a"),
                Line::Item(ListKind::Ordered, "b"),
            ]
        );
    }

    #[test]
    fn paragraph_without_items_is_untouched() {
        assert_eq!(
            wrap_lists("<p>One</p>\n<p><li> two</p>"),
            "<p>One</p>\n<p>\n<ul>\n<li> two\n</ul></p>"
        );
    }

    #[test]
    fn suffix_text_is_rewrapped_in_paragraph() {
        assert_eq!(
            wrap_lists("<p>Intro\n<li> a\n<li> b\nOutro</p>"),
            "<p>Intro\n<ul>\n<li> a\n<li> b\n</ul></p><p>Outro</p>"
        );
    }

    #[test]
    fn multiple_runs_in_one_paragraph() {
        assert_eq!(
            wrap_lists("<p>A\n<li> x\nB\n<li> y</p>"),
            "<p>A\n<ul>\n<li> x\n</ul></p><p>B\n<ul>\n<li> y\n</ul></p>"
        );
    }

    #[test]
    fn switching_kind_starts_new_run() {
        assert_eq!(
            wrap_lists("<p><li> x\n<oli> y</p>"),
            "<p>\n<ul>\n<li> x\n</ul></p><p>\n<ol>\n<li> y\n</ol></p>"
        );
    }

    #[test]
    fn no_markers_returns_input() {
        assert_eq!(wrap_lists("<p>plain</p>"), "<p>plain</p>");
    }
}
