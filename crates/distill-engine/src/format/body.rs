use super::{ElementFilter, FilterOutcome, FilterScope, links::linkify, run_filters};
use crate::segment::{Element, ElementKind};
use crate::text::BREAK_MARKER;

const DEFAULT_LIST_TYPE: &str = "ul";

/// Renders elements as article HTML, one block per line.
///
/// Consecutive list items sharing a list type share one `<ul>`/`<ol>`
/// wrapper; a change of list type closes and reopens it.
pub fn format_body(elements: &[Element], filters: &[Box<dyn ElementFilter>]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(elements.len());
    let mut open_list: Option<&str> = None;

    for element in elements {
        let mut text = element.text().to_owned();
        match run_filters(filters, FilterScope::Body, &mut text) {
            FilterOutcome::Stop => break,
            FilterOutcome::Skip => continue,
            FilterOutcome::Pass => {}
        }
        let text = linkify(&escape_text(&text));

        if element.kind() == ElementKind::List {
            let list_type = element.list_type().unwrap_or(DEFAULT_LIST_TYPE);
            if open_list != Some(list_type) {
                if let Some(open) = open_list.take() {
                    out.push(close_list(open));
                }
                out.push(format!("<{list_type}>"));
                open_list = Some(list_type);
            }
            out.push(format!("<{}>{text}", item_tag(element)));
            continue;
        }

        if let Some(open) = open_list.take() {
            out.push(close_list(open));
        }

        let rendered = if element.is_strong() {
            format!("<strong>{text}</strong>")
        } else if element.kind() == ElementKind::Title {
            format!("<{tag}>{text}</{tag}>", tag = element.tag())
        } else {
            format!("<p>{text}</p>")
        };
        if !text.is_empty() {
            out.push(rendered);
        }
    }

    if let Some(open) = open_list {
        out.push(close_list(open));
    }
    out.join("\n")
}

fn close_list(list_type: &str) -> String {
    format!("</{list_type}></p>")
}

fn item_tag(element: &Element) -> &str {
    match element.tag() {
        "ul" | "ol" => "li",
        tag => tag,
    }
}

/// HTML-escapes text while leaving break markers intact.
fn escape_text(text: &str) -> String {
    text.split(BREAK_MARKER)
        .map(|part| html_escape::encode_text(part))
        .collect::<Vec<_>>()
        .join(BREAK_MARKER)
}
