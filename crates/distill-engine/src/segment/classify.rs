use std::sync::OnceLock;

use regex::Regex;

use super::types::ElementKind;

/// Classifies a segment by its originating tag, falling back to content.
///
/// Tag rules win over content rules; the first matching rule decides.
pub fn classify(tag: &str, text: &str) -> ElementKind {
    match tag {
        t if t.starts_with('h') => ElementKind::Title,
        "blockquote" => ElementKind::Quote,
        "pre" => ElementKind::Pre,
        "ul" | "ol" | "li" => ElementKind::List,
        "table" => ElementKind::Table,
        "figure" => ElementKind::Figure,
        "iframe" => ElementKind::Iframe,
        _ if is_timestamp(text) => ElementKind::Timestamp,
        _ => ElementKind::Text,
    }
}

/// `12:30 - Minister arrives`, `9:05 update`.
pub fn is_timestamp(text: &str) -> bool {
    static TIMESTAMP: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP
        .get_or_init(|| Regex::new(r"^\s*\d{1,2}:\d{2}[\s|-]+.*").expect("Invalid timestamp regex"))
        .is_match(text)
}
