use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Bare `http(s)://` URLs.
pub fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(r#"https?://[^\s<>"\[\]]+"#).expect("Invalid URL regex"))
}

pub fn contains_url(text: &str) -> bool {
    url_regex().is_match(text)
}

/// Wraps bare URLs in anchors. Trailing sentence punctuation stays outside
/// the link.
pub fn linkify(text: &str) -> String {
    url_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let url = matched.trim_end_matches(['.', ',', ':', ';', '!', '?', ')', ']', '}']);
            let tail = &matched[url.len()..];
            format!(r#"<a href="{url}">{url}</a>{tail}"#)
        })
        .into_owned()
}
