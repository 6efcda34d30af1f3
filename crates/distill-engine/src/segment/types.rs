use serde::Serialize;

/// Semantic type of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Title,
    Quote,
    Pre,
    List,
    Table,
    Figure,
    Iframe,
    Timestamp,
    Text,
}

/// How an element sits relative to the text around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    /// Following inline text may be appended onto the element.
    Inline,
    /// The element occupies its own line; nothing merges into it.
    Block,
    /// Started a new element even though the source would allow merging.
    InlineBlock,
}

impl DisplayMode {
    /// Anything other than [`DisplayMode::Inline`].
    pub fn is_block_level(self) -> bool {
        !matches!(self, DisplayMode::Inline)
    }
}

/// One unit of segmented content.
///
/// # Invariants
///
/// - `text` only grows while the element is the builder's `previous`
/// - `display` is only ever promoted, never demoted
/// - `kind` changes at most once, `Text` to `Title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    tag: String,
    kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    list_type: Option<String>,
    text: String,
    strong: bool,
    display: DisplayMode,
    has_leading_break: bool,
}

impl Element {
    pub fn new(kind: ElementKind, tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind,
            list_type: None,
            text: text.into(),
            strong: false,
            display: DisplayMode::Block,
            has_leading_break: false,
        }
    }

    #[must_use]
    pub fn with_list_type(mut self, list_type: impl Into<String>) -> Self {
        self.list_type = Some(list_type.into());
        self
    }

    #[must_use]
    pub fn with_strong(mut self, strong: bool) -> Self {
        self.strong = strong;
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn with_leading_break(mut self, has_leading_break: bool) -> Self {
        self.has_leading_break = has_leading_break;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn list_type(&self) -> Option<&str> {
        self.list_type.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_strong(&self) -> bool {
        self.strong
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn has_leading_break(&self) -> bool {
        self.has_leading_break
    }

    /// Appends inline text, inserting a single space before a word that
    /// would otherwise run into the existing text.
    pub(crate) fn append(&mut self, text: &str) {
        let starts_word = text.chars().next().is_some_and(char::is_alphanumeric);
        if starts_word && !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    /// Appends a forced line break; `text` carries its own break marker.
    pub(crate) fn append_break(&mut self, text: &str) {
        self.text.push('\n');
        self.text.push_str(text);
    }

    pub(crate) fn promote_to_block(&mut self) {
        self.display = DisplayMode::Block;
    }

    pub(crate) fn promote_to_title(&mut self) {
        if self.kind == ElementKind::Text {
            self.kind = ElementKind::Title;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_inserts_space_before_words_only() {
        let mut element = Element::new(ElementKind::Text, "p", "Hello");
        element.append("world");
        element.append(",");
        element.append("again");
        assert_eq!(element.text(), "Hello world, again");
    }

    #[test]
    fn append_after_newline_adds_no_space() {
        let mut element = Element::new(ElementKind::Text, "p", "Line\n");
        element.append("next");
        assert_eq!(element.text(), "Line\nnext");
    }

    #[test]
    fn append_to_empty_adds_no_space() {
        let mut element = Element::new(ElementKind::Text, "span", "");
        element.append("word");
        assert_eq!(element.text(), "word");
    }

    #[test]
    fn append_break_keeps_marker() {
        let mut element = Element::new(ElementKind::Text, "p", "First");
        element.append_break("<br>Second");
        assert_eq!(element.text(), "First\n<br>Second");
    }

    #[test]
    fn title_promotion_only_applies_to_text() {
        let mut quote = Element::new(ElementKind::Quote, "blockquote", "Said");
        quote.promote_to_title();
        assert_eq!(quote.kind(), ElementKind::Quote);

        let mut text = Element::new(ElementKind::Text, "p", "Heading");
        text.promote_to_title();
        assert_eq!(text.kind(), ElementKind::Title);
    }

    #[test]
    fn block_level_display() {
        assert!(!DisplayMode::Inline.is_block_level());
        assert!(DisplayMode::Block.is_block_level());
        assert!(DisplayMode::InlineBlock.is_block_level());
    }
}
