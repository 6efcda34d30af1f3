use crate::dom::{DocNode, Dom};
use crate::error::EngineError;
use crate::format::{ElementFilter, format_body, format_summary};
use crate::promote::text_to_html;
use crate::segment::{Element, ElementBuilder, ExcludeRule, TreeWalker};

/// The ordered element sequence of one parsed page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A configured parse-and-format pipeline.
///
/// Holds the exclude rules applied while walking and the filters applied
/// while formatting. Each parse uses a fresh [`ElementBuilder`], so one
/// `Distiller` can process any number of documents.
#[derive(Default)]
pub struct Distiller {
    exclude: Vec<ExcludeRule>,
    filters: Vec<Box<dyn ElementFilter>>,
}

impl Distiller {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exclude(mut self, rule: ExcludeRule) -> Self {
        self.exclude.push(rule);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl ElementFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn exclude_rules(&self) -> &[ExcludeRule] {
        &self.exclude
    }

    pub fn filters(&self) -> &[Box<dyn ElementFilter>] {
        &self.filters
    }

    /// Segments any tree rooted at a `body`-equivalent node.
    pub fn parse_node<N: DocNode>(&self, root: &N) -> Document {
        let mut builder = ElementBuilder::new();
        TreeWalker::new(&self.exclude).walk(root, &mut builder);
        let elements = builder.finish();
        log::debug!("Segmented document into {} elements", elements.len());
        Document::new(elements)
    }

    pub fn parse_html(&self, html: &str) -> Result<Document, EngineError> {
        let dom = Dom::parse_document(html)?;
        Ok(self.parse_node(&dom.root()))
    }

    /// Promotes plain text to HTML, then parses it.
    pub fn parse_text(&self, text: &str) -> Result<Document, EngineError> {
        self.parse_html(&text_to_html(text))
    }

    pub fn body(&self, document: &Document) -> String {
        format_body(document.elements(), &self.filters)
    }

    pub fn summary(&self, document: &Document, min_length: usize, max_length: usize) -> String {
        format_summary(document.elements(), &self.filters, min_length, max_length)
    }
}

impl std::fmt::Debug for Distiller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Distiller")
            .field("exclude", &self.exclude)
            .field("filters", &self.filters.len())
            .finish()
    }
}
