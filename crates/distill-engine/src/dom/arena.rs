//! Owned node arena built from a `scraper` parse.
//!
//! `scraper` trees are read-only and borrow the parsed [`Html`], so the
//! subtree under `body` is copied into a flat arena with parent links. Node
//! `0` is always the `body` element.

use scraper::{ElementRef, Html, Node};

use super::{DocNode, OTHER_TAG, TEXT_TAG};
use crate::error::EngineError;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    /// Comments, doctypes, processing instructions.
    Other,
}

#[derive(Debug, Clone)]
struct ArenaNode {
    data: NodeData,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<ArenaNode>,
}

impl Dom {
    /// Parses a full document (or fragment) and keeps its `body` subtree.
    pub fn parse_document(html: &str) -> Result<Self, EngineError> {
        let document = Html::parse_document(html);
        let body = document
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name().eq_ignore_ascii_case("body"))
            .ok_or(EngineError::MissingBody)?;

        let mut dom = Dom { nodes: Vec::new() };
        dom.copy_subtree(body);
        Ok(dom)
    }

    /// The `body` node.
    pub fn root(&self) -> DomRef<'_> {
        DomRef { dom: self, id: 0 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData, parent: Option<usize>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ArenaNode {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    /// Copies the subtree under `body` in document order.
    fn copy_subtree(&mut self, body: ElementRef<'_>) {
        let mut pending = vec![(*body, None)];
        while let Some((node, parent)) = pending.pop() {
            let data = match node.value() {
                Node::Element(element) => NodeData::Element {
                    name: element.name().to_ascii_lowercase(),
                    attrs: element
                        .attrs()
                        .map(|(name, value)| (name.to_owned(), value.to_owned()))
                        .collect(),
                },
                Node::Text(text) => {
                    let content: &str = text;
                    NodeData::Text(content.to_owned())
                }
                _ => NodeData::Other,
            };
            let is_element = matches!(data, NodeData::Element { .. });
            let id = self.push(data, parent);
            if is_element {
                let children: Vec<_> = node.children().collect();
                pending.extend(children.into_iter().rev().map(|child| (child, Some(id))));
            }
        }
    }

    fn write_markup(&self, id: usize, out: &mut String) {
        enum Step {
            Open(usize),
            Close(usize),
        }

        let mut pending = vec![Step::Open(id)];
        while let Some(step) = pending.pop() {
            match step {
                Step::Open(id) => {
                    let node = &self.nodes[id];
                    match &node.data {
                        NodeData::Element { name, attrs } => {
                            out.push('<');
                            out.push_str(name);
                            for (attr, value) in attrs {
                                out.push(' ');
                                out.push_str(attr);
                                out.push_str("=\"");
                                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                                out.push('"');
                            }
                            out.push('>');
                            if !VOID_TAGS.contains(&name.as_str()) {
                                pending.push(Step::Close(id));
                                pending.extend(node.children.iter().rev().map(|&c| Step::Open(c)));
                            }
                        }
                        NodeData::Text(text) => out.push_str(&html_escape::encode_text(text)),
                        NodeData::Other => {}
                    }
                }
                Step::Close(id) => {
                    if let NodeData::Element { name, .. } = &self.nodes[id].data {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
    }

    fn write_text(&self, id: usize, out: &mut String) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let node = &self.nodes[id];
            match &node.data {
                NodeData::Element { name, .. } if name == "br" => out.push('\n'),
                NodeData::Element { .. } => pending.extend(node.children.iter().rev()),
                NodeData::Text(text) => out.push_str(text),
                NodeData::Other => {}
            }
        }
    }
}

/// A node handle borrowed from a [`Dom`].
#[derive(Debug, Clone, Copy)]
pub struct DomRef<'a> {
    dom: &'a Dom,
    id: usize,
}

impl<'a> DomRef<'a> {
    fn node(&self) -> &'a ArenaNode {
        &self.dom.nodes[self.id]
    }

    fn at(&self, id: usize) -> Self {
        DomRef { dom: self.dom, id }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.node().data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

impl DocNode for DomRef<'_> {
    fn tag_name(&self) -> &str {
        match &self.node().data {
            NodeData::Element { name, .. } => name,
            NodeData::Text(_) => TEXT_TAG,
            NodeData::Other => OTHER_TAG,
        }
    }

    fn is_element(&self) -> bool {
        matches!(self.node().data, NodeData::Element { .. })
    }

    fn is_text(&self) -> bool {
        matches!(self.node().data, NodeData::Text(_))
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn markup(&self) -> String {
        let mut out = String::new();
        self.dom.write_markup(self.id, &mut out);
        out
    }

    fn children(&self) -> Vec<Self> {
        self.node()
            .children
            .iter()
            .map(|&child| self.at(child))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|parent| self.at(parent))
    }

    fn whole_text(&self) -> String {
        let mut out = String::new();
        self.dom.write_text(self.id, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(nodes: &[DomRef<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.tag_name().to_owned()).collect()
    }

    #[test]
    fn root_is_body() {
        let dom = Dom::parse_document("<p>One</p><p>Two</p>").unwrap();
        let root = dom.root();
        assert_eq!(root.tag_name(), "body");
        assert!(root.parent().is_none());
        assert_eq!(tags(&root.children()), vec!["p", "p"]);
    }

    #[test]
    fn text_nodes_and_comments_are_kept() {
        let dom = Dom::parse_document("<div>Hi <!-- note --><b>there</b></div>").unwrap();
        let div = dom.root().children()[0];
        assert_eq!(tags(&div.children()), vec![TEXT_TAG, OTHER_TAG, "b"]);
        assert!(div.children()[0].is_text());
        assert!(!div.children()[1].is_element());
        assert_eq!(div.children()[1].whole_text(), "");
    }

    #[test]
    fn whole_text_renders_breaks_and_decodes_entities() {
        let dom = Dom::parse_document("<p>Fish &amp; chips<br>Mushy peas</p>").unwrap();
        let p = dom.root().children()[0];
        assert_eq!(p.whole_text(), "Fish & chips\nMushy peas");
    }

    #[test]
    fn whole_text_keeps_source_newlines() {
        let dom = Dom::parse_document("<p>first\nsecond</p>").unwrap();
        assert_eq!(dom.root().children()[0].whole_text(), "first\nsecond");
    }

    #[test]
    fn markup_serializes_subtree() {
        let dom =
            Dom::parse_document(r#"<p class="lead"><strong>Bold</strong> &lt;tail&gt;<br></p>"#)
                .unwrap();
        let p = dom.root().children()[0];
        assert_eq!(
            p.markup(),
            r#"<p class="lead"><strong>Bold</strong> &lt;tail&gt;<br></p>"#
        );
    }

    #[test]
    fn classes_are_matched_by_token() {
        let dom = Dom::parse_document(r#"<div class="ad banner">x</div>"#).unwrap();
        let div = dom.root().children()[0];
        assert!(div.has_class("ad"));
        assert!(div.has_class("banner"));
        assert!(!div.has_class("ban"));
        assert_eq!(div.attr("class"), Some("ad banner"));
    }

    #[test]
    fn deeply_nested_markup_is_handled() {
        let depth = 20_000;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let dom = Dom::parse_document(&html).unwrap();

        // body, every div, and the text node
        assert_eq!(dom.len(), depth + 2);
        let root = dom.root();
        assert_eq!(root.whole_text(), "deep");
        let markup = root.markup();
        assert!(markup.starts_with("<body><div><div>"));
        assert!(markup.ends_with("deep</div></div></body>"));
    }

    #[test]
    fn parent_links_point_upwards() {
        let dom = Dom::parse_document("<ul><li>a</li></ul>").unwrap();
        let li = dom.root().children()[0].children()[0];
        assert_eq!(li.tag_name(), "li");
        assert_eq!(li.parent().map(|p| p.tag_name().to_owned()), Some("ul".into()));
    }
}
