use super::builder::{ElementBuilder, Leaf};
use crate::dom::DocNode;

/// Tags that are always treated as atomic text sources.
const LEAF_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "li", "table", "figure", "iframe",
];

const ROOT_TAG: &str = "body";

/// Prunes a subtree by tag and/or class.
///
/// Every predicate that is set must match; a rule with neither set matches
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeRule {
    pub tag: Option<String>,
    pub class: Option<String>,
}

impl ExcludeRule {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            class: None,
        }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self {
            tag: None,
            class: Some(class.into()),
        }
    }

    pub fn tag_with_class(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            class: Some(class.into()),
        }
    }

    pub fn matches<N: DocNode>(&self, node: &N) -> bool {
        if self.tag.is_none() && self.class.is_none() {
            return false;
        }
        let tag_matches = self
            .tag
            .as_deref()
            .is_none_or(|tag| node.tag_name().eq_ignore_ascii_case(tag));
        let class_matches = self
            .class
            .as_deref()
            .is_none_or(|class| node.has_class(class));
        tag_matches && class_matches
    }
}

/// Depth-first walk over a [`DocNode`] tree feeding leaves to an
/// [`ElementBuilder`].
pub struct TreeWalker<'r> {
    exclude: &'r [ExcludeRule],
}

impl<'r> TreeWalker<'r> {
    pub fn new(exclude: &'r [ExcludeRule]) -> Self {
        Self { exclude }
    }

    /// Walks `root` (the `body`-equivalent node) in document order.
    pub fn walk<N: DocNode>(&self, root: &N, builder: &mut ElementBuilder) {
        let Some(children) = self.enter(root, true, builder) else {
            return;
        };
        let mut pending: Vec<N> = children.into_iter().rev().collect();
        while let Some(node) = pending.pop() {
            if let Some(children) = self.enter(&node, false, builder) {
                pending.extend(children.into_iter().rev());
            }
        }
    }

    /// Handles one node. Returns its children when it is a container to
    /// descend into; leaves are fed to `builder` and excluded nodes dropped.
    fn enter<N: DocNode>(
        &self,
        node: &N,
        is_root: bool,
        builder: &mut ElementBuilder,
    ) -> Option<Vec<N>> {
        if let Some(rule) = self.exclude.iter().find(|rule| rule.matches(node)) {
            log::debug!("Excluding <{}> subtree by {rule:?}", node.tag_name());
            return None;
        }

        let children = node.children();
        if !is_leaf(node, &children, is_root) {
            return Some(children);
        }

        let text = node.whole_text();
        if !text.is_empty() {
            let markup = node.markup();
            let parent = node.parent();
            builder.push_leaf(&Leaf {
                tag: node.tag_name(),
                parent_tag: parent.as_ref().map(|p| p.tag_name()),
                text: &text,
                markup: &markup,
            });
        }
        None
    }
}

fn is_leaf<N: DocNode>(node: &N, children: &[N], is_root: bool) -> bool {
    let is_root = is_root || node.tag_name() == ROOT_TAG;
    children.is_empty()
        || (!is_root && children.len() == 1 && children[0].is_text())
        || LEAF_TAGS.contains(&node.tag_name())
}
