//! # Document Tree
//!
//! The walker only needs a handful of capabilities from a tree, captured by
//! [`DocNode`]. [`Dom`] implements them over an owned arena built with
//! `scraper`; other tree libraries plug in by implementing the trait.

pub mod arena;

pub use arena::{Dom, DomRef};

/// Tag name reported for text nodes.
pub const TEXT_TAG: &str = "#text";
/// Tag name reported for comments, doctypes and other non-content nodes.
pub const OTHER_TAG: &str = "#other";

/// Capabilities the tree walker needs from a node.
pub trait DocNode: Sized {
    /// Lowercase tag name for elements, [`TEXT_TAG`] for text nodes.
    fn tag_name(&self) -> &str;

    fn is_element(&self) -> bool;

    fn is_text(&self) -> bool;

    fn has_class(&self, class: &str) -> bool;

    /// Serialized markup of the node and its subtree.
    fn markup(&self) -> String;

    fn children(&self) -> Vec<Self>;

    fn parent(&self) -> Option<Self>;

    /// Entity-decoded text of the subtree, with source line breaks kept and
    /// every `<br>` rendered as `\n`.
    fn whole_text(&self) -> String;
}
