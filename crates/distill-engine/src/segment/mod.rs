//! # Segmentation
//!
//! Turns a document tree into an ordered sequence of [`Element`]s.
//!
//! ## Phases
//!
//! 1. **Walking** (`walker`): [`TreeWalker`] descends the tree, prunes
//!    subtrees matched by an [`ExcludeRule`], and hands each leaf's whole text
//!    to the builder
//! 2. **Segmenting** (`builder`): [`ElementBuilder`] splits the leaf text on
//!    line breaks, classifies each segment (`classify`), and decides whether
//!    it merges into the previous element or starts a new one
//!
//! ## Merge decision
//!
//! For each non-blank segment, in order:
//!
//! 1. an inline candidate is appended to the previous element
//! 2. a candidate opening with a break marker continues the previous element
//!    on a new line, unless it follows a blank line or is a timestamp
//! 3. anything else starts a new element; a bold, unpunctuated block right
//!    before it is promoted to a title first
//!
//! A blank final segment closes the previous element into block display.

pub mod builder;
pub mod classify;
pub mod types;
pub mod walker;

pub use builder::{ElementBuilder, Leaf};
pub use classify::classify;
pub use types::{DisplayMode, Element, ElementKind};
pub use walker::{ExcludeRule, TreeWalker};
