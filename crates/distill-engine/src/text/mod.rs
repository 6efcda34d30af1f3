//! # Text
//!
//! Pure string helpers shared by the segmenter and the formatters.
//!
//! - **`normalize`**: the ordered whitespace/punctuation pipeline applied to
//!   every segment before classification
//! - **`BREAK_MARKER`**: the in-text marker for a forced single line break,
//!   distinct from a paragraph boundary

pub mod normalize;

pub use normalize::normalize;

/// Explicit line-break marker carried inside element text.
///
/// Inserted after a newline inside `<p>` text; rendered verbatim by the body
/// formatter and stripped by the summary formatter.
pub const BREAK_MARKER: &str = "<br>";

/// Returns `text` without a leading [`BREAK_MARKER`].
pub fn strip_break(text: &str) -> &str {
    text.strip_prefix(BREAK_MARKER).unwrap_or(text)
}
