//! # distill-engine
//!
//! Recovers the reading order of an article from scraped HTML (or plain
//! text), classifies each piece of content, and renders it back as clean
//! article HTML or a short plain-text summary.
//!
//! ```
//! use distill_engine::Distiller;
//!
//! let distiller = Distiller::new();
//! let document = distiller
//!     .parse_html("<h1>Budget passes</h1><p>Councillors voted late.</p>")
//!     .unwrap();
//! assert_eq!(
//!     distiller.body(&document),
//!     "<h1>Budget passes</h1>\n<p>Councillors voted late.</p>"
//! );
//! ```

pub mod document;
pub mod dom;
pub mod error;
pub mod format;
pub mod promote;
pub mod segment;
pub mod text;

pub use document::{Distiller, Document};
pub use dom::{DocNode, Dom, DomRef};
pub use error::EngineError;
pub use format::{
    ElementFilter, FilterOutcome, FilterScope, FnFilter, PatternAction, PatternFilter, format_body,
    format_summary,
};
pub use promote::text_to_html;
pub use segment::{DisplayMode, Element, ElementKind, ExcludeRule};
