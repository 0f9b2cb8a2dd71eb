//! # html-standoff
//!
//! Word-level standoff annotation of HTML documents.
//!
//! An HTML document is linearized into the plain text a browser would show,
//! and every word of that text is mapped back to the element that holds it
//! (an element path plus a character range), without touching the markup.
//!
//! ## Quick Start
//!
//! ```
//! use html_standoff::annotate_html;
//!
//! let doc = annotate_html("<div>A</div><div>B</div>").unwrap();
//! assert_eq!(doc.glued(), vec!["body/div[1]:0-0", "body/div[2]:0-0"]);
//! ```
//!
//! ## Annotation format
//!
//! Each glued annotation is `path:start-end`, optionally followed by
//! `+path:start-end` segments for the pieces of a word that is split across
//! tags. Offsets are inclusive and count characters of the text charged to
//! that element: its own leading text, then the tail text of each rendered
//! child in order.
//!
//! ## Record streams
//!
//! [`record::process_stream`] runs the tab-separated, base64-encoded record
//! format used by crawl/alignment pipelines.

pub mod dom;
pub mod error;
pub mod record;
pub mod sanitize;
pub mod standoff;

pub use dom::{ArenaDom, ArenaNodeId, parse_html};
pub use error::{Error, Result};
pub use standoff::{
    DocumentStandoff, GluedAnnotation, Limits, WordAnnotation, annotate_document, annotate_html,
    glue,
};
