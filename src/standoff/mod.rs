//! Standoff annotation of HTML documents.
//!
//! [`annotate_document`] walks the tree under the root element and produces
//! the reconstructed plain text together with one [`WordAnnotation`] per
//! word. [`glue`] then merges words that were split across tag boundaries.
//!
//! # Example
//!
//! ```
//! use html_standoff::standoff::annotate_html;
//!
//! let doc = annotate_html("<p>Hello<b>world</b> again</p>").unwrap();
//! assert_eq!(doc.glued(), vec!["body/p:0-4+body/p/b:0-4", "body/p:6-10"]);
//! assert_eq!(doc.text.split_whitespace().collect::<Vec<_>>(), vec!["Helloworld", "again"]);
//! ```

mod annotator;
mod glue;
mod resolve;
mod tags;
mod tokenize;

pub use annotator::{Annotator, Fragment, Limits, WordAnnotation};
pub use glue::{GluedAnnotation, glue, group};
pub use resolve::{charged_text, resolve};
pub use tags::{TagClass, classify, is_line_break};
pub use tokenize::{Token, Tokens, is_space, tokenize};

use crate::dom::{ArenaDom, parse_html};
use crate::error::{Error, Result};

/// Standoff annotation of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStandoff {
    /// Raw word annotations in document order.
    pub words: Vec<WordAnnotation>,
    /// Reconstructed plain text.
    pub text: String,
}

impl DocumentStandoff {
    /// Glued annotations in their serialized form.
    pub fn glued(&self) -> Vec<String> {
        glue(&self.words)
    }
}

/// Annotate every child of the root element, in document order.
///
/// The root's own text is not annotated. Cursors and the whitespace state
/// start fresh on each call.
pub fn annotate_document(dom: &ArenaDom, limits: Limits) -> Result<DocumentStandoff> {
    let root = dom
        .root_element()
        .ok_or_else(|| Error::Parse("document has no root element".to_string()))?;

    let mut annotator = Annotator::new(dom, root, limits);
    let mut document = Fragment::default();
    let mut ws = true;
    for child in dom.element_children(root) {
        let (fragment, after) = annotator.visit(child, ws)?;
        document.extend(fragment);
        ws = after;
    }

    tracing::debug!(
        elements = annotator.visited(),
        words = document.annotations.len(),
        chars = document.text.len(),
        "annotated document"
    );

    Ok(DocumentStandoff {
        words: document.annotations,
        text: document.text,
    })
}

/// Parse and annotate an HTML string with default limits.
pub fn annotate_html(html: &str) -> Result<DocumentStandoff> {
    annotate_document(&parse_html(html), Limits::default())
}
