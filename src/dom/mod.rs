//! HTML document tree.
//!
//! html5ever parses into an index-addressed arena ([`ArenaDom`]). The arena
//! exposes the text model the annotator works on: an element's leading text
//! and the tail text following it, plus [`path`] addressing.

mod arena;
pub mod path;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, SiblingsIter};
pub use path::{PathCache, ROOT_PATH, element_path, resolve_path};
pub use tree_sink::ArenaSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

/// Parse an HTML document into an arena tree.
///
/// Never fails: malformed markup is repaired the way browsers repair it.
/// Scripting is off, so `<noscript>` content is parsed as markup.
pub fn parse_html(html: &str) -> ArenaDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let sink = ArenaSink::new();
    let result = parse_document(sink, opts)
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
