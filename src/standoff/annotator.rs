//! Word-level standoff annotation of an arena tree.
//!
//! The walk is a depth-first, document-order traversal driven by an explicit
//! stack. Every element is entered once (block spacing, leading text) and
//! left once (closing spacing, tail text). Leading text is charged to the
//! element's own cursor; tail text is charged to the parent's cursor because
//! it is part of the parent's content stream.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::{ArenaDom, ArenaNodeId, PathCache};
use crate::error::{Error, Result};

use super::tags::{TagClass, classify, is_line_break};
use super::tokenize::tokenize;

/// One word of the plain text, located in the source tree.
///
/// Offsets are 0-based, inclusive, and count characters of the text charged
/// to the element at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAnnotation {
    pub path: Rc<str>,
    pub start: usize,
    pub end: usize,
    /// No whitespace separates this word from the previous one.
    pub glue: bool,
}

impl WordAnnotation {
    /// Length of the word in characters.
    pub fn char_count(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for WordAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.glue {
            f.write_str("+")?;
        }
        write!(f, "{}:{}-{}", self.path, self.start, self.end)
    }
}

/// Guards against pathological documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting below the visited node.
    pub max_depth: usize,
    /// Maximum number of rendered elements per document.
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 10_000,
            max_nodes: 10_000_000,
        }
    }
}

/// Annotations and plain text produced by one visit, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub annotations: Vec<WordAnnotation>,
    pub text: String,
}

impl Fragment {
    /// Append another fragment after this one.
    pub fn extend(&mut self, other: Fragment) {
        self.annotations.extend(other.annotations);
        self.text.push_str(&other.text);
    }
}

enum Step {
    Enter(ArenaNodeId),
    Leave(ArenaNodeId, TagClass, bool),
}

/// Per-document annotation state: character cursors and path memo.
///
/// The whitespace state is not stored here. It is passed into and returned
/// from every [`visit`](Annotator::visit), so subtrees can be annotated in
/// isolation given an incoming state.
pub struct Annotator<'a> {
    dom: &'a ArenaDom,
    root: ArenaNodeId,
    cursors: HashMap<ArenaNodeId, usize>,
    paths: PathCache,
    limits: Limits,
    visited: usize,
}

impl<'a> Annotator<'a> {
    /// Create an annotator for the tree under `root`.
    pub fn new(dom: &'a ArenaDom, root: ArenaNodeId, limits: Limits) -> Self {
        let mut cursors = HashMap::new();
        cursors.insert(root, 0);
        Self {
            dom,
            root,
            cursors,
            paths: PathCache::new(root),
            limits,
            visited: 0,
        }
    }

    /// Number of rendered elements entered so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Characters consumed so far from an element's charged text.
    pub fn cursor(&self, id: ArenaNodeId) -> usize {
        self.cursors.get(&id).copied().unwrap_or(0)
    }

    /// Annotate `node`, its subtree and its tail text.
    ///
    /// `ws` tells whether the output so far ends in whitespace; the returned
    /// flag is the state after the node's tail.
    pub fn visit(&mut self, node: ArenaNodeId, mut ws: bool) -> Result<(Fragment, bool)> {
        let dom = self.dom;
        let mut fragment = Fragment::default();
        let mut stack = vec![Step::Enter(node)];
        let mut depth = 0usize;

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    let Some(tag) = dom.element_name(id) else {
                        continue;
                    };
                    let class = classify(tag);
                    if class == TagClass::NonRendered {
                        continue;
                    }

                    depth += 1;
                    if depth > self.limits.max_depth {
                        return Err(Error::StructuralLimit(format!(
                            "nesting depth exceeds {}",
                            self.limits.max_depth
                        )));
                    }
                    self.visited += 1;
                    if self.visited > self.limits.max_nodes {
                        return Err(Error::StructuralLimit(format!(
                            "element count exceeds {}",
                            self.limits.max_nodes
                        )));
                    }

                    if class == TagClass::Block {
                        fragment.text.push(' ');
                        ws = true;
                    }

                    let leading = dom.leading_text(id);
                    self.charge(id, &leading, &mut ws, &mut fragment)?;

                    stack.push(Step::Leave(id, class, is_line_break(tag)));
                    let children: Vec<_> = dom.element_children(id).collect();
                    stack.extend(children.into_iter().rev().map(Step::Enter));
                }
                Step::Leave(id, class, line_break) => {
                    depth -= 1;

                    if class == TagClass::Block || line_break {
                        fragment.text.push(' ');
                        ws = true;
                    }

                    if id != self.root
                        && let Some(parent) = dom.parent(id)
                    {
                        let tail = dom.tail_text(id);
                        self.charge(parent, &tail, &mut ws, &mut fragment)?;
                    }
                }
            }
        }

        Ok((fragment, ws))
    }

    /// Tokenize a text run against `owner`'s cursor.
    fn charge(
        &mut self,
        owner: ArenaNodeId,
        text: &str,
        ws: &mut bool,
        fragment: &mut Fragment,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        fragment.text.push_str(text);

        let mut cursor = self.cursor(owner);
        let mut first = true;
        for token in tokenize(text) {
            if token.is_space {
                *ws = true;
            } else {
                let path = self.paths.path(self.dom, owner).ok_or_else(|| {
                    Error::Parse(format!("node {} is outside the root element", owner.0))
                })?;
                fragment.annotations.push(WordAnnotation {
                    path,
                    start: cursor,
                    end: cursor + token.len - 1,
                    glue: first && !*ws,
                });
                *ws = false;
            }
            cursor += token.len;
            first = false;
        }
        self.cursors.insert(owner, cursor);
        Ok(())
    }
}
