//! Element path addressing.
//!
//! Paths are relative to the root element and use the `getelementpath`
//! convention: `body/div[2]/span`. The root itself is `.`. A level carries a
//! 1-based `[n]` index only when its parent has several element children with
//! the same tag.
//!
//! The HTML tokenizer accepts tag names that are not XML names (`x+y`,
//! `q;r`). Such characters are written as `U` plus five uppercase hex digits
//! (`xU0002By`), so a path never contains the `+`, `;`, `[`, `]` or `:`
//! delimiters of the annotation format. Parsed tag names are ASCII-lowercased,
//! which keeps the escape unambiguous.

use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

use super::arena::{ArenaDom, ArenaNodeId};

/// Path of the root element.
pub const ROOT_PATH: &str = ".";

/// Memoized element paths for one traversal.
///
/// Sibling-indexed segments are computed for all element children of a
/// parent at once, so a wide parent is scanned a single time. Full paths are
/// only materialized for the elements that are asked for.
pub struct PathCache {
    root: ArenaNodeId,
    segments: HashMap<ArenaNodeId, Rc<str>>,
    paths: HashMap<ArenaNodeId, Rc<str>>,
}

impl PathCache {
    /// Create a cache anchored at `root`.
    pub fn new(root: ArenaNodeId) -> Self {
        let mut paths = HashMap::new();
        paths.insert(root, Rc::from(ROOT_PATH));
        Self {
            root,
            segments: HashMap::new(),
            paths,
        }
    }

    /// Path of `id`, or `None` if it is not a descendant of the root.
    pub fn path(&mut self, dom: &ArenaDom, id: ArenaNodeId) -> Option<Rc<str>> {
        if let Some(path) = self.paths.get(&id) {
            return Some(Rc::clone(path));
        }

        // Collect ancestors up to (not including) the root
        let mut chain = Vec::new();
        let mut current = id;
        while current != self.root {
            chain.push(current);
            current = dom.parent(current)?;
        }

        let mut path = String::new();
        for &node in chain.iter().rev() {
            if !self.segments.contains_key(&node) {
                let parent = dom.parent(node)?;
                self.fill_segments(dom, parent);
            }
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(self.segments.get(&node)?);
        }

        let path: Rc<str> = Rc::from(path);
        self.paths.insert(id, Rc::clone(&path));
        Some(path)
    }

    fn fill_segments(&mut self, dom: &ArenaDom, parent: ArenaNodeId) {
        let children: Vec<(ArenaNodeId, &str)> = dom
            .element_children(parent)
            .filter_map(|c| dom.element_name(c).map(|name| (c, name.as_ref())))
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &(_, tag) in &children {
            *counts.entry(tag).or_default() += 1;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (child, tag) in children {
            let index = seen.entry(tag).or_default();
            *index += 1;

            let name = xml_name(tag);
            let segment = if counts[tag] > 1 {
                format!("{name}[{index}]")
            } else {
                name.into_owned()
            };
            self.segments.insert(child, Rc::from(segment));
        }
    }
}

/// Compute the path of a single element relative to `root`.
pub fn element_path(dom: &ArenaDom, root: ArenaNodeId, id: ArenaNodeId) -> Option<String> {
    PathCache::new(root).path(dom, id).map(|p| p.to_string())
}

/// Find the element a path points to, starting from `root`.
pub fn resolve_path(dom: &ArenaDom, root: ArenaNodeId, path: &str) -> Option<ArenaNodeId> {
    if path == ROOT_PATH {
        return Some(root);
    }

    let mut current = root;
    for segment in path.split('/') {
        let (tag, index) = parse_segment(segment)?;
        current = dom
            .element_children(current)
            .filter(|&c| dom.element_name(c).is_some_and(|n| xml_name(n) == tag))
            .nth(index - 1)?;
    }
    Some(current)
}

/// Tag name as it appears in a path, with non-name characters escaped.
pub fn xml_name(tag: &str) -> Cow<'_, str> {
    let mut chars = tag.char_indices();
    let valid = |(i, c): (usize, char)| {
        if i == 0 {
            is_name_start_char(c)
        } else {
            is_name_char(c)
        }
    };
    if chars.all(valid) {
        return Cow::Borrowed(tag);
    }

    let mut out = String::with_capacity(tag.len() + 8);
    for (i, c) in tag.char_indices() {
        if valid((i, c)) {
            out.push(c);
        } else {
            out.push_str(&format!("U{:05X}", u32::from(c)));
        }
    }
    Cow::Owned(out)
}

/// XML `NameStartChar`, without the namespace colon.
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

/// XML `NameChar`, without the namespace colon.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Split `tag[n]` into its tag and 1-based index. A bare tag means index 1.
fn parse_segment(segment: &str) -> Option<(&str, usize)> {
    if segment.is_empty() {
        return None;
    }
    match segment.strip_suffix(']').and_then(|s| s.rsplit_once('[')) {
        Some((tag, index)) => {
            let index: usize = index.parse().ok()?;
            (index >= 1 && !tag.is_empty()).then_some((tag, index))
        }
        None => Some((segment, 1)),
    }
}
