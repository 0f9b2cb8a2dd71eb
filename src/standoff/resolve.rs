//! Resolve standoff annotations back against the source tree.

use crate::dom::{ArenaDom, ArenaNodeId, resolve_path};
use crate::error::{Error, Result};

use super::glue::GluedAnnotation;
use super::tags::{TagClass, classify};

/// The text charged to an element's cursor, in cursor order.
///
/// That is the element's leading text followed by the tail text of each of
/// its rendered element children. The root's leading text is never charged.
pub fn charged_text(dom: &ArenaDom, root: ArenaNodeId, id: ArenaNodeId) -> String {
    let mut text = if id == root {
        String::new()
    } else {
        dom.leading_text(id).into_owned()
    };

    for child in dom.element_children(id) {
        let rendered = dom
            .element_name(child)
            .is_some_and(|tag| classify(tag) != TagClass::NonRendered);
        if rendered {
            text.push_str(&dom.tail_text(child));
        }
    }
    text
}

/// The characters a glued annotation addresses, concatenated.
pub fn resolve(dom: &ArenaDom, root: ArenaNodeId, glued: &GluedAnnotation) -> Result<String> {
    let mut out = String::new();
    for segment in glued.segments() {
        let node = resolve_path(dom, root, &segment.path).ok_or_else(|| {
            Error::InvalidAnnotation(format!("no element at path {}", segment.path))
        })?;

        let text = charged_text(dom, root, node);
        let word: String = text
            .chars()
            .skip(segment.start)
            .take(segment.char_count())
            .collect();
        if word.chars().count() != segment.char_count() {
            return Err(Error::InvalidAnnotation(format!(
                "{}:{}-{} is past the end of the element text",
                segment.path, segment.start, segment.end
            )));
        }
        out.push_str(&word);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ArenaDom, ArenaNodeId, ArenaNodeId) {
        let mut dom = ArenaDom::new();
        let root = dom.create_html_element("html");
        let p = dom.create_html_element("p");
        let b = dom.create_html_element("b");
        let script = dom.create_html_element("script");
        dom.append(dom.document(), root);
        dom.append_text(root, "ignored");
        dom.append(root, p);
        dom.append_text(root, " root tail");
        dom.append_text(p, "Hel");
        dom.append(p, b);
        dom.append_text(b, "lo");
        dom.append_text(p, " there");
        dom.append(p, script);
        dom.append_text(script, "code");
        dom.append_text(p, "dropped");
        (dom, root, p)
    }

    #[test]
    fn test_charged_text() {
        let (dom, root, p) = sample();
        assert_eq!(charged_text(&dom, root, p), "Hel there");
        assert_eq!(charged_text(&dom, root, root), " root tail");
    }

    #[test]
    fn test_resolve_glued() {
        let (dom, root, _) = sample();
        let glued: GluedAnnotation = "p:0-2+p/b:0-1".parse().unwrap();
        assert_eq!(resolve(&dom, root, &glued).unwrap(), "Hello");
    }

    #[test]
    fn test_resolve_root_tail() {
        let (dom, root, _) = sample();
        let glued: GluedAnnotation = ".:6-9".parse().unwrap();
        assert_eq!(resolve(&dom, root, &glued).unwrap(), "tail");
    }

    #[test]
    fn test_resolve_out_of_range() {
        let (dom, root, _) = sample();
        let glued: GluedAnnotation = "p:5-20".parse().unwrap();
        assert!(matches!(
            resolve(&dom, root, &glued),
            Err(Error::InvalidAnnotation(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_path() {
        let (dom, root, _) = sample();
        let glued: GluedAnnotation = "div:0-0".parse().unwrap();
        assert!(resolve(&dom, root, &glued).is_err());
    }
}
