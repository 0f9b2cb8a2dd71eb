//! Element classification for text linearization.

/// How an element takes part in plain-text reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Content is separated from its surroundings by a space on each side.
    Block,
    /// Content flows into the surrounding text.
    Inline,
    /// Element and its subtree contribute nothing.
    NonRendered,
}

/// Elements that don't start on a new line and only take up as much width
/// as necessary.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdo", "big", "br", "button", "cite", "code", "dfn", "em", "i",
    "img", "input", "kbd", "label", "map", "object", "q", "samp", "script", "select", "small",
    "span", "strong", "sub", "sup", "textarea", "time", "tt", "var",
];

/// Map a lowercase tag name to its class.
pub fn classify(tag: &str) -> TagClass {
    match tag {
        "script" | "style" => TagClass::NonRendered,
        _ if INLINE_TAGS.contains(&tag) => TagClass::Inline,
        _ => TagClass::Block,
    }
}

/// Line breaks end with a space even though they are inline.
pub fn is_line_break(tag: &str) -> bool {
    tag == "br"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("p"), TagClass::Block);
        assert_eq!(classify("div"), TagClass::Block);
        assert_eq!(classify("title"), TagClass::Block);
        assert_eq!(classify("b"), TagClass::Inline);
        assert_eq!(classify("br"), TagClass::Inline);
        assert_eq!(classify("script"), TagClass::NonRendered);
        assert_eq!(classify("style"), TagClass::NonRendered);
    }

    #[test]
    fn test_unknown_tags_are_block() {
        assert_eq!(classify("custom-element"), TagClass::Block);
        assert_eq!(classify(""), TagClass::Block);
    }

    #[test]
    fn test_line_break() {
        assert!(is_line_break("br"));
        assert!(!is_line_break("hr"));
    }
}
