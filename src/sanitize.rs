//! Input decoding and character sanitization.
//!
//! Documents may carry characters that are not allowed in XML (control
//! characters, noncharacters, surrogate references). These are removed both
//! as raw characters and as numeric character references before parsing.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static CHAR_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:([0-9]+)|[xX]([0-9a-fA-F]+));?").unwrap());

/// Decode bytes to a string.
///
/// Tries UTF-8 first (a BOM is honored and stripped), falling back to
/// Windows-1252 for legacy pages. Uses `Cow<str>` to avoid allocation when
/// the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Whether a code point is outside the XML 1.0 `Char` production.
///
/// Tab, line feed and carriage return are allowed.
pub fn is_invalid_xml_char(cp: u32) -> bool {
    matches!(cp, 0x0..=0x8 | 0xB | 0xC | 0xE..=0x1F | 0xD800..=0xDFFF | 0xFFFE | 0xFFFF)
}

/// Remove invalid XML characters, raw or escaped as numeric references.
///
/// References to valid characters are left untouched for the parser to
/// decode. Returns the input unchanged (borrowed) when nothing is removed.
pub fn sanitize(html: &str) -> Cow<'_, str> {
    let html = if memchr::memchr(b'&', html.as_bytes()).is_some() {
        CHAR_REF_RE.replace_all(html, |caps: &Captures<'_>| {
            let code_point = match (caps.get(1), caps.get(2)) {
                (Some(dec), _) => dec.as_str().parse::<u32>(),
                (_, Some(hex)) => u32::from_str_radix(hex.as_str(), 16),
                _ => return caps[0].to_string(),
            };
            match code_point {
                Ok(cp) if is_invalid_xml_char(cp) => String::new(),
                _ => caps[0].to_string(),
            }
        })
    } else {
        Cow::Borrowed(html)
    };

    if !html.chars().any(|c| is_invalid_xml_char(c as u32)) {
        return html;
    }
    Cow::Owned(
        html.chars()
            .filter(|&c| !is_invalid_xml_char(c as u32))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("héllo".as_bytes()), "héllo");
        assert!(matches!(decode_text(b"plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFhi"), "hi");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0x93/0x94 are curly quotes in CP1252 and invalid UTF-8
        assert_eq!(decode_text(b"\x93quoted\x94"), "\u{201c}quoted\u{201d}");
    }

    #[test]
    fn test_clean_input_is_borrowed() {
        let html = "<p>Fish &amp; chips</p>";
        assert!(matches!(sanitize(html), Cow::Borrowed(_)));
    }

    #[test]
    fn test_removes_raw_control_characters() {
        assert_eq!(sanitize("a\u{0}b\u{b}c\u{1f}d\u{fffe}e"), "abcde");
        assert_eq!(sanitize("keep\ttab\nand\rcr"), "keep\ttab\nand\rcr");
    }

    #[test]
    fn test_removes_invalid_references() {
        assert_eq!(sanitize("a&#0;b&#x1F;c&#xd800;d&#65535e"), "abcde");
    }

    #[test]
    fn test_keeps_valid_references() {
        assert_eq!(sanitize("&#128150; &#x1F496; &#10;"), "&#128150; &#x1F496; &#10;");
    }

    #[test]
    fn test_overflowing_reference_is_kept() {
        let html = "&#99999999999999999999;";
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_keeps_non_ascii() {
        assert_eq!(sanitize("日本語 💖"), "日本語 💖");
    }
}
