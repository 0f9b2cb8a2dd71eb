//! Glue pass: merge words split across tag boundaries into single tokens.
//!
//! A glued annotation is the textual form `path:start-end` followed by any
//! number of `+path:start-end` segments, e.g. `body/p:0-4+body/p/b:0-4`.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

use super::annotator::WordAnnotation;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<path>.+):(?P<start>\d+)-(?P<end>\d+)$").unwrap());

/// One logical token: a word annotation plus the ones glued onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GluedAnnotation {
    segments: Vec<WordAnnotation>,
}

impl GluedAnnotation {
    fn start(first: &WordAnnotation) -> Self {
        Self {
            segments: vec![WordAnnotation {
                glue: false,
                ..first.clone()
            }],
        }
    }

    /// The word annotations making up this token, in document order.
    pub fn segments(&self) -> &[WordAnnotation] {
        &self.segments
    }
}

impl fmt::Display for GluedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for GluedAnnotation {
    type Err = Error;

    /// Parse `path:start-end(+path:start-end)*`. Paths containing `+` cannot
    /// be told apart from the separator and are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAnnotation(s.to_string());

        let mut segments = Vec::new();
        for (i, part) in s.split('+').enumerate() {
            let caps = SEGMENT_RE.captures(part).ok_or_else(invalid)?;
            let start: usize = caps["start"].parse().map_err(|_| invalid())?;
            let end: usize = caps["end"].parse().map_err(|_| invalid())?;
            if start > end {
                return Err(invalid());
            }
            segments.push(WordAnnotation {
                path: Rc::from(&caps["path"]),
                start,
                end,
                glue: i > 0,
            });
        }
        Ok(Self { segments })
    }
}

/// Group raw annotations into glued tokens, preserving order.
///
/// A flagged annotation joins the group before it. A flagged annotation with
/// nothing before it starts a group and loses its flag.
pub fn group(annotations: &[WordAnnotation]) -> Vec<GluedAnnotation> {
    let mut glued = Vec::new();
    let mut buffered: Option<GluedAnnotation> = None;

    for annotation in annotations {
        if annotation.glue
            && let Some(current) = buffered.as_mut()
        {
            current.segments.push(annotation.clone());
            continue;
        }
        if let Some(done) = buffered.replace(GluedAnnotation::start(annotation)) {
            glued.push(done);
        }
    }
    glued.extend(buffered);
    glued
}

/// Glue raw annotations into their serialized form.
pub fn glue(annotations: &[WordAnnotation]) -> Vec<String> {
    group(annotations).iter().map(|g| g.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(path: &str, start: usize, end: usize, glue: bool) -> WordAnnotation {
        WordAnnotation {
            path: Rc::from(path),
            start,
            end,
            glue,
        }
    }

    #[test]
    fn test_glue_merges_flagged() {
        let raw = vec![
            word("p", 0, 4, false),
            word("p/b", 0, 4, true),
            word("p", 6, 8, false),
        ];
        assert_eq!(glue(&raw), vec!["p:0-4+p/b:0-4", "p:6-8"]);
    }

    #[test]
    fn test_glue_chain() {
        let raw = vec![
            word("p", 0, 0, false),
            word("p/i", 0, 0, true),
            word("p", 1, 1, true),
        ];
        assert_eq!(glue(&raw), vec!["p:0-0+p/i:0-0+p:1-1"]);
    }

    #[test]
    fn test_leading_flag_is_consumed() {
        let raw = vec![word("span", 0, 2, true), word("span", 4, 5, false)];
        assert_eq!(glue(&raw), vec!["span:0-2", "span:4-5"]);
    }

    #[test]
    fn test_glue_empty() {
        assert!(glue(&[]).is_empty());
    }

    #[test]
    fn test_parse_glued() {
        let glued: GluedAnnotation = "body/o:p:0-4+body/o:p/b[2]:10-12".parse().unwrap();
        let segments = glued.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(&*segments[0].path, "body/o:p");
        assert_eq!((segments[0].start, segments[0].end), (0, 4));
        assert!(!segments[0].glue);
        assert_eq!(&*segments[1].path, "body/o:p/b[2]");
        assert!(segments[1].glue);
        assert_eq!(glued.to_string(), "body/o:p:0-4+body/o:p/b[2]:10-12");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "p", "p:1", "p:3-1", ":0-1", "p:0-1+", "p:a-b"] {
            assert!(
                bad.parse::<GluedAnnotation>().is_err(),
                "{bad:?} should not parse"
            );
        }
    }
}
