//! Line-oriented record stream.
//!
//! Input records are tab-separated: field 0 is a base64-encoded HTML
//! document, the remaining fields are opaque metadata (usually the source
//! URL). Each output record carries the base64-encoded plain text in field 0,
//! the metadata unchanged, and the glued annotations joined by `;` as an
//! extra last field.

use std::io::{BufRead, Write};

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use bstr::ByteSlice;
use bstr::io::BufReadExt;

use crate::dom::parse_html;
use crate::error::{Error, Result};
use crate::sanitize::{decode_text, sanitize};
use crate::standoff::{DocumentStandoff, Limits, annotate_document};

/// Standard alphabet, padding optional.
const DOCUMENT_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stream processing options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Guards applied to each document.
    pub limits: Limits,
    /// Log and drop failing records instead of stopping the stream.
    pub skip_invalid: bool,
}

/// Counters for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub records: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Decode, sanitize, parse and annotate one base64-encoded document.
pub fn annotate_encoded(encoded: &[u8], limits: Limits) -> Result<DocumentStandoff> {
    let bytes = DOCUMENT_DECODER.decode(encoded)?;
    let html = decode_text(&bytes);
    let dom = parse_html(&sanitize(&html));
    annotate_document(&dom, limits)
}

/// Transform one input record (without line terminator) into an output record.
pub fn process_line(line: &[u8], options: &Options) -> Result<Vec<u8>> {
    let fields: Vec<&[u8]> = line.split_str("\t").map(|f| f.trim()).collect();
    let (document, metadata) = fields
        .split_first()
        .ok_or_else(|| Error::Parse("empty record".to_string()))?;

    let standoff = annotate_encoded(document, options.limits)?;

    let mut out = STANDARD.encode(standoff.text.as_bytes()).into_bytes();
    for field in metadata {
        out.push(b'\t');
        out.extend_from_slice(field);
    }
    out.push(b'\t');
    out.extend_from_slice(standoff.glued().join(";").as_bytes());
    Ok(out)
}

/// Process every record of `reader` in order, writing one line per record.
///
/// By default the first failing record stops the stream with an error
/// carrying its 1-based line number. With [`Options::skip_invalid`] the
/// record is logged and dropped.
pub fn process_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    options: &Options,
) -> Result<Stats> {
    let mut stats = Stats::default();

    for (index, line) in reader.byte_lines().enumerate() {
        let line = line?;
        let number = index + 1;
        stats.records += 1;

        match process_line(&line, options) {
            Ok(out) => {
                writer.write_all(&out)?;
                writer.write_all(b"\n")?;
                stats.written += 1;
                tracing::debug!(line = number, bytes = out.len(), "record written");
            }
            Err(err) if options.skip_invalid => {
                stats.skipped += 1;
                tracing::warn!(line = number, error = %err, "skipping record");
            }
            Err(err) => {
                return Err(Error::Record {
                    line: number,
                    source: Box::new(err),
                });
            }
        }
    }

    writer.flush()?;
    tracing::info!(
        records = stats.records,
        written = stats.written,
        skipped = stats.skipped,
        "stream finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(html: &str) -> String {
        STANDARD.encode(html)
    }

    fn decode(field: &[u8]) -> String {
        String::from_utf8(STANDARD.decode(field).unwrap()).unwrap()
    }

    #[test]
    fn test_process_line() {
        let line = format!("{}\thttp://example.com/", encode("<p>Hello<b>world</b></p>"));
        let out = process_line(line.as_bytes(), &Options::default()).unwrap();

        let fields: Vec<&[u8]> = out.split_str("\t").collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(decode(fields[0]).split_whitespace().collect::<Vec<_>>(), vec!["Helloworld"]);
        assert_eq!(fields[1], b"http://example.com/");
        assert_eq!(fields[2], b"body/p:0-4+body/p/b:0-4");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let line = format!(" {} \t meta \r", encode("<p>x</p>"));
        let out = process_line(line.as_bytes(), &Options::default()).unwrap();
        let fields: Vec<&[u8]> = out.split_str("\t").collect();
        assert_eq!(fields[1], b"meta");
    }

    #[test]
    fn test_fields_trim_unicode_whitespace() {
        let line = format!("{}\t\u{3000}meta\u{a0}\t\u{2003}", encode("<p>x</p>"));
        let out = process_line(line.as_bytes(), &Options::default()).unwrap();
        let fields: Vec<&[u8]> = out.split_str("\t").collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], b"meta");
        assert_eq!(fields[2], b"");
    }

    #[test]
    fn test_unpadded_base64() {
        let encoded = encode("<p>abc</p>");
        assert!(encoded.ends_with('='));
        let line = encoded.trim_end_matches('=');
        assert!(process_line(line.as_bytes(), &Options::default()).is_ok());
    }

    #[test]
    fn test_invalid_base64() {
        let err = process_line(b"not*base64\tmeta", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_non_utf8_metadata_passes_through() {
        let mut line = encode("<p>x</p>").into_bytes();
        line.extend_from_slice(b"\t\xff\xfe");
        let out = process_line(&line, &Options::default()).unwrap();
        let fields: Vec<&[u8]> = out.split_str("\t").collect();
        assert_eq!(fields[1], b"\xff\xfe");
    }

    #[test]
    fn test_control_characters_removed() {
        let line = encode("<p>a\u{1}b &#x0B;c</p>");
        let out = process_line(line.as_bytes(), &Options::default()).unwrap();
        let fields: Vec<&[u8]> = out.split_str("\t").collect();
        assert_eq!(decode(fields[0]).split_whitespace().collect::<Vec<_>>(), vec!["ab", "c"]);
    }

    #[test]
    fn test_stream_fail_fast() {
        let input = format!("{}\ta\n@@@\tb\n{}\tc\n", encode("<p>1</p>"), encode("<p>3</p>"));
        let mut out = Vec::new();
        let err = process_stream(input.as_bytes(), &mut out, &Options::default()).unwrap_err();

        assert!(matches!(err, Error::Record { line: 2, .. }));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_stream_skip_invalid() {
        let input = format!("{}\ta\n@@@\tb\n{}\tc\n", encode("<p>1</p>"), encode("<p>3</p>"));
        let mut out = Vec::new();
        let options = Options {
            skip_invalid: true,
            ..Options::default()
        };
        let stats = process_stream(input.as_bytes(), &mut out, &options).unwrap();

        assert_eq!(
            stats,
            Stats {
                records: 3,
                written: 2,
                skipped: 1
            }
        );
        let out = String::from_utf8(out).unwrap();
        let metadata: Vec<&str> = out
            .lines()
            .map(|l| l.split('\t').nth(1).unwrap())
            .collect();
        assert_eq!(metadata, vec!["a", "c"]);
    }
}
