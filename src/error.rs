//! Error types for standoff annotation.

use thiserror::Error;

/// Errors that can occur while annotating a document or a record stream.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Base64 decoding error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Structural limit exceeded: {0}")]
    StructuralLimit(String),

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Record {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
