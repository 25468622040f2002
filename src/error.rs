use std::fmt;

/// A failure that aborts a GEDCOM load.
///
/// Only the byte and line layers produce these: undecodable bytes, a line
/// the lexer cannot frame, level sequencing the tree builder cannot follow.
/// Semantic problems (unknown tags, dangling cross-references, version
/// mismatches) never abort the load; they are collected on
/// [`crate::types::GedcomDocument`] as diagnostics so a damaged file still
/// yields as much data as possible.
#[derive(Debug)]
pub enum GedcomError {
    /// A line the lexer or tree builder could not make sense of.
    ParseError {
        /// The 1-based line number where the failure occurred.
        line: u32,
        /// What was wrong with the line.
        message: String,
    },
    /// Input that is not a GEDCOM transmission at all, e.g. an empty file.
    InvalidFormat(String),
    /// A byte stream that cannot be decoded in its detected character set.
    EncodingError(String),
}

impl fmt::Display for GedcomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GedcomError::ParseError { line, message } => {
                write!(f, "line {line}: {message}")
            }
            GedcomError::InvalidFormat(msg) => write!(f, "invalid GEDCOM input: {msg}"),
            GedcomError::EncodingError(msg) => write!(f, "encoding error: {msg}"),
        }
    }
}

impl std::error::Error for GedcomError {}
