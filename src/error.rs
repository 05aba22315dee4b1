//! Error type shared by the parser, the composer and the file layer.
//!
//! The document operations themselves only ever fail with
//! [`Error::MalformedDocument`], [`Error::OutOfRange`] or
//! [`Error::InvalidSection`]. The remaining variants come from configuration
//! and file access around them.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
/// Everything that can stop a document from being parsed, edited or written.
pub enum Error {
    /// The input's section numbers are not exactly `1, 2, 3, ...` in document order.
    #[error("malformed document: line {line} has section {found}, expected {expected}")]
    MalformedDocument {
        /// 1-based line of the offending heading.
        line: usize,
        /// Number the heading should carry at that position.
        expected: usize,
        /// Number text actually found.
        found: String,
    },
    /// Insertion target outside `1..=max`.
    #[error("insertion target {target} is out of range 1..={max}")]
    OutOfRange {
        /// Requested 1-based position.
        target: usize,
        /// Largest valid position (section count + 1).
        max: usize,
    },
    /// New section content that would break the document structure.
    #[error("invalid section: {0}")]
    InvalidSection(String),
    /// Heading convention that cannot be matched.
    #[error("invalid heading format: {0}")]
    InvalidFormat(String),
    /// Failure inside the tree-sitter grammar or query.
    #[error("grammar error: {0}")]
    Grammar(String),
    /// Reading or writing a document failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An edit plan could not be decoded.
    #[error("invalid edit plan: {0}")]
    Plan(#[source] serde_json::Error),
    /// A section outline could not be encoded as JSON.
    #[error("cannot encode outline: {0}")]
    Outline(#[source] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "tests/error.rs"]
mod tests;
