//! Section representation for numbered documents.
//!
//! A section is one numbered entry of the catalogue: its heading line and
//! the body text that runs up to the next heading. Sections keep the exact
//! heading text they were parsed from together with the byte range of the
//! number inside it, so renumbering can swap the digits and nothing else.

use serde::Serialize;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Numbered division of a document with its verbatim heading and body.
pub struct Section {
    /// Position-derived label, `index + 1` once the document is consistent.
    pub number: usize,
    /// Heading text following the number and separator.
    pub title: String,
    /// Exact heading line, without its line terminator.
    #[serde(skip)]
    pub heading: String,
    /// Byte range of the number digits within `heading`.
    #[serde(skip)]
    pub number_span: Range<usize>,
    /// Terminator of the heading line, empty if the heading ends the file.
    #[serde(skip)]
    pub line_ending: String,
    /// Text between the heading line and the next heading (or end of file).
    #[serde(skip)]
    pub body: String,
    /// 1-based line of the heading in the parsed input; `None` for inserted sections.
    #[serde(rename = "line")]
    pub source_line: Option<usize>,
}

impl Section {
    /// Replace the number embedded in the heading, leaving every other byte alone.
    pub fn relabel(&mut self, number: usize) {
        let digits = number.to_string();
        let start = self.number_span.start;
        self.heading.replace_range(self.number_span.clone(), &digits);
        self.number_span = start..start + digits.len();
        self.number = number;
    }

    /// Total length of the section once written out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heading.len() + self.line_ending.len() + self.body.len()
    }

    /// Whether the section would serialize to nothing (never true for parsed sections).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write heading, terminator and body onto `out`.
    pub fn write_into(&self, out: &mut String) {
        out.push_str(&self.heading);
        out.push_str(&self.line_ending);
        out.push_str(&self.body);
    }
}
