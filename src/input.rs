//! Reading documents and splitting them into numbered sections.
//!
//! Heading discovery runs the format's tree-sitter query over the whole text;
//! only matches that begin a line are kept, and only those whose line has
//! the numbered shape become section boundaries. Everything between two
//! boundaries belongs verbatim to the earlier section.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::{Format, HeadingMatch};
use crate::section::Section;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Byte-order mark some editors put at the start of UTF-8 files.
pub(crate) const BOM: char = '\u{feff}';

/// A numbered heading line located in some text.
struct Heading {
    /// Byte offset of the first character of the heading line.
    start: usize,
    /// End of the heading text, before any `\r\n` or `\n`.
    text_end: usize,
    /// First byte after the line terminator.
    body_start: usize,
    /// 1-based line number.
    line: usize,
    parts: HeadingMatch,
}

impl Heading {
    fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.text_end]
    }

    fn number<'a>(&self, source: &'a str) -> &'a str {
        &self.text(source)[self.parts.number.clone()]
    }

    fn title<'a>(&self, source: &'a str) -> &'a str {
        &self.text(source)[self.parts.title.clone()]
    }
}

/// Byte offsets and 1-based lines of every heading node the format's query
/// reports at column 0, in document order.
fn heading_nodes<F: Format + ?Sized>(text: &str, format: &F) -> Result<Vec<(usize, usize)>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Grammar(e.to_string()))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| Error::Grammar("parser returned no tree".to_string()))?;

    let query =
        Query::new(&language, format.section_query()).map_err(|e| Error::Grammar(e.to_string()))?;
    let heading_index = query
        .capture_index_for_name("heading")
        .ok_or_else(|| Error::Grammar("section query has no @heading capture".to_string()))?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());
    let mut starts = Vec::new();

    while let Some(m) = matches.next() {
        for capture in m.captures.iter().filter(|c| c.index == heading_index) {
            let position = capture.node.start_position();
            if position.column == 0 {
                starts.push((capture.node.start_byte(), position.row + 1));
            }
        }
    }

    starts.sort_unstable();
    starts.dedup();
    Ok(starts)
}

/// Numbered headings of `text`, ignoring heading nodes that lack a number.
///
/// A leading byte-order mark is scanned past and left in the preamble.
fn scan_headings<F: Format + ?Sized>(text: &str, format: &F) -> Result<Vec<Heading>> {
    let (offset, scanned) = match text.strip_prefix(BOM) {
        Some(rest) => (BOM.len_utf8(), rest),
        None => (0, text),
    };
    let mut headings = Vec::new();

    for (start, line) in heading_nodes(scanned, format)? {
        let start = start + offset;
        let newline = text[start..].find('\n').map(|i| start + i);
        let (text_end, body_start) = match newline {
            Some(nl) if nl > start && text.as_bytes()[nl - 1] == b'\r' => (nl - 1, nl + 1),
            Some(nl) => (nl, nl + 1),
            None => (text.len(), text.len()),
        };

        if let Some(parts) = format.parse_heading(&text[start..text_end]) {
            headings.push(Heading {
                start,
                text_end,
                body_start,
                line,
                parts,
            });
        }
    }

    Ok(headings)
}

/// Parse `text` into its preamble and numbered sections.
///
/// A document without numbered headings yields no sections and keeps the
/// whole text as its preamble.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] if the section numbers are not
/// exactly `1, 2, 3, ...` in document order, or [`Error::Grammar`] if the
/// format's grammar cannot be loaded.
pub fn parse_document<F: Format + ?Sized>(text: &str, format: &F) -> Result<Document> {
    let headings = scan_headings(text, format)?;

    for (index, heading) in headings.iter().enumerate() {
        let expected = index + 1;
        let digits = heading.number(text);
        if digits.parse::<usize>().ok() != Some(expected) {
            return Err(Error::MalformedDocument {
                line: heading.line,
                expected,
                found: digits.to_string(),
            });
        }
    }

    let preamble_end = headings.first().map_or(text.len(), |h| h.start);
    let preamble = text[..preamble_end].to_string();

    let sections = headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let body_end = headings.get(index + 1).map_or(text.len(), |next| next.start);
            Section {
                number: index + 1,
                title: heading.title(text).to_string(),
                heading: heading.text(text).to_string(),
                number_span: heading.parts.number.clone(),
                line_ending: text[heading.text_end..heading.body_start].to_string(),
                body: text[heading.body_start..body_end].to_string(),
                source_line: Some(heading.line),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        sections = sections.len(),
        preamble_bytes = preamble.len(),
        "parsed document"
    );

    Ok(Document { preamble, sections })
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise the errors of
/// [`parse_document`].
pub fn read_document<F: Format + ?Sized>(path: &Path, format: &F) -> Result<Document> {
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read document");
    parse_document(&text, format)
}

/// Split a stand-alone section snippet (`## 8. Title` followed by its body)
/// into title and body. The number in the snippet is a placeholder.
///
/// # Errors
///
/// Returns [`Error::InvalidSection`] unless the snippet is exactly one
/// numbered heading preceded by nothing but blank lines.
pub fn parse_snippet<F: Format + ?Sized>(text: &str, format: &F) -> Result<(String, String)> {
    let headings = scan_headings(text, format)?;

    let [heading] = headings.as_slice() else {
        return Err(Error::InvalidSection(format!(
            "expected one numbered heading in the snippet, found {}",
            headings.len()
        )));
    };
    if !text[..heading.start].trim_start_matches(BOM).trim().is_empty() {
        return Err(Error::InvalidSection(
            "snippet has text before its heading".to_string(),
        ));
    }

    Ok((
        heading.title(text).to_string(),
        text[heading.body_start..].to_string(),
    ))
}

/// Whether `text` contains a numbered heading that `format` would treat as structural.
///
/// # Errors
///
/// Returns [`Error::Grammar`] if the format's grammar cannot be loaded.
pub fn has_heading<F: Format + ?Sized>(text: &str, format: &F) -> Result<bool> {
    Ok(!scan_headings(text, format)?.is_empty())
}

/// Insert a section into a `## N. Title` document and return the new text.
///
/// Sections numbered `target` and above move down by one; everything before
/// the insertion point is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] if `text` is not contiguously
/// numbered, [`Error::OutOfRange`] if `target` is outside `1..=N+1`, and
/// [`Error::InvalidSection`] if the new title or body would break the
/// section structure.
pub fn insert_section(text: &str, target: usize, title: &str, body: &str) -> Result<String> {
    let format = MarkdownFormat::default();
    let mut document = parse_document(text, &format)?;
    document.insert(&format, target, title, body)?;
    let output = document.serialize();
    verify(&output, &document, &format)?;
    Ok(output)
}

/// Confirm that `output` parses back to the same sections as `expected`.
///
/// Catches new bodies that open a construct (an unterminated code fence, say)
/// which would swallow the headings after them.
///
/// # Errors
///
/// Returns [`Error::InvalidSection`] if the section titles differ after the
/// round trip.
pub fn verify<F: Format + ?Sized>(output: &str, expected: &Document, format: &F) -> Result<()> {
    let reparsed = parse_document(output, format).map_err(|e| {
        Error::InvalidSection(format!("edited document no longer parses: {e}"))
    })?;

    if reparsed.len() != expected.len() {
        return Err(Error::InvalidSection(format!(
            "edited document parses to {} sections, expected {}",
            reparsed.len(),
            expected.len()
        )));
    }

    let mismatch = reparsed
        .iter()
        .zip(expected.iter())
        .find(|(found, wanted)| found.title != wanted.title);
    if let Some((found, wanted)) = mismatch {
        return Err(Error::InvalidSection(format!(
            "edited document has {:?} as section {}, expected {:?}",
            found.title, found.number, wanted.title
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
