//! A parsed document: preamble text followed by numbered sections.
//!
//! Insertion splices a placeholder section into the sequence and hands the
//! whole sequence to the renumbering pass; serialization concatenates the
//! verbatim pieces back together.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::input;
use crate::renumber::renumber;
use crate::section::Section;
use std::fmt;

/// Number given to a freshly built section until it is renumbered by position.
const PLACEHOLDER: usize = 0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered numbered sections plus the text preceding the first one.
pub struct Document {
    /// Verbatim text before the first heading (the whole text if there is none).
    pub preamble: String,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no numbered sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in document order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Section carrying `number`, if any.
    #[must_use]
    pub fn get(&self, number: usize) -> Option<&Section> {
        number.checked_sub(1).and_then(|i| self.sections.get(i))
    }

    /// Line terminator used for new headings: that of the first section, else `\n`.
    #[must_use]
    pub fn line_ending(&self) -> &str {
        self.sections
            .iter()
            .map(|s| s.line_ending.as_str())
            .find(|ending| !ending.is_empty())
            .unwrap_or("\n")
    }

    /// Insert a new section so that it carries `target` and return it.
    ///
    /// The section is built with a placeholder number and spliced in before
    /// the section currently numbered `target` (appended when `target` is one
    /// past the last). Renumbering then derives every number from position.
    ///
    /// Sections before `target` keep their text. The one exception is an
    /// append after a last section with no final newline: the output then
    /// gains a line break before the new heading, which that section's body
    /// carries on the next parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `target` is outside `1..=len + 1`, and
    /// [`Error::InvalidSection`] if the title is empty or multi-line or the
    /// body holds a numbered heading of its own. The document is unchanged on
    /// error.
    pub fn insert<F: Format + ?Sized>(
        &mut self,
        format: &F,
        target: usize,
        title: &str,
        body: &str,
    ) -> Result<&Section> {
        let max = self.len() + 1;
        if !(1..=max).contains(&target) {
            return Err(Error::OutOfRange { target, max });
        }

        let section = self.build_section(format, title, body)?;
        let index = target - 1;
        self.sections.insert(index, section);
        let changed = renumber(&mut self.sections);

        tracing::debug!(
            position = target,
            title,
            shifted = changed.len().saturating_sub(1),
            "inserted section"
        );

        Ok(&self.sections[index])
    }

    fn build_section<F: Format + ?Sized>(
        &self,
        format: &F,
        title: &str,
        body: &str,
    ) -> Result<Section> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidSection("title is empty".to_string()));
        }
        if title.contains(['\n', '\r']) {
            return Err(Error::InvalidSection(format!(
                "title {title:?} spans more than one line"
            )));
        }

        let (heading, number_span) = format.render_heading(PLACEHOLDER, title);
        if format.parse_heading(&heading).is_none() {
            return Err(Error::InvalidSection(format!(
                "title {title:?} does not fit the heading format"
            )));
        }
        if input::has_heading(body, format)? {
            return Err(Error::InvalidSection(
                "body contains a numbered heading of its own".to_string(),
            ));
        }

        Ok(Section {
            number: PLACEHOLDER,
            title: title.to_string(),
            heading,
            number_span,
            line_ending: self.line_ending().to_string(),
            body: body.to_string(),
            source_line: None,
        })
    }

    /// Outline of the sections as pretty JSON: `number`, `title` and source `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Outline`] if encoding fails.
    pub fn outline_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.sections).map_err(Error::Outline)
    }

    /// Reassemble the document text.
    ///
    /// A heading that would otherwise follow unterminated text is put on its
    /// own line (a lone byte-order mark does not count as text); for a freshly
    /// parsed document the output equals the input.
    #[must_use]
    pub fn serialize(&self) -> String {
        let size = self.preamble.len() + self.sections.iter().map(Section::len).sum::<usize>();
        let mut out = String::with_capacity(size + self.sections.len());
        out.push_str(&self.preamble);

        for section in &self.sections {
            let written = out.trim_start_matches(input::BOM);
            if !written.is_empty() && !written.ends_with('\n') {
                out.push_str(self.line_ending());
            }
            section.write_into(&mut out);
        }

        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
