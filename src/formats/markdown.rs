//! Markdown format implementation using tree-sitter-md.
//!
//! Numbered sections are ATX headings of one fixed level whose text starts
//! with an integer and a separator, e.g. `## 8. Onboarding`. The block
//! grammar decides which lines are headings at all, so a lookalike inside a
//! fenced code block or a quote never reaches the heading pattern.

use crate::error::{Error, Result};
use crate::formats::{Format, HeadingMatch};
use regex::Regex;
use std::ops::Range;

/// Numbered ATX headings (`## N. Title`) at a configurable level.
#[derive(Clone, Debug)]
pub struct MarkdownFormat {
    level: usize,
    separator: String,
    query: String,
    pattern: Regex,
}

impl MarkdownFormat {
    /// Build the format for headings of `level` hashes with `separator` after the number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the level is outside `1..=6` or the
    /// separator is empty or spans lines.
    pub fn new(level: usize, separator: &str) -> Result<Self> {
        if !(1..=6).contains(&level) {
            return Err(Error::InvalidFormat(format!(
                "heading level must be between 1 and 6, got {level}"
            )));
        }
        if separator.is_empty() || separator.contains(['\n', '\r']) {
            return Err(Error::InvalidFormat(format!(
                "separator must be a non-empty single-line string, got {separator:?}"
            )));
        }

        let pattern = format!(
            r"^#{{{level}}}[ \t]+(?P<number>[0-9]+){sep}[ \t]+(?P<title>\S(?:.*\S)?)[ \t]*$",
            sep = regex::escape(separator),
        );
        let pattern = Regex::new(&pattern).map_err(|e| Error::InvalidFormat(e.to_string()))?;

        Ok(Self {
            level,
            separator: separator.to_string(),
            query: format!("(atx_heading (atx_h{level}_marker)) @heading"),
            pattern,
        })
    }

    /// Number of `#` characters in a section heading.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Text between the number and the title.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self::new(2, ".").expect("level 2 with '.' is a valid heading format")
    }
}

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &str {
        &self.query
    }

    fn parse_heading(&self, line: &str) -> Option<HeadingMatch> {
        let caps = self.pattern.captures(line)?;
        let number = caps.name("number")?;
        let title = caps.name("title")?;
        Some(HeadingMatch {
            number: number.range(),
            title: title.range(),
        })
    }

    fn render_heading(&self, number: usize, title: &str) -> (String, Range<usize>) {
        let marker = "#".repeat(self.level);
        let digits = number.to_string();
        let start = marker.len() + 1;
        let span = start..start + digits.len();
        (
            format!("{marker} {digits}{} {title}", self.separator),
            span,
        )
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
