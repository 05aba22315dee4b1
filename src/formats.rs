//! Format trait and implementations for different heading conventions.
//!
//! This module defines the `Format` trait which abstracts over how a document
//! marks its numbered sections: a tree-sitter query that finds candidate
//! heading lines, and the pattern that splits such a line into number and
//! title (or renders one back).

use std::ops::Range;

pub mod markdown;

/// Byte spans of the parts of a numbered heading line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Digits of the section number.
    pub number: Range<usize>,
    /// Title text, trimmed of surrounding blanks.
    pub title: Range<usize>,
}

/// Heading-marker convention used to find, read and write section headings.
pub trait Format {
    /// Grammar used to locate structural heading lines.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing candidate heading nodes as `@heading`.
    fn section_query(&self) -> &str;

    /// Split a heading line (no terminator) into number and title, if it is numbered.
    fn parse_heading(&self, line: &str) -> Option<HeadingMatch>;

    /// Render a heading line for `number` and `title`, returning it with the number span.
    fn render_heading(&self, number: usize, title: &str) -> (String, Range<usize>);
}
