//! Positional renumbering of parsed sections.
//!
//! A section's number is a function of its index and nothing else. The pass
//! walks the structured sequence, never the raw text, so numbered lists and
//! lookalike headings inside bodies cannot be hit.

use crate::section::Section;
use std::ops::Range;

/// Set `sections[j].number` to `j + 1` for every `j`, rewriting stale headings.
///
/// Sections that already carry their positional number are not touched, so on
/// a sequence that was consistent up to some index only the tail changes.
/// Returns the index range spanning every section that was relabelled (empty
/// if none were).
pub fn renumber(sections: &mut [Section]) -> Range<usize> {
    let mut first = None;
    let mut last = 0;

    for (index, section) in sections.iter_mut().enumerate() {
        let number = index + 1;
        if section.number != number {
            section.relabel(number);
            first.get_or_insert(index);
            last = index + 1;
        }
    }

    let changed = first.map_or(0..0, |first| first..last);
    if !changed.is_empty() {
        tracing::debug!(from = changed.start + 1, to = changed.end, "renumbered sections");
    }
    changed
}

#[cfg(test)]
#[path = "tests/renumber.rs"]
mod tests;
