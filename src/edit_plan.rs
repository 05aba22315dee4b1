//! The edit plan describes section insertions against one document.
//!
//! Plans are plain serde structures so they can be written by hand or by
//! another tool as JSON and replayed. Applying a plan is all-or-nothing: the
//! document is parsed once, every insertion runs in memory, and the file is
//! only replaced once the whole result has been verified.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::input;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Serialisable list of insertions into a single file.
pub struct EditPlan {
    /// Target file path for these insertions.
    pub file_name: String,
    /// Insertions applied in order, each against the result of the previous one.
    pub insertions: Vec<Insertion>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// One new section and the number it should receive.
pub struct Insertion {
    /// 1-based position the section will occupy.
    pub target: usize,
    /// Heading title of the new section.
    pub title: String,
    /// Body text placed after the heading line.
    #[serde(default)]
    pub body: String,
}

impl Insertion {
    /// Apply this insertion to a parsed document.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Document::insert`].
    pub fn apply_to<F: Format + ?Sized>(&self, document: &mut Document, format: &F) -> Result<()> {
        document.insert(format, self.target, &self.title, &self.body)?;
        Ok(())
    }
}

impl EditPlan {
    /// Load a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(Error::Plan)
    }

    /// Apply every insertion to `text` and return the new document text.
    ///
    /// # Errors
    ///
    /// Returns the first parse or insertion error; no partial result is produced.
    pub fn apply_to_text<F: Format + ?Sized>(&self, text: &str, format: &F) -> Result<String> {
        let mut document = input::parse_document(text, format)?;
        for insertion in &self.insertions {
            insertion.apply_to(&mut document, format)?;
        }
        let output = document.serialize();
        input::verify(&output, &document, format)?;
        Ok(output)
    }

    /// Apply the plan to `file_name` on disk.
    ///
    /// The new content goes to a temporary file next to the target which is
    /// then renamed over it, so readers see either the old or the new file.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, editing or writing fails. The original
    /// file is left untouched in every error case.
    pub fn apply<F: Format + ?Sized>(&self, format: &F) -> Result<()> {
        let path = Path::new(&self.file_name);
        let text = fs::read_to_string(path)?;
        let output = self.apply_to_text(&text, format)?;
        write_atomically(path, &output)?;
        tracing::info!(
            file = %self.file_name,
            insertions = self.insertions.len(),
            "applied edit plan"
        );
        Ok(())
    }
}

/// Replace the contents of `path` with `contents` via a same-directory rename.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or persisted.
pub fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
