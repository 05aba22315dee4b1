//! Configuration to acknowledge document conventions as well as set defaults.
//!
//! Specifically, we try to find an ordinal.toml, and if present we load settings from there.
//! This provides the heading level and number separator that mark a section.

use crate::error::Result;
use crate::formats::markdown::MarkdownFormat;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "ordinal.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// Heading conventions loaded from ordinal.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2)]
    /// Number of `#` characters in a section heading.
    pub heading_level: usize,
    #[facet(default = ".".to_string())]
    /// Text between a section number and its title.
    pub separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heading_level: 2,
            separator: ".".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from `path`, or ordinal.toml if none is given.
    ///
    /// A missing or unparseable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::from_toml(&contents).unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "ignoring unparseable configuration");
            Self::default()
        })
    }

    #[must_use]
    /// Parse configuration text, `None` if it is not valid.
    pub fn from_toml(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    /// Heading format described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the level or separator cannot form a heading.
    pub fn format(&self) -> Result<MarkdownFormat> {
        MarkdownFormat::new(self.heading_level, &self.separator)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
