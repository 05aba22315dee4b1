//! ordinal: insert sections into numbered markdown catalogues and keep the numbering contiguous.
//!
//! Documents are parsed into a preamble and a sequence of [`section::Section`]s
//! marked by headings such as `## 8. Onboarding`. A new section is spliced in
//! by position, every later section is relabelled from its index, and the
//! document is written back with all other bytes untouched.
//!
//! ```
//! let text = "## 1. Sign Up\n\nbody\n\n## 2. Create Job Post\n";
//! let edited = ordinal::insert_section(text, 2, "Onboarding", "\nsteps\n\n").unwrap();
//! assert!(edited.contains("## 2. Onboarding"));
//! assert!(edited.contains("## 3. Create Job Post"));
//! ```

pub mod config;
pub mod document;
pub mod edit_plan;
pub mod error;
pub mod formats;
pub mod input;
pub mod renumber;
pub mod section;

pub use document::Document;
pub use error::{Error, Result};
pub use input::insert_section;
