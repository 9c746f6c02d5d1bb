//! Example records flowing through the gallery pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of every example's cross-reference label
pub const REF_PREFIX: &str = "gallery_";

/// Cross-reference label for an example name (e.g., "gallery_bar_chart")
pub fn reference(name: &str) -> String {
    format!("{}{}", REF_PREFIX, name)
}

/// A base record as enumerated by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSource {
    /// Stable identifier, used for file naming and anchors
    pub name: String,

    /// Grouping label on the index page
    pub category: String,

    /// Source file backing this example
    pub filename: PathBuf,
}

/// Fields shared by every record of one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFields {
    /// Cross-reference label of the gallery index
    pub gallery_ref: String,

    /// Show rendered output above the code
    pub code_below: bool,
}

/// A fully enriched example, ready to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub name: String,
    pub category: String,
    pub filename: PathBuf,

    /// Module docstring, verbatim
    pub docstring: String,

    /// Code after the docstring, always ending with the trailing marker
    pub code: String,

    /// 1-based line where `code` starts in the source file
    pub starting_line: usize,

    /// Label of the previous example in sort order
    pub prev_ref: Option<String>,

    /// Label of the next example in sort order
    pub next_ref: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ExampleRecord {
    /// This example's own cross-reference label
    pub fn reference(&self) -> String {
        reference(&self.name)
    }

    /// Relative output file name for this example (e.g., "bar.rst")
    pub fn output_file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }
}
