//! The text file produced for one saved page.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::parse::Element;

/// Article text pulled from one saved HTML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Path of the HTML file the text came from, as it was found on disk.
    pub source_path: PathBuf,

    /// Visible text of the content node, one text run per line.
    pub text: String,
}

impl ExtractedDocument {
    pub fn new(source_path: impl Into<PathBuf>, text: String) -> Self {
        Self { source_path: source_path.into(), text }
    }

    /// Builds a document from the selected content node.
    pub fn from_element(source_path: &Path, element: &Element<'_>) -> Self {
        Self::new(source_path, element.block_text())
    }

    /// File contents: a source header, a blank line, then the text.
    ///
    /// ```text
    /// Source Path: <original file path>
    ///
    /// <extracted text>
    /// ```
    pub fn render(&self) -> String {
        format!("Source Path: {}\n\n{}", self.source_path.display(), self.text)
    }
}
