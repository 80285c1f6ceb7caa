//! Conversion of a mirrored HTML tree into flat plain-text files.
//!
//! [`extract_all`] walks every `.html` file under a directory, pulls the text
//! of one content node out of each and writes it to
//! `<output_dir>/<flattened relative path>.txt`. Pages without the content
//! node are skipped without complaint; any other per-file failure, including
//! an unreadable subdirectory, is logged and the run continues.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use scraper::Selector;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::document::ExtractedDocument;
use crate::fetch::fetch_file;
use crate::parse::{Document, parse_selector};
use crate::paths::flattened_name;
use crate::{MirrorError, Result};

/// Selector for the article body of Google developer documentation pages.
pub const DEFAULT_CONTENT_SELECTOR: &str = "div.devsite-article-body";

/// Configuration for text extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// CSS selector identifying the content node
    pub content_selector: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { content_selector: DEFAULT_CONTENT_SELECTOR.to_string() }
    }
}

/// A file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The result of an extraction run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractReport {
    pub html_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Number of `.html` files found
    pub found: usize,
    /// Text files written
    pub written: Vec<PathBuf>,
    /// HTML files without a content node
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
    /// Output names produced by more than one input; the last input wins
    pub collisions: Vec<String>,
}

impl ExtractReport {
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }
}

/// Result of walking a mirror directory.
#[derive(Debug, Default)]
pub struct HtmlTree {
    /// Every `.html` file found, sorted
    pub files: Vec<PathBuf>,
    /// Entries below the root that could not be read
    pub unreadable: Vec<FailedFile>,
}

/// Every `.html` file under `dir`. A missing directory yields none.
///
/// # Errors
///
/// [`MirrorError::ConfigError`] when `dir` is not a directory and
/// [`MirrorError::WalkError`] when `dir` itself cannot be read. Failures
/// deeper in the tree are collected in [`HtmlTree::unreadable`].
pub fn html_files(dir: &Path) -> Result<HtmlTree> {
    if !dir.exists() {
        return Ok(HtmlTree::default());
    }
    if !dir.is_dir() {
        return Err(MirrorError::ConfigError(format!("{} is not a directory", dir.display())));
    }

    let mut tree = HtmlTree::default();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                tree.unreadable.push(FailedFile { path, reason: e.to_string() });
                continue;
            }
        };

        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "html") {
            tree.files.push(entry.into_path());
        }
    }

    tree.files.sort();
    Ok(tree)
}

/// Reads one saved page and extracts its content node.
///
/// Returns `Ok(None)` when the page has no node matching `selector`.
pub fn extract_document(path: &Path, selector: &Selector) -> Result<Option<ExtractedDocument>> {
    let html = fetch_file(path)?;
    let doc = Document::parse(&html);

    Ok(doc.find(selector).map(|node| ExtractedDocument::from_element(path, &node)))
}

/// Converts one file and writes its text under `output_dir`.
///
/// Returns the written path, or `None` when the page had no content node.
pub fn extract_file(path: &Path, html_dir: &Path, output_dir: &Path, selector: &Selector) -> Result<Option<PathBuf>> {
    let Some(document) = extract_document(path, selector)? else {
        return Ok(None);
    };

    let relative = path.strip_prefix(html_dir).unwrap_or(path);
    let output_path = output_dir.join(flattened_name(relative));
    fs::write(&output_path, document.render())?;

    Ok(Some(output_path))
}

/// Converts every HTML file under `html_dir` into a text file in `output_dir`.
///
/// The output directory is created only when there is something to convert.
/// An invalid selector, an unreadable or non-directory `html_dir` and an
/// uncreatable output directory fail the whole run; everything else is
/// handled per file.
pub fn extract_all(html_dir: &Path, output_dir: &Path, config: &ExtractConfig) -> Result<ExtractReport> {
    let selector = parse_selector(&config.content_selector)?;
    let HtmlTree { files, unreadable } = html_files(html_dir)?;

    let mut report = ExtractReport {
        html_dir: html_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        found: files.len(),
        failed: unreadable,
        ..Default::default()
    };

    if files.is_empty() {
        info!(dir = %html_dir.display(), "no HTML files found");
        return Ok(report);
    }

    fs::create_dir_all(output_dir)?;
    info!(count = files.len(), dir = %html_dir.display(), "processing HTML files");

    let mut names = HashSet::new();

    for path in files {
        match extract_file(&path, html_dir, output_dir, &selector) {
            Ok(Some(written)) => {
                let name = written.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                if !names.insert(name.clone()) {
                    warn!(name = %name, source = %path.display(), "output name collision, overwriting earlier file");
                    report.collisions.push(name);
                }
                info!(path = %written.display(), "converted");
                report.written.push(written);
            }
            Ok(None) => {
                debug!(path = %path.display(), "no content node");
                report.skipped.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to convert");
                report.failed.push(FailedFile { path, reason: e.to_string() });
            }
        }
    }

    Ok(report)
}

/// Removes an output directory left by an earlier run. Returns whether it existed.
pub fn clear_output_dir(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ARTICLE: &str = r#"<html><body>
        <nav>Navigation</nav>
        <div class="devsite-article-body"><h1>Title</h1><p>Body   text.</p></div>
    </body></html>"#;

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path: PathBuf = root.join(relative.split('/').collect::<PathBuf>());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_html_files_recursive_and_sorted() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b/index.html", ARTICLE);
        write(tmp.path(), "a.html", ARTICLE);
        write(tmp.path(), "notes.txt", "ignored");

        let files = html_files(tmp.path()).unwrap().files;
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.html"));
        assert!(files[1].ends_with("index.html"));
    }

    #[test]
    fn test_html_files_missing_dir() {
        let tree = html_files(Path::new("/nonexistent/docmirror/html")).unwrap();
        assert!(tree.files.is_empty());
        assert!(tree.unreadable.is_empty());
    }

    #[test]
    fn test_html_dir_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        let page = write(tmp.path(), "page.html", ARTICLE);
        let out = tmp.path().join("txt");

        let result = extract_all(&page, &out, &ExtractConfig::default());
        assert!(matches!(result, Err(MirrorError::ConfigError(_))));
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_does_not_abort() {
        use std::os::unix::fs::PermissionsExt;

        let html = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(html.path(), "good.html", ARTICLE);
        let locked = html.path().join("locked");
        write(&locked, "hidden.html", ARTICLE);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = extract_all(html.path(), out.path(), &ExtractConfig::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let report = report.unwrap();

        assert_eq!(report.found, 1);
        assert!(out.path().join("good.txt").exists());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].path.ends_with("locked"));
    }

    #[test]
    fn test_extract_document() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "page.html", ARTICLE);
        let selector = parse_selector(DEFAULT_CONTENT_SELECTOR).unwrap();

        let document = extract_document(&path, &selector).unwrap().unwrap();
        assert_eq!(document.text, "Title\nBody   text.");
        assert!(!document.text.contains("Navigation"));
    }

    #[test]
    fn test_extract_file_writes_flat_name() {
        let html = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write(html.path(), "reference/spreadsheet/index.html", ARTICLE);
        let selector = parse_selector(DEFAULT_CONTENT_SELECTOR).unwrap();

        let written = extract_file(&path, html.path(), out.path(), &selector).unwrap().unwrap();
        assert_eq!(written, out.path().join("reference-spreadsheet-index.txt"));

        let contents = fs::read_to_string(written).unwrap();
        assert!(contents.starts_with(&format!("Source Path: {}\n\n", path.display())));
        assert!(contents.ends_with("Title\nBody   text."));
    }

    #[test]
    fn test_extract_all_without_files_creates_nothing() {
        let html = TempDir::new().unwrap();
        let out = html.path().join("never-created");

        let report = extract_all(html.path(), &out, &ExtractConfig::default()).unwrap();
        assert!(report.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_extract_all_invalid_selector() {
        let html = TempDir::new().unwrap();
        let config = ExtractConfig { content_selector: "[[bad".to_string() };
        assert!(extract_all(html.path(), html.path(), &config).is_err());
    }

    #[test]
    fn test_clear_output_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("txt");
        assert!(!clear_output_dir(&dir).unwrap());

        write(&dir, "old.txt", "stale");
        assert!(clear_output_dir(&dir).unwrap());
        assert!(!dir.exists());
    }
}
