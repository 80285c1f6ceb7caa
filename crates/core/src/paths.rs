//! Mapping between URLs, saved pages and extracted text files.
//!
//! Both mappings are pure functions of their input. [`local_path`] turns a
//! fetched URL into a path relative to the crawl output directory, and
//! [`flattened_name`] turns a saved page's relative path into the flat file
//! name used by the extractor.

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::scope::path_extension;

/// Name given to pages whose URL names a directory.
pub const INDEX_FILE: &str = "index.html";

/// Extension of extracted documents.
pub const TEXT_EXTENSION: &str = "txt";

/// Relative on-disk path for a fetched URL.
///
/// - `/docs/` becomes `docs/index.html`
/// - `/docs/foo` (no extension) becomes `docs/foo/index.html`
/// - `/docs/foo.html` stays `docs/foo.html`
///
/// The site root maps to `index.html`. Query strings do not take part.
///
/// ```rust
/// use docmirror_core::paths::local_path;
/// use std::path::PathBuf;
///
/// let url = url::Url::parse("https://example.com/docs/foo").unwrap();
/// assert_eq!(local_path(&url), PathBuf::from("docs/foo/index.html"));
/// ```
pub fn local_path(url: &Url) -> PathBuf {
    let mut relative = url.path().trim_start_matches('/').to_string();

    if relative.is_empty() || relative.ends_with('/') {
        relative.push_str(INDEX_FILE);
    } else if path_extension(&relative).is_none() {
        relative.push('/');
        relative.push_str(INDEX_FILE);
    }

    relative
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect()
}

/// Flat output name for a saved page, given its path relative to the mirror root.
///
/// Separators become `-` and the `.html` extension is replaced with `.txt`.
/// Distinct inputs can collide: `a/b.html` and `a-b.html` both flatten to
/// `a-b.txt`.
///
/// ```rust
/// use docmirror_core::paths::flattened_name;
/// use std::path::Path;
///
/// let name = flattened_name(Path::new("reference/spreadsheet/index.html"));
/// assert_eq!(name, "reference-spreadsheet-index.txt");
/// ```
pub fn flattened_name(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let base = stem
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("-");

    format!("{base}.{TEXT_EXTENSION}")
}
