//! Error types for docmirror operations.
//!
//! This module defines the main error type [`MirrorError`] which represents
//! everything that can go wrong while fetching pages, writing the mirror,
//! or extracting text from saved files.
//!
//! Most of these errors are handled locally by the crawler and extractor:
//! a failed fetch or a broken file is logged and the run moves on. Only
//! setup failures (bad seed URL, unwritable output directory) escape
//! [`Crawler::run`](crate::Crawler::run) and [`extract_all`](crate::extract_all).
//!
//! # Example
//!
//! ```rust
//! use docmirror_core::{MirrorError, Result};
//!
//! fn require_host(url: &url::Url) -> Result<&str> {
//!     url.host_str().ok_or_else(|| MirrorError::InvalidUrl(format!("{url} has no host")))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crawl and extraction operations.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// HTTP request errors from reqwest.
    ///
    /// Covers DNS failures, refused connections and other transport problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a seed URL cannot be parsed or lacks a scheme or host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// In practice this is an invalid CSS selector, since html5ever
    /// recovers from malformed markup.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read or write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Errors raised while walking a directory tree.
    #[error("Failed to walk directory: {0}")]
    WalkError(String),

    /// Invalid crawl or extraction configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<walkdir::Error> for MirrorError {
    fn from(err: walkdir::Error) -> Self {
        MirrorError::WalkError(err.to_string())
    }
}

/// Result type alias for MirrorError.
pub type Result<T> = std::result::Result<T, MirrorError>;
