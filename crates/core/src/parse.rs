//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types used by both
//! pipeline stages: the crawler pulls anchor targets out of fetched pages and
//! the extractor selects the article body of saved ones.
//!
//! # Example
//!
//! ```rust
//! use docmirror_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div class="devsite-article-body"><p>Hello</p></div>
//!             <a href="/docs/next">Next</a>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.links(), vec!["/docs/next"]);
//! let body = doc.select_first("div.devsite-article-body").unwrap().unwrap();
//! assert_eq!(body.block_text(), "Hello");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{MirrorError, Result};

/// Elements whose text never counts as visible content.
const HIDDEN_TEXT_TAGS: [&str; 3] = ["script", "style", "template"];

/// Represents a parsed HTML document.
///
/// Parsing never fails: html5ever recovers from malformed markup the way a
/// browser does.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects the first element in document order matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// The first element matching an already compiled selector.
    pub fn find(&'_ self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(|el| Element { element: el })
    }

    /// The raw `href` value of every anchor that has one, in document order.
    pub fn links(&self) -> Vec<&str> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };
        self.html.select(&selector).filter_map(|a| a.value().attr("href")).collect()
    }
}

/// Compiles a CSS selector once so it can be reused across documents.
///
/// # Errors
///
/// Returns [`MirrorError::HtmlParseError`] if the selector is invalid.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| MirrorError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Visible text, one text run per line.
    ///
    /// Each text node is trimmed, whitespace-only nodes are dropped and the
    /// rest are joined with `\n`. Text inside script, style and template
    /// elements is skipped; `noscript` fallback text is kept.
    pub fn block_text(&self) -> String {
        let mut runs = Vec::new();

        for node in self.element.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| HIDDEN_TEXT_TAGS.contains(&ancestor.value().name()));

            if !hidden {
                runs.push(trimmed);
            }
        }

        runs.join("\n")
    }
}
