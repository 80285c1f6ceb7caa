//! Recursive mirroring of a documentation subtree.
//!
//! The [`Crawler`] walks a worklist of same-domain pages below a seed URL,
//! saves each fetched body under the output directory and queues the links
//! it finds. Fetching is strictly sequential with a fixed pause after every
//! fetch attempt.
//!
//! # Example
//!
//! ```rust,no_run
//! use docmirror_core::{CrawlConfig, Crawler};
//! use std::time::Duration;
//!
//! # async fn example() -> docmirror_core::Result<()> {
//! let config = CrawlConfig::builder("https://ai.google.dev/gemini-api/docs/", "gemini_api_docs_html", "ai.google.dev")
//!     .wait(Duration::from_secs(1))
//!     .build();
//!
//! let report = Crawler::new(config)?.run().await?;
//! println!("saved {} pages", report.pages_saved());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::fetch::{FetchConfig, Fetcher};
use crate::frontier::Frontier;
use crate::parse::Document;
use crate::paths::local_path;
use crate::scope::{CrawlScope, resolve};
use crate::Result;

/// Configuration for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Starting page, also the containment prefix for followed links.
    pub seed_url: String,

    /// Root directory the mirror is written under.
    pub output_dir: PathBuf,

    /// Host every followed link must have.
    pub allowed_domain: String,

    /// Pause after each fetch attempt (default: 1 second).
    pub wait: Duration,

    /// HTTP client settings.
    pub fetch: FetchConfig,

    /// Stop after this many fetch attempts (default: unbounded).
    pub max_pages: Option<usize>,
}

impl CrawlConfig {
    /// Creates a builder with the three required settings.
    pub fn builder(
        seed_url: impl Into<String>, output_dir: impl Into<PathBuf>, allowed_domain: impl Into<String>,
    ) -> CrawlConfigBuilder {
        CrawlConfigBuilder::new(seed_url, output_dir, allowed_domain)
    }
}

/// Builder for CrawlConfig.
///
/// ```rust
/// use docmirror_core::CrawlConfig;
/// use std::time::Duration;
///
/// let config = CrawlConfig::builder("https://example.com/docs/", "mirror", "example.com")
///     .wait(Duration::ZERO)
///     .timeout(10)
///     .max_pages(50)
///     .build();
/// assert_eq!(config.max_pages, Some(50));
/// ```
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    pub fn new(
        seed_url: impl Into<String>, output_dir: impl Into<PathBuf>, allowed_domain: impl Into<String>,
    ) -> Self {
        Self {
            config: CrawlConfig {
                seed_url: seed_url.into(),
                output_dir: output_dir.into(),
                allowed_domain: allowed_domain.into(),
                wait: Duration::from_secs(1),
                fetch: FetchConfig::default(),
                max_pages: None,
            },
        }
    }

    /// Sets the pause between fetches.
    pub fn wait(mut self, value: Duration) -> Self {
        self.config.wait = value;
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Caps the number of fetch attempts.
    pub fn max_pages(mut self, value: usize) -> Self {
        self.config.max_pages = Some(value);
        self
    }

    pub fn build(self) -> CrawlConfig {
        self.config
    }
}

/// A URL that was claimed but could not be mirrored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub reason: String,
}

/// What a crawl did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub output_dir: PathBuf,
    /// Every URL claimed during the run, fetched successfully or not.
    pub visited: BTreeSet<String>,
    /// Files written, in visit order.
    pub saved: Vec<PathBuf>,
    pub failed: Vec<FailedFetch>,
}

impl CrawlReport {
    pub fn pages_saved(&self) -> usize {
        self.saved.len()
    }

    pub fn pages_failed(&self) -> usize {
        self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

/// Sequential same-site crawler.
pub struct Crawler {
    config: CrawlConfig,
    scope: CrawlScope,
    fetcher: Fetcher,
}

impl Crawler {
    /// Validates the seed and builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::InvalidUrl`](crate::MirrorError::InvalidUrl) for an unusable
    /// seed and [`MirrorError::HttpError`](crate::MirrorError::HttpError) if the client
    /// cannot be built.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let scope = CrawlScope::new(&config.seed_url, &config.allowed_domain)?;
        let fetcher = Fetcher::new(config.fetch.clone())?;
        Ok(Self { config, scope, fetcher })
    }

    /// Runs the crawl until the frontier is empty.
    ///
    /// Only failing to create the output directory aborts the run. Fetch and
    /// write failures are logged, recorded in the report and skipped.
    pub async fn run(&self) -> Result<CrawlReport> {
        fs::create_dir_all(&self.config.output_dir).await?;

        let mut frontier = Frontier::new(self.scope.seed().clone());
        let mut report = CrawlReport {
            seed: self.scope.seed().to_string(),
            output_dir: self.config.output_dir.clone(),
            ..Default::default()
        };

        info!(seed = %self.scope.seed(), output = %self.config.output_dir.display(), "starting crawl");

        while let Some(url) = frontier.pop() {
            if let Some(limit) = self.config.max_pages {
                if frontier.visited().len() >= limit {
                    info!(limit, pending = frontier.pending_len() + 1, "page limit reached, stopping");
                    break;
                }
            }

            if !frontier.mark_visited(&url) {
                continue;
            }

            info!(url = %url, "visiting");

            match self.fetcher.fetch_page(&url).await {
                Ok(body) => {
                    match self.save_page(&url, &body).await {
                        Ok(path) => {
                            info!(path = %path.display(), "saved");
                            report.saved.push(path);
                        }
                        Err(e) => {
                            warn!(url = %url, error = %e, "could not save page");
                            report.failed.push(FailedFetch { url: url.to_string(), reason: e.to_string() });
                        }
                    }

                    for link in self.discover_links(&url, &body) {
                        if !frontier.is_visited(&link) {
                            frontier.push(link);
                        }
                    }
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch failed, skipping");
                    report.failed.push(FailedFetch { url: url.to_string(), reason: e.to_string() });
                }
            }

            if !self.config.wait.is_zero() {
                debug!(wait = ?self.config.wait, "sleeping");
                tokio::time::sleep(self.config.wait).await;
            }
        }

        report.visited = frontier.into_visited().into_iter().map(String::from).collect();

        if report.is_empty() {
            info!(seed = %report.seed, "crawl finished, nothing downloaded");
        } else {
            info!(saved = report.pages_saved(), failed = report.pages_failed(), "crawl finished");
        }

        Ok(report)
    }

    /// Writes the raw body to the path derived from the URL, replacing any earlier copy.
    async fn save_page(&self, url: &Url, body: &str) -> Result<PathBuf> {
        let path = self.config.output_dir.join(local_path(url));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, body).await?;
        Ok(path)
    }

    /// Resolves every anchor on the page and keeps the ones in scope.
    fn discover_links(&self, page: &Url, body: &str) -> Vec<Url> {
        let doc = Document::parse(body);
        let mut accepted = Vec::new();

        for href in doc.links() {
            let Some(link) = resolve(page, href) else {
                continue;
            };
            if self.scope.accepts(&link) {
                accepted.push(link);
            } else {
                debug!(link = %link, "out of scope");
            }
        }

        accepted
    }
}

/// Crawls `seed_url` into `output_dir` with default fetch settings.
pub async fn crawl(
    seed_url: &str, output_dir: impl AsRef<Path>, allowed_domain: &str, wait: Duration,
) -> Result<CrawlReport> {
    let config = CrawlConfig::builder(seed_url, output_dir.as_ref(), allowed_domain)
        .wait(wait)
        .build();
    Crawler::new(config)?.run().await
}
