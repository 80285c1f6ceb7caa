//! Link resolution and the crawl acceptance filter.
//!
//! Every `href` found on a fetched page goes through [`resolve`] and then
//! [`CrawlScope::accepts`] before it may enter the frontier. The filter is
//! deliberately coarse: containment under the seed is a plain string prefix
//! test, so `https://x.com/docs-extra/` passes for the seed `https://x.com/docs`.
//!
//! # Example
//!
//! ```rust
//! use docmirror_core::scope::{CrawlScope, resolve};
//!
//! let scope = CrawlScope::new("https://example.com/docs/", "example.com").unwrap();
//! let page = url::Url::parse("https://example.com/docs/intro").unwrap();
//!
//! let link = resolve(&page, "guide.html#setup").unwrap();
//! assert_eq!(link.as_str(), "https://example.com/docs/guide.html");
//! assert!(scope.accepts(&link));
//! assert!(!scope.accepts(&resolve(&page, "/blog/").unwrap()));
//! ```

use tracing::debug;
use url::Url;

use crate::{MirrorError, Result};

/// The only extension a followed link may carry.
pub const HTML_EXTENSION: &str = ".html";

/// Removes the fragment so `page#a` and `page#b` name the same page.
pub fn normalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Resolves `href` against the page it was found on and normalizes it.
///
/// Handles relative paths, `../`, absolute paths and protocol-relative links.
/// Returns `None` when the href cannot be joined.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    match base.join(href.trim()) {
        Ok(url) => Some(normalize(url)),
        Err(e) => {
            debug!(href, base = %base, error = %e, "ignoring unresolvable link");
            None
        }
    }
}

/// Returns the extension (dot included) of the last segment of a URL path.
///
/// Leading dots of the segment do not start an extension and a path ending
/// in `/` has none, so `/docs/` and `/docs/.hidden` both yield `None`.
pub fn path_extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let dot = name.rfind('.')?;

    if name[..dot].chars().all(|c| c == '.') { None } else { Some(&name[dot..]) }
}

/// The bounds of one crawl: a seed URL and the single host links must match.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    seed: Url,
    prefix: String,
    allowed_domain: String,
}

impl CrawlScope {
    /// Builds a scope from a seed URL and an allowed domain.
    ///
    /// The seed is parsed and normalized; its serialized form becomes the
    /// containment prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::InvalidUrl`] if the seed does not parse or has no host,
    /// and [`MirrorError::ConfigError`] if the allowed domain is empty.
    pub fn new(seed: &str, allowed_domain: &str) -> Result<Self> {
        let seed = Url::parse(seed).map_err(|e| MirrorError::InvalidUrl(format!("{seed}: {e}")))?;

        if seed.host_str().is_none() {
            return Err(MirrorError::InvalidUrl(format!("{seed} has no host")));
        }

        let allowed_domain = allowed_domain.trim();
        if allowed_domain.is_empty() {
            return Err(MirrorError::ConfigError("allowed domain must not be empty".to_string()));
        }

        let seed = normalize(seed);
        let prefix = seed.as_str().to_string();

        Ok(Self { seed, prefix, allowed_domain: allowed_domain.to_string() })
    }

    /// The normalized seed URL.
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The string every accepted URL must start with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// Host equals the allowed domain exactly.
    ///
    /// When the allowed domain is written as `host:port`, the URL's host and
    /// explicit port are compared together instead.
    pub fn matches_domain(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };

        if host == self.allowed_domain {
            return true;
        }

        match url.port() {
            Some(port) => format!("{host}:{port}") == self.allowed_domain,
            None => false,
        }
    }

    /// Raw string prefix test against the seed.
    pub fn within_prefix(&self, url: &Url) -> bool {
        url.as_str().starts_with(&self.prefix)
    }

    /// No extension, or exactly `.html`.
    pub fn accepts_extension(&self, url: &Url) -> bool {
        match path_extension(url.path()) {
            None => true,
            Some(ext) => ext == HTML_EXTENSION,
        }
    }

    /// Whether a resolved link may be followed.
    ///
    /// The visited check is the frontier's job and is not part of this test.
    pub fn accepts(&self, url: &Url) -> bool {
        self.matches_domain(url) && self.within_prefix(url) && self.accepts_extension(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scope() -> CrawlScope {
        CrawlScope::new("https://x.com/docs/", "x.com").unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[rstest]
    #[case("/docs/", None)]
    #[case("/docs/foo", None)]
    #[case("/docs/foo.html", Some(".html"))]
    #[case("/docs/file.pdf", Some(".pdf"))]
    #[case("/docs/archive.tar.gz", Some(".gz"))]
    #[case("/docs/v1.2/", None)]
    #[case("/docs/.hidden", None)]
    #[case("/docs/trailing.", Some("."))]
    #[case("", None)]
    fn test_path_extension(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(path_extension(path), expected);
    }

    #[rstest]
    #[case("https://x.com/docs/sub/", true)]
    #[case("https://x.com/docs/page", true)]
    #[case("https://x.com/docs/page.html", true)]
    #[case("https://x.com/other/", false)]
    #[case("https://y.com/docs/", false)]
    #[case("https://sub.x.com/docs/", false)]
    #[case("https://x.com/docs/manual.pdf", false)]
    #[case("https://x.com/docs/logo.png", false)]
    #[case("http://x.com/docs/", false)]
    fn test_accepts(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(scope().accepts(&url(candidate)), expected, "{candidate}");
    }

    #[test]
    fn test_prefix_check_is_not_segment_aware() {
        let scope = CrawlScope::new("https://x.com/docs", "x.com").unwrap();
        assert!(scope.accepts(&url("https://x.com/docs-extra/")));
    }

    #[test]
    fn test_domain_match_with_port() {
        let scope = CrawlScope::new("http://127.0.0.1:8080/docs/", "127.0.0.1:8080").unwrap();
        assert!(scope.matches_domain(&url("http://127.0.0.1:8080/docs/a")));
        assert!(!scope.matches_domain(&url("http://127.0.0.1:9090/docs/a")));

        let bare = CrawlScope::new("http://127.0.0.1:8080/docs/", "127.0.0.1").unwrap();
        assert!(bare.matches_domain(&url("http://127.0.0.1:8080/docs/a")));
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let base = url("https://x.com/docs/guide/intro");
        let a = resolve(&base, "page#a").unwrap();
        let b = resolve(&base, "page#b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "https://x.com/docs/guide/page");
    }

    #[test]
    fn test_resolve_relative_forms() {
        let base = url("https://x.com/docs/guide/intro");
        assert_eq!(resolve(&base, "../ref/").unwrap().as_str(), "https://x.com/docs/ref/");
        assert_eq!(resolve(&base, "/docs/top").unwrap().as_str(), "https://x.com/docs/top");
        assert_eq!(resolve(&base, "//y.com/docs/").unwrap().as_str(), "https://y.com/docs/");
        assert_eq!(resolve(&base, "#only-fragment").unwrap().as_str(), "https://x.com/docs/guide/intro");
    }

    #[test]
    fn test_non_http_links_rejected() {
        let base = url("https://x.com/docs/");
        let mail = resolve(&base, "mailto:someone@x.com").unwrap();
        assert!(!scope().accepts(&mail));
    }

    #[test]
    fn test_invalid_seed() {
        assert!(matches!(CrawlScope::new("not a url", "x.com"), Err(MirrorError::InvalidUrl(_))));
        assert!(matches!(CrawlScope::new("https://x.com/", " "), Err(MirrorError::ConfigError(_))));
    }

    #[test]
    fn test_seed_fragment_dropped_from_prefix() {
        let scope = CrawlScope::new("https://x.com/docs/#top", "x.com").unwrap();
        assert_eq!(scope.prefix(), "https://x.com/docs/");
    }
}
