//! Content fetching from URLs and local files.
//!
//! The crawler fetches pages through a [`Fetcher`], which owns a single
//! reqwest client configured from [`FetchConfig`]. The extractor reads saved
//! pages back with [`fetch_file`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{MirrorError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; docmirror/0.1)".to_string() }
    }
}

/// Performs single-attempt GET requests with a browser-like User-Agent.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds the underlying client. Redirects are followed.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(MirrorError::HttpError)?;

        Ok(Self { client, config })
    }

    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`MirrorError::Timeout`] when the request exceeds the timeout
    /// - [`MirrorError::HttpStatus`] for any non-2xx response
    /// - [`MirrorError::HttpError`] for connection and body errors
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> MirrorError {
        if err.is_timeout() {
            MirrorError::Timeout { timeout: self.config.timeout }
        } else {
            MirrorError::HttpError(err)
        }
    }
}

/// Reads a saved HTML page from disk.
pub fn fetch_file(path: &Path) -> Result<String> {
    if !path.exists() {
        Err(MirrorError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(MirrorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file(Path::new("/nonexistent/path/file.html"));
        assert!(matches!(result, Err(MirrorError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/docs/")
            .match_header("user-agent", "Mozilla/5.0 (compatible; docmirror/0.1)")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/docs/", server.url())).unwrap();
        let body = fetcher.fetch_page(&url).await.unwrap();

        assert!(body.contains("hello"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/missing").with_status(404).create_async().await;

        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let result = fetcher.fetch_page(&url).await;

        assert!(matches!(result, Err(MirrorError::HttpStatus { status: 404, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        let fetcher = Fetcher::new(FetchConfig { timeout: 5, ..Default::default() }).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let result = fetcher.fetch_page(&url).await;

        assert!(matches!(result, Err(MirrorError::HttpError(_)) | Err(MirrorError::Timeout { .. })));
    }
}
