//! Page fetcher implementation
//!
//! This module resolves a URL to the words and links of the page behind it:
//! - `PageFetcher`, the capability the crawl tasks depend on
//! - `HttpPageFetcher`, which downloads http(s) pages and reads `file:` pages
//!   from disk
//! - Building HTTP clients with a proper user agent string

use crate::config::{PatternList, UserAgentConfig};
use crate::crawler::parser::{parse_html, PageContent};
use crate::profiler::{Capability, Operation, Profiled};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Resolves a URL to its word counts and outbound links
///
/// Implementations honor their own timeout; a failure is reported as a
/// [`FetchError`] and never retried by the crawler.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<PageContent>;
}

impl Capability for dyn PageFetcher {
    const NAME: &'static str = "PageFetcher";
    const OPERATIONS: &'static [Operation] = &[Operation::profiled("fetch")];
}

#[async_trait]
impl<T: PageFetcher> PageFetcher for Profiled<T> {
    async fn fetch(&self, url: &str) -> FetchResult<PageContent> {
        self.invoke_async("fetch", self.inner().fetch(url)).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use web_word_crawler::config::UserAgentConfig;
/// use web_word_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S), or from disk for `file:` URLs
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    ignored_words: Arc<PatternList>,
}

impl HttpPageFetcher {
    pub fn new(client: Client, ignored_words: PatternList) -> Self {
        Self {
            client,
            ignored_words: Arc::new(ignored_words),
        }
    }

    async fn download(&self, url: &Url) -> FetchResult<String> {
        if url.scheme() == "file" {
            return read_file(url).await;
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        response
            .text()
            .await
            .map_err(|e| classify_error(url.as_str(), e))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<PageContent> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let body = self.download(&parsed).await?;
        Ok(parse_html(&body, &parsed, &self.ignored_words))
    }
}

/// A missing Content-Type is accepted as HTML
fn is_html(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

async fn read_file(url: &Url) -> FetchResult<String> {
    let path = url.to_file_path().map_err(|_| FetchError::Io {
        url: url.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a local file path"),
    })?;

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FetchError::Io {
            url: url.to_string(),
            source,
        })
}
