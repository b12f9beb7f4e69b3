//! Web Word Crawler: a deadline-bounded word-frequency crawler
//!
//! This crate crawls a set of seed pages to a bounded link depth within a
//! wall-clock budget, visiting each reachable page at most once and
//! aggregating word-frequency statistics across every visited page. Page
//! fetches are timed through a generic call profiler.

pub mod config;
pub mod crawler;
pub mod output;
pub mod profiler;
pub mod state;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum WebCrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profiler error: {0}")]
    Profiler(#[from] ProfilerError),

    #[error("Implementation not found: {name} (available: {available})")]
    ImplementationNotFound { name: String, available: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors raised while downloading or parsing a single page
///
/// These never abort a crawl: the page still counts as visited but
/// contributes no words and no links.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("IO error reading {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },
}

/// Call profiler errors
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("Invalid argument: {capability} declares no profiled operations")]
    NoProfiledOperations { capability: &'static str },
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, WebCrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::{Config, CrawlerSettings};
pub use crawler::{ParallelCrawler, SequentialCrawler, WebCrawler};
pub use output::CrawlResult;
pub use profiler::Profiler;
