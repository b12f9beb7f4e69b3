//! Crawler module for page fetching and word aggregation
//!
//! This module contains the core crawling logic, including:
//! - The `WebCrawler` capability and its two strategies
//! - Page fetching and HTML parsing
//! - The crawl task both strategies are built from
//! - Strategy selection and overall run coordination

mod coordinator;
mod fetcher;
mod parallel;
mod parser;
mod registry;
mod sequential;
mod task;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, HttpPageFetcher, PageFetcher};
pub use parallel::ParallelCrawler;
pub use parser::{count_words, parse_html, PageContent};
pub use registry::{CrawlerConstructor, CrawlerRegistry};
pub use sequential::SequentialCrawler;
pub use task::{child_depth, CrawlContext, SkipReason, TaskOutcome};

use crate::config::Config;
use crate::output::CrawlResult;
use crate::profiler::{Capability, Operation, Profiled};
use async_trait::async_trait;

/// A crawl strategy
///
/// `crawl` runs one complete crawl from the given seeds with a fresh run
/// state, returning the popular words and the number of distinct URLs
/// visited. Implementations never fail as a whole: per-page problems are
/// logged and the page simply contributes nothing.
#[async_trait]
pub trait WebCrawler: Send + Sync {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult;

    /// Largest degree of parallelism this strategy can use
    fn max_parallelism(&self) -> usize;
}

impl Capability for dyn WebCrawler {
    const NAME: &'static str = "WebCrawler";
    const OPERATIONS: &'static [Operation] = &[
        Operation::profiled("crawl"),
        Operation::unprofiled("max_parallelism"),
    ];
}

#[async_trait]
impl<T: WebCrawler> WebCrawler for Profiled<T> {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        self.invoke_async("crawl", self.inner().crawl(starting_urls))
            .await
    }

    fn max_parallelism(&self) -> usize {
        self.invoke("max_parallelism", |crawler| crawler.max_parallelism())
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and the profiled page fetcher
/// 2. Select the crawl strategy
/// 3. Crawl the start pages until depth or deadline runs out
/// 4. Write the result and the profiling report
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed and outputs were written
/// * `Err(WebCrawlerError)` - Setup or output failed
pub async fn crawl(config: Config) -> crate::Result<CrawlResult> {
    Coordinator::new(config)?.run().await
}
