//! Depth-first crawl on the caller's task

use crate::config::CrawlerSettings;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::task::{child_depth, CrawlContext, TaskOutcome};
use crate::crawler::WebCrawler;
use crate::output::CrawlResult;
use crate::state::RunState;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Downloads and processes one page at a time
pub struct SequentialCrawler {
    settings: CrawlerSettings,
    fetcher: Arc<dyn PageFetcher>,
}

impl SequentialCrawler {
    pub fn new(settings: CrawlerSettings, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { settings, fetcher }
    }
}

/// Visits `url`, then each of its links in document order, recursively
fn crawl_depth_first<'a>(ctx: &'a CrawlContext, url: String, depth: u32) -> BoxFuture<'a, ()> {
    async move {
        let TaskOutcome::Visited { links } = ctx.visit(&url, depth).await else {
            return;
        };

        if let Some(next_depth) = child_depth(depth) {
            for link in links {
                crawl_depth_first(ctx, link, next_depth).await;
            }
        }
    }
    .boxed()
}

#[async_trait]
impl WebCrawler for SequentialCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let ctx = CrawlContext::new(
            Arc::clone(&self.fetcher),
            self.settings.ignored_urls.clone(),
            RunState::new(self.settings.timeout),
        );

        for url in starting_urls {
            crawl_depth_first(&ctx, url.clone(), self.settings.max_depth).await;
        }

        CrawlResult::from_run_state(ctx.state(), self.settings.popular_word_count)
    }

    fn max_parallelism(&self) -> usize {
        1
    }
}
