//! Fork-join crawl over a bounded pool of workers
//!
//! Every crawl task is spawned onto the tokio runtime. A task acquires one
//! of the crawler's worker permits for its own visit (checks, fetch, merge)
//! and releases it before spawning its children, so the number of tasks
//! doing work at any moment never exceeds the pool size while parents wait
//! on their children without holding a worker.

use crate::config::CrawlerSettings;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::task::{child_depth, CrawlContext, TaskOutcome};
use crate::crawler::WebCrawler;
use crate::output::CrawlResult;
use crate::state::RunState;
use crate::ConfigError;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches and processes many pages concurrently
pub struct ParallelCrawler {
    settings: CrawlerSettings,
    fetcher: Arc<dyn PageFetcher>,
    workers: Arc<Semaphore>,
    pool_size: usize,
}

impl ParallelCrawler {
    /// Creates a crawler whose pool holds
    /// `min(settings.parallelism, available cores)` workers
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when `settings.parallelism` is zero.
    pub fn new(
        settings: CrawlerSettings,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, ConfigError> {
        if settings.parallelism == 0 {
            return Err(ConfigError::Validation(
                "parallel crawler needs a parallelism of at least 1".to_string(),
            ));
        }

        let pool_size = settings.parallelism.min(num_cpus::get()).max(1);

        Ok(Self {
            settings,
            fetcher,
            workers: Arc::new(Semaphore::new(pool_size)),
            pool_size,
        })
    }

    /// Number of tasks that may do work at the same time
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}

/// Runs one task and, once its visit is done, the whole subtree below it
fn crawl_subtree(
    ctx: Arc<CrawlContext>,
    workers: Arc<Semaphore>,
    url: String,
    depth: u32,
) -> BoxFuture<'static, ()> {
    async move {
        let outcome = {
            let Ok(_permit) = workers.acquire().await else {
                tracing::warn!("Worker pool closed, dropping {}", url);
                return;
            };
            ctx.visit(&url, depth).await
        };

        let TaskOutcome::Visited { links } = outcome else {
            return;
        };
        let Some(next_depth) = child_depth(depth) else {
            return;
        };

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(crawl_subtree(
                Arc::clone(&ctx),
                Arc::clone(&workers),
                link,
                next_depth,
            ));
        }
        join_all(&mut children, &url).await;
    }
    .boxed()
}

/// Waits for every task of the set; a task that failed loses only its own subtree
async fn join_all(tasks: &mut JoinSet<()>, parent: &str) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Crawl task below {} did not complete: {}", parent, e);
        }
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let ctx = Arc::new(CrawlContext::new(
            Arc::clone(&self.fetcher),
            self.settings.ignored_urls.clone(),
            RunState::new(self.settings.timeout),
        ));

        let mut seeds = JoinSet::new();
        for url in starting_urls {
            seeds.spawn(crawl_subtree(
                Arc::clone(&ctx),
                Arc::clone(&self.workers),
                url.clone(),
                self.settings.max_depth,
            ));
        }
        join_all(&mut seeds, "seed list").await;

        CrawlResult::from_run_state(ctx.state(), self.settings.popular_word_count)
    }

    fn max_parallelism(&self) -> usize {
        num_cpus::get()
    }
}
