//! A single crawl task: "visit this URL with this much depth left"
//!
//! Both crawl strategies drive the same [`CrawlContext::visit`]; they differ
//! only in how the child tasks for the returned links are executed.

use crate::config::PatternList;
use crate::crawler::fetcher::PageFetcher;
use crate::state::RunState;
use std::sync::Arc;

/// Why a task ended without fetching its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DepthExhausted,
    DeadlinePassed,
    Ignored,
    AlreadyVisited,
}

/// Result of running one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The URL was not fetched and is not counted as visited (unless
    /// another task claimed it)
    Skipped(SkipReason),

    /// The URL was claimed but its fetch failed; it counts as visited and
    /// contributes nothing
    Failed,

    /// The page's words were merged; `links` are the child tasks to run
    Visited { links: Vec<String> },
}

/// Everything the tasks of one run share
pub struct CrawlContext {
    fetcher: Arc<dyn PageFetcher>,
    ignored_urls: PatternList,
    state: RunState,
}

impl CrawlContext {
    pub fn new(fetcher: Arc<dyn PageFetcher>, ignored_urls: PatternList, state: RunState) -> Self {
        Self {
            fetcher,
            ignored_urls,
            state,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Runs one task up to the point where its children would be created
    ///
    /// Checks, in order: remaining depth, deadline, ignored-url patterns,
    /// and the visited set (claiming the URL). Only then is the page
    /// fetched and its word counts merged into the run totals.
    pub async fn visit(&self, url: &str, depth: u32) -> TaskOutcome {
        if depth == 0 {
            return TaskOutcome::Skipped(SkipReason::DepthExhausted);
        }

        if self.state.is_expired() {
            tracing::trace!("Deadline passed, skipping {}", url);
            return TaskOutcome::Skipped(SkipReason::DeadlinePassed);
        }

        if self.ignored_urls.matches(url) {
            tracing::debug!("Ignoring {}", url);
            return TaskOutcome::Skipped(SkipReason::Ignored);
        }

        if !self.state.claim(url) {
            return TaskOutcome::Skipped(SkipReason::AlreadyVisited);
        }

        match self.fetcher.fetch(url).await {
            Ok(page) => {
                tracing::debug!(
                    "Visited {} (depth {}): {} distinct words, {} links",
                    url,
                    depth,
                    page.word_counts.len(),
                    page.links.len()
                );
                self.state.merge_counts(&page.word_counts);
                TaskOutcome::Visited { links: page.links }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                TaskOutcome::Failed
            }
        }
    }
}

/// Depth handed to the children of a task at `depth`, if any may be created
pub fn child_depth(depth: u32) -> Option<u32> {
    depth.checked_sub(1).filter(|d| *d > 0)
}
