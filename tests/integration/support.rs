//! In-memory link graphs for driving the crawl strategies

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use web_word_crawler::config::{CrawlerSettings, PatternList};
use web_word_crawler::crawler::{PageContent, PageFetcher};
use web_word_crawler::{FetchError, FetchResult};

/// A site whose pages are declared up front
///
/// Unknown URLs fail with a 404. Every fetch is recorded, and each one can
/// be made to take a fixed amount of (tokio) time.
#[derive(Default)]
pub struct Graph {
    pages: HashMap<String, PageContent>,
    latency: Duration,
    fetched: Mutex<Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            PageContent {
                word_counts: words
                    .iter()
                    .map(|(word, count)| (word.to_string(), *count))
                    .collect(),
                links: links.iter().map(|link| link.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// URLs fetched so far, in fetch order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetched().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl PageFetcher for Graph {
    async fn fetch(&self, url: &str) -> FetchResult<PageContent> {
        self.fetched.lock().unwrap().push(url.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// `count` pages in a ring, each with its own two words and a link to the
/// next two pages
pub fn disjoint_vocabulary_ring(count: usize) -> Graph {
    let url = |i: usize| format!("https://ring.test/{}", i % count);
    let mut graph = Graph::new();
    for i in 0..count {
        let own = format!("page{}word", i);
        let shared = format!("page{}extra", i);
        graph = graph.page(
            &url(i),
            &[(own.as_str(), (i % 7 + 1) as u64), (shared.as_str(), 1)],
            &[url(i + 1).as_str(), url(i + 2).as_str()],
        );
    }
    graph
}

pub fn settings(max_depth: u32, timeout: Duration, parallelism: usize) -> CrawlerSettings {
    CrawlerSettings {
        max_depth,
        timeout,
        popular_word_count: 1000,
        ignored_urls: PatternList::default(),
        parallelism,
    }
}

pub fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|url| url.to_string()).collect()
}
