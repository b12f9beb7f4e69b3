//! Crawl strategies selectable by name
//!
//! The registry maps a strategy identifier to a constructor. Every
//! constructor returns its crawler already wrapped by the call profiler, so
//! the duration of each `crawl` shows up in the profiling report.

use crate::config::CrawlerSettings;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parallel::ParallelCrawler;
use crate::crawler::sequential::SequentialCrawler;
use crate::crawler::WebCrawler;
use crate::profiler::Profiler;
use crate::WebCrawlerError;
use std::sync::Arc;

/// Builds a profiled crawler from its settings and (profiled) fetcher
pub type CrawlerConstructor = fn(
    CrawlerSettings,
    Arc<dyn PageFetcher>,
    &Profiler,
) -> Result<Box<dyn WebCrawler>, WebCrawlerError>;

struct Entry {
    name: &'static str,
    max_parallelism: fn() -> usize,
    construct: CrawlerConstructor,
}

/// Ordered set of crawl strategies
pub struct CrawlerRegistry {
    entries: Vec<Entry>,
}

impl CrawlerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a strategy; earlier registrations win automatic selection ties
    pub fn register(
        &mut self,
        name: &'static str,
        max_parallelism: fn() -> usize,
        construct: CrawlerConstructor,
    ) -> &mut Self {
        self.entries.push(Entry {
            name,
            max_parallelism,
            construct,
        });
        self
    }

    /// Registered strategy names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Builds the strategy registered under `name` (case-insensitive)
    pub fn build(
        &self,
        name: &str,
        settings: CrawlerSettings,
        fetcher: Arc<dyn PageFetcher>,
        profiler: &Profiler,
    ) -> Result<Box<dyn WebCrawler>, WebCrawlerError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| WebCrawlerError::ImplementationNotFound {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;

        tracing::info!("Using {} crawler", entry.name);
        (entry.construct)(settings, fetcher, profiler)
    }

    /// Builds the override if one is given, otherwise picks a strategy
    ///
    /// Without an override, the first strategy whose maximum parallelism
    /// covers `settings.parallelism` is used; when none does, the last
    /// (most parallel) registration is used and caps the pool itself.
    pub fn select(
        &self,
        implementation_override: Option<&str>,
        settings: CrawlerSettings,
        fetcher: Arc<dyn PageFetcher>,
        profiler: &Profiler,
    ) -> Result<Box<dyn WebCrawler>, WebCrawlerError> {
        if let Some(name) = implementation_override.filter(|n| !n.trim().is_empty()) {
            return self.build(name, settings, fetcher, profiler);
        }

        let name = self
            .entries
            .iter()
            .find(|e| settings.parallelism <= (e.max_parallelism)())
            .or_else(|| self.entries.last())
            .map(|e| e.name)
            .ok_or_else(|| WebCrawlerError::ImplementationNotFound {
                name: format!("<any strategy for parallelism {}>", settings.parallelism),
                available: String::new(),
            })?;

        self.build(name, settings, fetcher, profiler)
    }
}

impl Default for CrawlerRegistry {
    /// `sequential` then `parallel`
    fn default() -> Self {
        let mut registry = Self::new();
        registry
            .register("sequential", || 1, build_sequential)
            .register("parallel", num_cpus::get, build_parallel);
        registry
    }
}

fn build_sequential(
    settings: CrawlerSettings,
    fetcher: Arc<dyn PageFetcher>,
    profiler: &Profiler,
) -> Result<Box<dyn WebCrawler>, WebCrawlerError> {
    let crawler = SequentialCrawler::new(settings, fetcher);
    Ok(Box::new(profiler.wrap::<dyn WebCrawler, _>(crawler)?))
}

fn build_parallel(
    settings: CrawlerSettings,
    fetcher: Arc<dyn PageFetcher>,
    profiler: &Profiler,
) -> Result<Box<dyn WebCrawler>, WebCrawlerError> {
    let crawler = ParallelCrawler::new(settings, fetcher)?;
    Ok(Box::new(profiler.wrap::<dyn WebCrawler, _>(crawler)?))
}
