//! Crawler coordinator - run orchestration
//!
//! Turns a validated [`Config`] into a profiled fetcher and a profiled crawl
//! strategy, runs the crawl over the start pages, and writes the result
//! followed by the profiling report.

use crate::config::{Config, CrawlerSettings, PatternList};
use crate::crawler::fetcher::{build_http_client, HttpPageFetcher, PageFetcher};
use crate::crawler::registry::CrawlerRegistry;
use crate::crawler::WebCrawler;
use crate::output::{write_result, CrawlResult, OutputError};
use crate::profiler::Profiler;
use crate::WebCrawlerError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    profiler: Profiler,
    crawler: Box<dyn WebCrawler>,
}

impl Coordinator {
    /// Creates a coordinator that fetches pages over HTTP(S) and from disk
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Strategy selected and ready to run
    /// * `Err(WebCrawlerError)` - Bad patterns, HTTP client setup failure, or
    ///   an unknown implementation override
    pub fn new(config: Config) -> Result<Self, WebCrawlerError> {
        let profiler = Profiler::new();
        let timeout = Duration::from_secs(config.crawler.timeout_seconds);

        let client = build_http_client(&config.user_agent, timeout)?;
        let ignored_words = PatternList::compile(&config.crawler.ignored_words)?;
        let fetcher =
            profiler.wrap::<dyn PageFetcher, _>(HttpPageFetcher::new(client, ignored_words))?;

        Self::with_fetcher(config, profiler, Arc::new(fetcher))
    }

    /// Creates a coordinator around an existing fetcher
    ///
    /// The fetcher is used as given; wrap it with `profiler` first if its
    /// calls should appear in the report.
    pub fn with_fetcher(
        config: Config,
        profiler: Profiler,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, WebCrawlerError> {
        let settings = CrawlerSettings::from_config(&config.crawler)?;

        tracing::info!(
            "Max depth {}, timeout {}s, parallelism {}, {} ignored URL pattern(s)",
            settings.max_depth,
            settings.timeout.as_secs(),
            settings.parallelism,
            settings.ignored_urls.len()
        );

        let crawler = CrawlerRegistry::default().select(
            config.crawler.implementation_override.as_deref(),
            settings,
            fetcher,
            &profiler,
        )?;

        Ok(Self {
            config,
            profiler,
            crawler,
        })
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    /// Crawls the start pages, then writes the result and the profile
    pub async fn run(&self) -> Result<CrawlResult, WebCrawlerError> {
        let seeds = &self.config.crawler.start_pages;
        tracing::info!("Starting crawl from {} seed page(s)", seeds.len());

        let start_time = tokio::time::Instant::now();
        let result = self.crawler.crawl(seeds).await;

        tracing::info!(
            "Crawl finished in {:.2}s: {} URLs visited, {} popular words",
            start_time.elapsed().as_secs_f64(),
            result.urls_visited,
            result.word_counts.len()
        );

        write_result(&result, self.config.output.result_path.as_deref().map(Path::new))?;
        self.write_profile()?;

        Ok(result)
    }

    fn write_profile(&self) -> Result<(), OutputError> {
        match self.config.output.profile_output_path.as_deref() {
            Some(path) => {
                self.profiler.append_to_file(Path::new(path))?;
                tracing::info!("Profiling report appended to {}", path);
            }
            None => self.profiler.write_data(&mut std::io::stdout().lock())?,
        }
        Ok(())
    }
}
