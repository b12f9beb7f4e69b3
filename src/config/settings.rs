use crate::config::patterns::PatternList;
use crate::config::types::CrawlerConfig;
use crate::ConfigError;
use std::time::Duration;

/// Runtime parameters of one crawler, fixed at construction
#[derive(Debug, Clone)]
pub struct CrawlerSettings {
    /// Link hops allowed from a seed; a seed is visited at depth `max_depth`
    pub max_depth: u32,

    /// Budget after which no new page fetch may begin
    pub timeout: Duration,

    /// Number of entries kept in the aggregated word counts
    pub popular_word_count: usize,

    /// URLs never visited
    pub ignored_urls: PatternList,

    /// Resolved worker count (always >= 1 for a valid configuration)
    pub parallelism: usize,
}

impl CrawlerSettings {
    /// Builds settings from the file configuration
    ///
    /// Compiles the ignored-url patterns and resolves a negative
    /// `parallelism` to the number of available cores.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            max_depth: config.max_depth,
            timeout: Duration::from_secs(config.timeout_seconds),
            popular_word_count: config.popular_word_count,
            ignored_urls: PatternList::compile(&config.ignored_urls)?,
            parallelism: resolve_parallelism(config.parallelism),
        })
    }
}

/// Negative values select the hardware concurrency
pub fn resolve_parallelism(configured: i32) -> usize {
    if configured < 0 {
        num_cpus::get()
    } else {
        configured as usize
    }
}
