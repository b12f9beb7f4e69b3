use serde::Deserialize;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// URLs fully matching any of these regexes are never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Words fully matching any of these regexes are not counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Maximum number of link hops, seeds included
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl, also used as the per-page fetch timeout
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of most frequent words kept in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Target worker count; negative means "use hardware concurrency"
    #[serde(default = "default_parallelism")]
    pub parallelism: i32,

    /// Name of the crawl strategy to use instead of automatic selection
    #[serde(rename = "implementation-override", default)]
    pub implementation_override: Option<String>,
}

fn default_parallelism() -> i32 {
    -1
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "WebWordCrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version` or `Name/Version (+url)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File the crawl result JSON is appended to; stdout when absent
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,

    /// File the profiling report is appended to; stdout when absent
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: Option<String>,
}
