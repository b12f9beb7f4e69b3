//! Web Word Crawler main entry point
//!
//! This is the command-line interface for the deadline-bounded word crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use web_word_crawler::config::{load_config_with_hash, resolve_parallelism, Config};
use web_word_crawler::crawler::{crawl, CrawlerRegistry};

/// Web Word Crawler: counts the most popular words of a site
///
/// Crawls the configured start pages to a bounded link depth within a
/// wall-clock budget, visiting each page at most once, then prints the most
/// frequent words together with a profile of where the time went.
#[derive(Parser, Debug)]
#[command(name = "web-word-crawler")]
#[command(version)]
#[command(about = "A deadline-bounded word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Crawl strategy to use, overriding the configuration (sequential, parallel)
    #[arg(long, value_name = "NAME")]
    implementation: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(name) = cli.implementation {
        config.crawler.implementation_override = Some(name);
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let result = crawl(config).await.context("crawl failed")?;
    tracing::info!(
        "Crawl completed successfully: {} URLs visited",
        result.urls_visited
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_word_crawler=info,warn"),
            1 => EnvFilter::new("web_word_crawler=debug,info"),
            2 => EnvFilter::new("web_word_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Results go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Web Word Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", crawler.max_depth);
    println!("  Timeout: {}s", crawler.timeout_seconds);
    println!("  Popular word count: {}", crawler.popular_word_count);
    println!(
        "  Parallelism: {} (resolved to {})",
        crawler.parallelism,
        resolve_parallelism(crawler.parallelism)
    );
    println!(
        "  Implementation: {}",
        crawler
            .implementation_override
            .as_deref()
            .unwrap_or("automatic")
    );
    println!(
        "  Available implementations: {}",
        CrawlerRegistry::default().names().join(", ")
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        config
            .output
            .profile_output_path
            .as_deref()
            .unwrap_or("<stdout>")
    );

    println!("\nIgnored URL patterns ({}):", crawler.ignored_urls.len());
    for pattern in &crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", crawler.ignored_words.len());
    for pattern in &crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nStart Pages ({}):", crawler.start_pages.len());
    for seed in &crawler.start_pages {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
}
