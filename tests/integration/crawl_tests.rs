//! Crawl behavior shared by both strategies, over in-memory link graphs

use crate::support::{disjoint_vocabulary_ring, seeds, settings, Graph};
use std::sync::Arc;
use std::time::Duration;
use web_word_crawler::config::{CrawlerSettings, PatternList};
use web_word_crawler::crawler::{ParallelCrawler, SequentialCrawler, WebCrawler};
use web_word_crawler::CrawlResult;

const A: &str = "https://site.test/a";
const B: &str = "https://site.test/b";
const C: &str = "https://site.test/c";

/// Runs one crawl per strategy, each over its own copy of the graph
async fn crawl_with_each_strategy(
    build_graph: impl Fn() -> Graph,
    settings: CrawlerSettings,
    seed_urls: &[&str],
) -> Vec<(&'static str, Arc<Graph>, CrawlResult)> {
    let mut runs = Vec::new();

    let graph = Arc::new(build_graph());
    let crawler = SequentialCrawler::new(settings.clone(), graph.clone());
    let result = crawler.crawl(&seeds(seed_urls)).await;
    runs.push(("sequential", graph, result));

    let graph = Arc::new(build_graph());
    let crawler = ParallelCrawler::new(settings, graph.clone()).unwrap();
    let result = crawler.crawl(&seeds(seed_urls)).await;
    runs.push(("parallel", graph, result));

    runs
}

fn cycle() -> Graph {
    Graph::new()
        .page(A, &[("alpha", 1)], &[B])
        .page(B, &[("beta", 1)], &[A])
}

#[tokio::test]
async fn test_cycle_visits_each_page_once() {
    let settings = settings(10, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(cycle, settings, &[A]).await {
        assert_eq!(result.urls_visited, 2, "{}", strategy);
        assert_eq!(graph.fetch_count(A), 1, "{}", strategy);
        assert_eq!(graph.fetch_count(B), 1, "{}", strategy);
        assert_eq!(result.count_of("alpha"), Some(1), "{}", strategy);
        assert_eq!(result.count_of("beta"), Some(1), "{}", strategy);
    }
}

#[tokio::test]
async fn test_duplicate_seeds_are_visited_once() {
    let settings = settings(1, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(cycle, settings, &[A, A, A]).await
    {
        assert_eq!(result.urls_visited, 1, "{}", strategy);
        assert_eq!(graph.fetch_count(A), 1, "{}", strategy);
    }
}

#[tokio::test]
async fn test_depth_one_fetches_only_seeds() {
    let settings = settings(1, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(cycle, settings, &[A]).await {
        assert_eq!(result.urls_visited, 1, "{}", strategy);
        assert_eq!(graph.fetched(), vec![A.to_string()], "{}", strategy);
        assert_eq!(result.count_of("beta"), None, "{}", strategy);
    }
}

#[tokio::test]
async fn test_depth_limits_link_hops() {
    let chain = || {
        Graph::new()
            .page(A, &[("alpha", 1)], &[B])
            .page(B, &[("beta", 1)], &[C])
            .page(C, &[("gamma", 1)], &[])
    };
    let settings = settings(2, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(chain, settings, &[A]).await {
        assert_eq!(result.urls_visited, 2, "{}", strategy);
        assert_eq!(graph.fetch_count(C), 0, "{}", strategy);
    }
}

#[tokio::test]
async fn test_zero_depth_visits_nothing() {
    let settings = settings(0, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(cycle, settings, &[A]).await {
        assert_eq!(result, CrawlResult::default(), "{}", strategy);
        assert!(graph.fetched().is_empty(), "{}", strategy);
    }
}

#[tokio::test]
async fn test_zero_timeout_visits_nothing() {
    let settings = settings(5, Duration::ZERO, 4);

    for (strategy, graph, result) in crawl_with_each_strategy(cycle, settings, &[A, B]).await {
        assert_eq!(result.urls_visited, 0, "{}", strategy);
        assert!(result.word_counts.is_empty(), "{}", strategy);
        assert!(graph.fetched().is_empty(), "{}", strategy);
    }
}

#[tokio::test]
async fn test_ignored_seed_is_not_counted() {
    let private = "https://site.test/private/notes";
    let site = || {
        Graph::new()
            .page(A, &[("public", 1)], &[])
            .page(private, &[("secret", 5)], &[])
    };
    let mut settings = settings(3, Duration::from_secs(30), 4);
    settings.ignored_urls = PatternList::compile(&[r"https://site\.test/private/.*"]).unwrap();

    for (strategy, graph, result) in crawl_with_each_strategy(site, settings, &[private, A]).await
    {
        assert_eq!(result.urls_visited, 1, "{}", strategy);
        assert_eq!(graph.fetch_count(private), 0, "{}", strategy);
        assert_eq!(result.count_of("secret"), None, "{}", strategy);
        assert_eq!(result.count_of("public"), Some(1), "{}", strategy);
    }
}

#[tokio::test]
async fn test_ignore_patterns_match_the_whole_url() {
    let mut settings = settings(3, Duration::from_secs(30), 4);
    settings.ignored_urls = PatternList::compile(&["site"]).unwrap();

    for (strategy, _, result) in crawl_with_each_strategy(cycle, settings, &[A]).await {
        assert_eq!(result.urls_visited, 2, "{}", strategy);
    }
}

#[tokio::test]
async fn test_failed_fetch_counts_as_visited() {
    let dead = "https://site.test/dead";
    let site = || Graph::new().page(A, &[("alive", 2)], &[dead, B]).page(B, &[], &[]);
    let settings = settings(3, Duration::from_secs(30), 4);

    for (strategy, graph, result) in crawl_with_each_strategy(site, settings, &[A]).await {
        assert_eq!(result.urls_visited, 3, "{}", strategy);
        assert_eq!(graph.fetch_count(dead), 1, "{}", strategy);
        assert_eq!(result.word_counts, vec![("alive".to_string(), 2)], "{}", strategy);
    }
}

#[tokio::test]
async fn test_counts_are_summed_across_pages() {
    let site = || {
        Graph::new()
            .page(A, &[("shared", 2), ("first", 1)], &[B])
            .page(B, &[("shared", 3), ("second", 1)], &[])
    };
    let mut settings = settings(2, Duration::from_secs(30), 4);
    settings.popular_word_count = 2;

    for (strategy, _, result) in crawl_with_each_strategy(site, settings, &[A]).await {
        assert_eq!(
            result.word_counts,
            vec![("shared".to_string(), 5), ("first".to_string(), 1)],
            "{}",
            strategy
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_merge_matches_sequential() {
    const PAGES: usize = 200;
    let settings = settings(PAGES as u32 + 1, Duration::from_secs(60), 4);

    let runs = crawl_with_each_strategy(
        || disjoint_vocabulary_ring(PAGES),
        settings,
        &["https://ring.test/0"],
    )
    .await;

    let (_, _, sequential) = &runs[0];
    let (_, _, parallel) = &runs[1];

    assert_eq!(sequential.urls_visited, PAGES);
    assert_eq!(sequential.word_counts.len(), 2 * PAGES);
    assert_eq!(parallel, sequential);
    for i in 0..PAGES {
        assert_eq!(
            parallel.count_of(&format!("page{}word", i)),
            Some((i % 7 + 1) as u64)
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_fetch_starts_after_the_deadline() {
    let chain = || {
        let mut graph = Graph::new().with_latency(Duration::from_secs(1));
        for i in 0..10 {
            graph = graph.page(
                &format!("https://chain.test/{}", i),
                &[("link", 1)],
                &[format!("https://chain.test/{}", i + 1).as_str()],
            );
        }
        graph
    };
    let settings = settings(20, Duration::from_secs(3), 2);

    // Fetches begin at t=0s, 1s and 2s; at t=3s the deadline has passed
    for (strategy, graph, result) in
        crawl_with_each_strategy(chain, settings, &["https://chain.test/0"]).await
    {
        assert_eq!(result.urls_visited, 3, "{}", strategy);
        assert_eq!(graph.fetched().len(), 3, "{}", strategy);
        assert_eq!(result.count_of("link"), Some(3), "{}", strategy);
    }
}

#[tokio::test(start_paused = true)]
async fn test_pending_tasks_resolve_after_the_deadline() {
    let children: Vec<String> = (0..50).map(|i| format!("https://fan.test/{}", i)).collect();
    let fan = || {
        let links: Vec<&str> = children.iter().map(String::as_str).collect();
        let mut graph = Graph::new()
            .with_latency(Duration::from_secs(1))
            .page("https://fan.test/", &[], &links);
        for child in &children {
            graph = graph.page(child, &[("child", 1)], &[]);
        }
        graph
    };

    let graph = Arc::new(fan());
    let crawler = ParallelCrawler::new(settings(2, Duration::from_secs(2), 1), graph.clone()).unwrap();
    let result = crawler.crawl(&seeds(&["https://fan.test/"])).await;

    // One worker: the seed runs 0s..1s, the first child 1s..2s, the rest are skipped
    assert_eq!(result.urls_visited, 2);
    assert_eq!(graph.fetched().len(), 2);
}
