//! Call profiler wrapped around the crate's own capabilities

use crate::support::{disjoint_vocabulary_ring, seeds, settings, Graph};
use std::sync::Arc;
use std::time::Duration;
use web_word_crawler::crawler::{PageFetcher, ParallelCrawler, SequentialCrawler, WebCrawler};
use web_word_crawler::profiler::{Capability, Operation};
use web_word_crawler::{Profiler, ProfilerError};

#[tokio::test]
async fn test_only_crawl_is_profiled_on_a_crawler() {
    let profiler = Profiler::new();
    let graph = Arc::new(Graph::new().page("https://site.test/", &[("word", 1)], &[]));
    let crawler = profiler
        .wrap::<dyn WebCrawler, _>(SequentialCrawler::new(
            settings(1, Duration::from_secs(5), 1),
            graph,
        ))
        .unwrap();

    let result = crawler.crawl(&seeds(&["https://site.test/"])).await;
    assert_eq!(crawler.max_parallelism(), 1);
    assert_eq!(result.urls_visited, 1);

    let records = profiler.state().snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].0,
        (std::any::type_name::<SequentialCrawler>(), "crawl")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_fetcher_accumulates_across_tasks() {
    let profiler = Profiler::new();
    let fetcher = profiler
        .wrap::<dyn PageFetcher, _>(
            disjoint_vocabulary_ring(40).with_latency(Duration::from_millis(10)),
        )
        .unwrap();
    let fetcher = Arc::new(fetcher);

    let crawler = ParallelCrawler::new(settings(50, Duration::from_secs(30), 4), fetcher.clone())
        .unwrap();
    let result = crawler.crawl(&seeds(&["https://ring.test/0"])).await;

    assert_eq!(result.urls_visited, 40);
    assert_eq!(fetcher.inner().fetched().len(), 40);

    // One record for all 40 calls, holding at least 40 x 10ms
    let records = profiler.state().snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, (std::any::type_name::<Graph>(), "fetch"));
    assert!(records[0].1 >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_report_lists_fetcher_and_crawler_sorted() {
    let profiler = Profiler::new();
    let fetcher = profiler
        .wrap::<dyn PageFetcher, _>(Graph::new().page("https://site.test/", &[], &[]))
        .unwrap();
    let crawler = profiler
        .wrap::<dyn WebCrawler, _>(SequentialCrawler::new(
            settings(1, Duration::from_secs(5), 1),
            Arc::new(fetcher),
        ))
        .unwrap();

    crawler.crawl(&seeds(&["https://site.test/"])).await;

    let report = profiler.report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Run at "));
    assert!(lines[0].ends_with(" GMT"));
    assert!(lines[1].starts_with(&format!("{}#fetch took ", std::any::type_name::<Graph>())));
    assert!(lines[2].starts_with(&format!(
        "{}#crawl took ",
        std::any::type_name::<SequentialCrawler>()
    )));
    assert_eq!(lines[3], "");
}

trait Inventory {
    fn count(&self) -> usize;
}

impl Capability for dyn Inventory {
    const NAME: &'static str = "Inventory";
    const OPERATIONS: &'static [Operation] = &[Operation::unprofiled("count")];
}

struct Shelf;

impl Inventory for Shelf {
    fn count(&self) -> usize {
        3
    }
}

#[test]
fn test_capability_without_profiled_operations_is_rejected() {
    let profiler = Profiler::new();

    let result = profiler.wrap::<dyn Inventory, _>(Shelf);

    assert!(matches!(
        result,
        Err(ProfilerError::NoProfiledOperations {
            capability: "Inventory"
        })
    ));
    assert!(profiler.state().is_empty());
    assert_eq!(Shelf.count(), 3);
}
