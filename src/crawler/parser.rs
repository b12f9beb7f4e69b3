//! HTML parser for extracting words and links
//!
//! This module turns a fetched HTML document into:
//! - Word counts over the visible body text
//! - Links to follow (from `<a>` tags)

use crate::config::PatternList;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Words and outbound links of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Occurrences of each (lower-cased) word in the page body
    pub word_counts: HashMap<String, u64>,

    /// Absolute URLs linked from the page, in document order
    pub links: Vec<String>,
}

/// Elements whose text is not part of the readable page body
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content and extracts body words and links
///
/// # Word Extraction Rules
///
/// - Body text is split on whitespace
/// - Each token loses every character outside `[A-Za-z0-9_]` and is lower-cased
/// - Empty tokens and tokens fully matching an ignored-word pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags, resolved against `base_url`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
/// - Anything that does not resolve to http, https or file
///
/// # Example
///
/// ```
/// use web_word_crawler::config::PatternList;
/// use web_word_crawler::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Rust, rust!</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &PatternList::default());
/// assert_eq!(page.word_counts["rust"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternList) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: count_words(&body_text(&document), ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Collects the readable text of the `<body>` element
fn body_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    let mut text = String::new();
    for node in body.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| NON_TEXT_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        text.push_str(fragment);
        text.push(' ');
    }
    text
}

/// Counts normalized words, skipping ignored ones
pub fn count_words(text: &str, ignored_words: &PatternList) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect::<String>()
            .to_lowercase();

        if word.is_empty() || ignored_words.matches(&word) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
