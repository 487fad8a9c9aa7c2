// src/fetcher.rs
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;

use crate::config::CrawlerConfig;

/// Boilerplate phrases that disqualify a text block, matched
/// case-insensitively as substrings.
const BOILERPLATE_DENYLIST: &[&str] = &[
    "cookie",
    "datenschutz",
    "agb",
    "bewerben",
    "interessiert",
    "dokumente",
    "ansprechperson",
    "recaptcha",
];

/// Text blocks are collected from these elements, in document order.
const READABLE_BLOCKS: &str = "h1, h2, p, ul";

#[derive(Debug, Clone)]
pub struct JobPosting {
    pub url: String,
    pub extracted_text: String,
}

pub struct JobPostFetcher {
    client: Client,
}

impl JobPostFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a job posting page and reduce it to readable text.
    ///
    /// An empty `extracted_text` means the page loaded but contained no
    /// usable blocks; the caller treats that separately from a fetch error.
    pub async fn fetch(&self, url: &str) -> Result<JobPosting> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        let extracted_text = extract_readable_text(&html);
        info!(
            "Extracted {} characters of job content from {}",
            extracted_text.len(),
            url
        );

        Ok(JobPosting {
            url: url.to_string(),
            extracted_text,
        })
    }
}

/// Select heading, paragraph and list blocks in document order, drop
/// boilerplate, and join the survivors with newlines.
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse(READABLE_BLOCKS).expect("static selector");

    let mut blocks = Vec::new();
    for element in document.select(&selector) {
        let text = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        if text.is_empty() || is_boilerplate(&text) {
            continue;
        }
        blocks.push(text);
    }

    blocks.join("\n")
}

/// Pure predicate over a text block: true when any denylisted phrase
/// occurs in it, ignoring case.
pub fn is_boilerplate(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BOILERPLATE_DENYLIST
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_boilerplate() {
        assert!(is_boilerplate("We use cookies to improve your experience"));
        assert!(is_boilerplate("Hinweise zum Datenschutz"));
        assert!(is_boilerplate("JETZT BEWERBEN"));
        assert!(!is_boilerplate("Senior Engineer, 5 years Python"));
        assert!(!is_boilerplate(""));
    }

    #[test]
    fn test_is_boilerplate_case_insensitive() {
        assert!(is_boilerplate("COOKIE settings"));
        assert!(is_boilerplate("This page is protected by reCAPTCHA"));
    }

    #[test]
    fn test_extract_readable_text_drops_boilerplate() {
        let html = r#"
            <html><body>
              <h1>Software Developer</h1>
              <p>We use cookies on this site.</p>
              <p>You will build backend services.</p>
              <ul><li>Rust</li><li>Python</li></ul>
              <p>Jetzt bewerben!</p>
            </body></html>
        "#;
        let text = extract_readable_text(html);
        assert_eq!(text, "Software Developer\nYou will build backend services.\nRust Python");
    }

    #[test]
    fn test_extract_readable_text_keeps_document_order() {
        let html = "<h1>Title</h1><p>First</p><h2>Section</h2><p>Second</p>";
        assert_eq!(
            extract_readable_text(html),
            "Title\nFirst\nSection\nSecond"
        );
    }

    #[test]
    fn test_extract_readable_text_empty_page() {
        assert_eq!(extract_readable_text("<html><body></body></html>"), "");
        assert_eq!(extract_readable_text(""), "");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n b\t c  "), "a b c");
    }
}
