// src/html.rs
// =============================================================================
// This module pulls the href of every link out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker we do NOT resolve or deduplicate here: the crawler
// needs the raw values, in document order, repeats included, because it
// rewrites the document one occurrence at a time.
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

// Extracts the href value of every <a> element
//
// Parameters:
//   html: the HTML content to parse
//
// Returns: the href values in document order, skipping empty values and
// in-page anchors ("#section")
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='#top'>Top</a><a href='/docs'>Again</a>"
//   result = ["/docs", "/docs"]
pub fn extract_hrefs(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let selector = Selector::parse("a[href]")
        .map_err(|e| anyhow!("Failed to parse <a> selector: {}", e))?;

    let hrefs = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .map(str::to_string)
        .collect();

    Ok(hrefs)
}
