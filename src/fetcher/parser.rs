//! HTML extraction of article links and category labels
//!
//! Extraction follows Wikipedia's page structure: article links are
//! restricted to the main content div so navigation chrome and footers do
//! not leak into the graph, and categories come from the category bar at
//! the bottom of the page.

use crate::fetcher::PageData;
use crate::page::PageId;
use scraper::{Html, Selector};

/// Extracts links and categories from a Wikipedia article body
///
/// Link rules:
/// - only anchors inside `div#mw-content-text`
/// - href must start with `/wiki/`
/// - hrefs containing `:` (File:, Category:, Help:, ...) or `#` (section
///   anchors) are skipped
///
/// Category labels come from `div#mw-normal-catlinks`, skipping the leading
/// "Categories" label link.
pub fn extract_page_data(html: &str) -> PageData {
    let document = Html::parse_document(html);

    // Selectors are compile-time constants in practice; a parse failure
    // here would mean a typo in this file, so degrade to empty instead of
    // propagating.
    let mut data = PageData::empty();

    if let Ok(content_anchors) = Selector::parse("div#mw-content-text a[href]") {
        for anchor in document.select(&content_anchors) {
            let href = match anchor.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            if let Some(page) = article_href_to_page(href) {
                data.links.insert(page);
            }
        }
    }

    if let Ok(catlinks) = Selector::parse("div#mw-normal-catlinks a") {
        for (index, anchor) in document.select(&catlinks).enumerate() {
            // First anchor is the "Categories" label itself
            if index == 0 {
                continue;
            }
            let label: String = anchor.text().collect();
            let label = label.trim();
            if !label.is_empty() {
                data.categories.insert(label.to_string());
            }
        }
    }

    data
}

/// Converts an in-article href to a page identifier, if it names an article
fn article_href_to_page(href: &str) -> Option<PageId> {
    let rest = href.strip_prefix("/wiki/")?;

    if rest.is_empty() || rest.contains(':') || rest.contains('#') {
        return None;
    }

    PageId::parse(rest).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        <html><body>
        <div id="mw-content-text">
            <p><a href="/wiki/Garbage_collection">gc</a>
               <a href="/wiki/Type_system">types</a>
               <a href="/wiki/File:Logo.png">file</a>
               <a href="/wiki/Help:Contents">help</a>
               <a href="/wiki/Type_system#Static">anchor</a>
               <a href="https://example.com/external">ext</a>
               <a href="/wiki/Garbage_collection">gc again</a></p>
        </div>
        <div id="mw-normal-catlinks">
            <a href="/wiki/Help:Category">Categories</a>:
            <ul><li><a href="/wiki/Category:Programming">Programming languages</a></li>
                <li><a href="/wiki/Category:1995">1995 software</a></li></ul>
        </div>
        <div id="footer"><a href="/wiki/Privacy_policy">privacy</a></div>
        </body></html>
    "##;

    #[test]
    fn test_links_limited_to_content_div() {
        let data = extract_page_data(SAMPLE);
        assert!(!data.links.contains(&PageId::parse("Privacy_policy").unwrap()));
    }

    #[test]
    fn test_namespace_and_anchor_links_skipped() {
        let data = extract_page_data(SAMPLE);
        let links: Vec<&str> = data.links.iter().map(|p| p.as_str()).collect();
        assert_eq!(links, vec!["Garbage_collection", "Type_system"]);
    }

    #[test]
    fn test_duplicate_links_collapse_to_set() {
        let data = extract_page_data(SAMPLE);
        assert_eq!(
            data.links
                .iter()
                .filter(|p| p.as_str() == "Garbage_collection")
                .count(),
            1
        );
    }

    #[test]
    fn test_categories_skip_leading_label() {
        let data = extract_page_data(SAMPLE);
        let cats: Vec<&str> = data.categories.iter().map(String::as_str).collect();
        assert_eq!(cats, vec!["1995 software", "Programming languages"]);
    }

    #[test]
    fn test_missing_content_div_yields_empty() {
        let data = extract_page_data("<html><body><p>nothing here</p></body></html>");
        assert_eq!(data, PageData::empty());
    }

    #[test]
    fn test_article_href_filter() {
        assert!(article_href_to_page("/wiki/Rust_(programming_language)").is_some());
        assert!(article_href_to_page("/wiki/Category:Software").is_none());
        assert!(article_href_to_page("/wiki/Page#Section").is_none());
        assert!(article_href_to_page("/wiki/").is_none());
        assert!(article_href_to_page("/w/index.php?title=X").is_none());
    }
}
