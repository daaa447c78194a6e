use scraper::{Html, Selector};
use url::Url;

use crate::word;

/// Pages under this prefix are crawled unless the caller picks another scope.
pub const DEFAULT_SCOPE: &str = "http://cs50tse.cs.dartmouth.edu/";

/// A page to crawl, or one already fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webpage {
    pub url: String,
    pub depth: u32,
    /// None until fetched.
    pub html: Option<String>,
}

impl Webpage {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self { url: url.into(), depth, html: None }
    }

    pub fn with_html(url: impl Into<String>, depth: u32, html: impl Into<String>) -> Self {
        Self { url: url.into(), depth, html: Some(html.into()) }
    }

    pub fn html(&self) -> &str {
        self.html.as_deref().unwrap_or("")
    }

    /// Normalized content words of the page.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        word::words(self.html())
    }

    /// Absolute http(s) targets of every `<a href>` on the page, in
    /// document order, fragments removed. Duplicates are kept.
    pub fn links(&self) -> Vec<String> {
        let Ok(base) = Url::parse(&self.url) else {
            tracing::debug!(url = %self.url, "page url does not parse, no links");
            return Vec::new();
        };
        let sel_a = Selector::parse("a[href]").expect("valid selector");
        let doc = Html::parse_document(self.html());
        doc.select(&sel_a)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| base.join(href.trim()).ok())
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .map(|mut u| {
                u.set_fragment(None);
                u.to_string()
            })
            .collect()
    }
}

/// Decides which URLs belong to the crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlScope {
    prefix: String,
}

impl Default for UrlScope {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE)
    }
}

impl UrlScope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Canonical form of `raw` with the fragment dropped, or None if it is
    /// not an absolute URL.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let mut u = Url::parse(raw.trim()).ok()?;
        u.set_fragment(None);
        Some(u.to_string())
    }

    pub fn is_internal(&self, url: &str) -> bool {
        self.normalize(url).is_some_and(|u| u.starts_with(&self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<html><body>
        <a href="B.html">B</a>
        <a href="/letters/C.html#top">C</a>
        <a href="https://en.wikipedia.org/wiki/Algorithm">wiki</a>
        <a href="mailto:someone@example.com">mail</a>
        <a>no href</a>
    </body></html>"##;

    #[test]
    fn extracts_absolute_links() {
        let page = Webpage::with_html("http://cs50tse.cs.dartmouth.edu/tse/letters/A.html", 1, PAGE);
        assert_eq!(
            page.links(),
            vec![
                "http://cs50tse.cs.dartmouth.edu/tse/letters/B.html",
                "http://cs50tse.cs.dartmouth.edu/letters/C.html",
                "https://en.wikipedia.org/wiki/Algorithm",
            ]
        );
    }

    #[test]
    fn unfetched_page_has_no_links_or_words() {
        let page = Webpage::new("http://cs50tse.cs.dartmouth.edu/", 0);
        assert!(page.links().is_empty());
        assert_eq!(page.words().count(), 0);
    }

    #[test]
    fn words_skip_markup() {
        let page = Webpage::with_html("http://x/", 0, "<p class=\"lead\">Search ENGINE</p>");
        assert_eq!(page.words().collect::<Vec<_>>(), vec!["search", "engine"]);
    }

    #[test]
    fn scope_classifies_urls() {
        let scope = UrlScope::default();
        assert!(scope.is_internal("http://cs50tse.cs.dartmouth.edu/tse/index.html#x"));
        assert!(scope.is_internal("HTTP://CS50TSE.cs.dartmouth.edu/tse/"));
        assert!(!scope.is_internal("https://cs50tse.cs.dartmouth.edu/tse/"));
        assert!(!scope.is_internal("http://example.com/"));
        assert!(!scope.is_internal("not a url"));
    }

    #[test]
    fn normalize_drops_fragment() {
        let scope = UrlScope::default();
        assert_eq!(
            scope.normalize("http://cs50tse.cs.dartmouth.edu/tse/A.html#frag").as_deref(),
            Some("http://cs50tse.cs.dartmouth.edu/tse/A.html")
        );
    }
}
