//! Page-numbered listing with optional keyword filtering.

use serde::Serialize;

/// Number of blogs returned per page.
pub const PAGE_SIZE: u64 = 10;

/// A request for one page of blogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
    /// Case-insensitive substring matched against title or content.
    pub keyword: Option<String>,
}

impl BlogQuery {
    /// Build a query, clamping the page to at least 1 and dropping blank keywords.
    pub fn new(page: u64, keyword: Option<String>) -> Self {
        Self {
            page: page.max(1),
            page_size: PAGE_SIZE,
            keyword: keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        }
    }

    /// Number of matching items preceding this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    pub fn matches(&self, title: &str, content: &str) -> bool {
        match &self.keyword {
            None => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                title.to_lowercase().contains(&needle) || content.to_lowercase().contains(&needle)
            }
        }
    }
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self::new(1, None)
    }
}

/// One page of results plus the page count over all matches.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub pages: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &BlogQuery, total: u64) -> Self {
        Self {
            items,
            page: query.page,
            pages: page_count(total, query.page_size),
            total,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            pages: self.pages,
            total: self.total,
        }
    }
}

/// `ceil(total / page_size)`, zero when nothing matches.
pub fn page_count(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn test_query_clamps_page_and_blank_keyword() {
        let query = BlogQuery::new(0, Some("   ".into()));
        assert_eq!(query.page, 1);
        assert_eq!(query.keyword, None);
        assert_eq!(query.offset(), 0);

        assert_eq!(BlogQuery::new(3, None).offset(), 20);
    }

    #[test]
    fn test_keyword_matches_case_insensitively() {
        let title = "The Art of Minimalism";
        for keyword in ["art", "ART", "minim"] {
            let query = BlogQuery::new(1, Some(keyword.into()));
            assert!(query.matches(title, ""), "keyword {keyword} should match");
        }

        let query = BlogQuery::new(1, Some("typography".into()));
        assert!(!query.matches(title, "Less is more"));
        assert!(query.matches("Fonts", "A guide to classic TYPOGRAPHY"));
    }

    #[test]
    fn test_page_reports_total_pages() {
        let query = BlogQuery::new(2, None);
        let page = Page::new(vec![1, 2, 3], &query, 13);
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 2);
        assert_eq!(page.map(|n| n * 2).items, vec![2, 4, 6]);
    }
}
