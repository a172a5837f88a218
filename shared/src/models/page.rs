//! Filtered Pagination Types
//!
//! Generic windowing over any ordered, filtered result set. Pages are
//! 1-based; the window is `skip = (page-1)*size, take = size`. Callers
//! probe for further pages by requesting the next page and observing an
//! empty slice at exhaustion, or by reading `has_more`.

use serde::{Deserialize, Serialize};

/// Search term + page window requested by a caller.
///
/// `search` is a newly submitted term; `filter` is the previously applied
/// term round-tripped by the caller ("current filter").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub search: Option<String>,
    pub filter: Option<String>,
    pub page: Option<u32>,
}

impl PageQuery {
    /// Resolve the effective (term, page) pair.
    ///
    /// A newly submitted search always starts from page 1, even when the
    /// caller asked for a later page. Without a new term the previous
    /// filter is reused and the requested page honored as-is.
    pub fn resolve(&self) -> (Option<String>, u32) {
        match &self.search {
            Some(term) => ((!term.is_empty()).then(|| term.clone()), 1),
            None => {
                let page = self.page.unwrap_or(1).max(1);
                let term = self.filter.clone().filter(|f| !f.is_empty());
                (term, page)
            }
        }
    }
}

/// LIMIT/OFFSET window for a 1-based page.
///
/// The limit includes one extra probe row so the caller can tell whether
/// further pages might exist without issuing a COUNT.
pub fn window(page: u32, page_size: u32) -> (i64, i64) {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
    (i64::from(page_size) + 1, offset)
}

/// One page of an ordered, filtered result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
    /// Effective filter, echoed back so the caller can round-trip it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`window`] (page_size + 1 probe row).
    pub fn from_rows(mut rows: Vec<T>, page: u32, page_size: u32, filter: Option<String>) -> Self {
        let has_more = rows.len() > page_size as usize;
        rows.truncate(page_size as usize);
        Self {
            items: rows,
            page,
            page_size,
            has_more,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_search_resets_page_to_one() {
        let query = PageQuery {
            search: Some("beer".into()),
            filter: Some("wine".into()),
            page: Some(5),
        };
        let (term, page) = query.resolve();
        assert_eq!(term.as_deref(), Some("beer"));
        assert_eq!(page, 1);
    }

    #[test]
    fn cleared_search_starts_from_first_page_unfiltered() {
        let query = PageQuery {
            search: Some(String::new()),
            filter: Some("wine".into()),
            page: Some(3),
        };
        let (term, page) = query.resolve();
        assert_eq!(term, None);
        assert_eq!(page, 1);
    }

    #[test]
    fn current_filter_reused_and_page_honored() {
        let query = PageQuery {
            search: None,
            filter: Some("wine".into()),
            page: Some(4),
        };
        let (term, page) = query.resolve();
        assert_eq!(term.as_deref(), Some("wine"));
        assert_eq!(page, 4);
    }

    #[test]
    fn missing_page_defaults_to_one() {
        let (term, page) = PageQuery::default().resolve();
        assert_eq!(term, None);
        assert_eq!(page, 1);
    }

    #[test]
    fn window_is_one_based_skip_take() {
        assert_eq!(window(1, 10), (11, 0));
        assert_eq!(window(3, 10), (11, 20));
        // Page 0 is clamped to the first window
        assert_eq!(window(0, 10), (11, 0));
    }

    #[test]
    fn from_rows_trims_probe_row_and_sets_has_more() {
        let page = Page::from_rows(vec![1, 2, 3], 1, 2, None);
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_more);

        let last = Page::from_rows(vec![3], 2, 2, None);
        assert_eq!(last.items, vec![3]);
        assert!(!last.has_more);
    }
}
