//! Pagination types for list responses.
//!
//! List endpoints answer with a page of rows plus server-computed totals. The
//! key holding the rows differs per resource (`results` or `rows`), the shape
//! does not:
//!
//! ```json
//! {
//!   "results": [...],
//!   "total_pages": 12,
//!   "total_count": 117
//! }
//! ```
//!
//! `total_pages` and `total_count` are always taken from the server and never
//! recomputed on the client.

use serde::{Deserialize, Serialize};

/// Number of page buttons in the pagination bar.
pub const WINDOW_WIDTH: u32 = 5;

/// One page of rows as returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "rows", alias = "data")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            total_pages: 0,
            total_count: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Map the rows, keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Clamp a page number to `[1, total_pages]`.
///
/// An empty result set still has page 1.
#[must_use]
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers to show as buttons: a window of [`WINDOW_WIDTH`] centered on
/// `page`, clamped to `[1, total_pages]`.
///
/// ```
/// use edudesk_core::pagination::pagination_window;
///
/// assert_eq!(pagination_window(7, 20), vec![5, 6, 7, 8, 9]);
/// assert_eq!(pagination_window(1, 3), vec![1, 2, 3]);
/// ```
#[must_use]
pub fn pagination_window(page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    let span = WINDOW_WIDTH - 1;
    let start = page.saturating_sub(span / 2).max(1);
    let end = total_pages.min(start.saturating_add(span));
    let start = end.saturating_sub(span).max(1);
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centered() {
        assert_eq!(pagination_window(7, 20), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_window_fewer_pages_than_width() {
        assert_eq!(pagination_window(1, 3), vec![1, 2, 3]);
        assert_eq!(pagination_window(3, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(pagination_window(1, 20), vec![1, 2, 3, 4, 5]);
        assert_eq!(pagination_window(2, 20), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(pagination_window(20, 20), vec![16, 17, 18, 19, 20]);
        assert_eq!(pagination_window(19, 20), vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_window_no_pages() {
        assert!(pagination_window(1, 0).is_empty());
    }

    #[test]
    fn test_window_bounds() {
        for total in 1..=12 {
            for page in 1..=total {
                let window = pagination_window(page, total);
                assert!(window.contains(&page));
                assert!(window.len() <= WINDOW_WIDTH as usize);
                assert!(window.iter().all(|p| (1..=total).contains(p)));
            }
        }
    }

    #[test]
    fn test_window_page_far_past_end() {
        assert_eq!(pagination_window(u32::MAX, 20), vec![16, 17, 18, 19, 20]);
        assert_eq!(pagination_window(u32::MAX - 1, u32::MAX).len(), 5);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn test_page_deserialize_results_key() {
        let json = r#"{"results":[1,2],"total_pages":3,"total_count":25}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results, vec![1, 2]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_page_deserialize_rows_key() {
        let json = r#"{"rows":[7],"total_pages":1,"total_count":1}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results, vec![7]);
    }

    #[test]
    fn test_page_deserialize_missing_totals() {
        let page: Page<u32> = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_page_map_keeps_totals() {
        let page = Page {
            results: vec![1, 2],
            total_pages: 4,
            total_count: 40,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.results, vec![10, 20]);
        assert_eq!(mapped.total_pages, 4);
    }
}
