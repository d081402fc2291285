//! Offset-based pagination descriptors in the shape a paginated list API returns.

use super::{clamp_page, total_pages, DEFAULT_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A `{page, per_page}` request, as emitted by a pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// First page with the given size
    pub fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }

    /// Replace a zero page size with `fallback` and a zero page with 1
    pub fn normalized(self, fallback: usize) -> Self {
        Self {
            page: self.page.max(1),
            per_page: if self.per_page == 0 { fallback.max(1) } else { self.per_page },
        }
    }

    /// Parse the `page` and `per_page` query parameters out of a page URL.
    ///
    /// Missing `per_page` falls back to [`DEFAULT_PER_PAGE`]; a URL without a
    /// valid `page` yields `None`.
    pub fn from_url(url: &str) -> Option<Self> {
        let (_, query) = url.split_once('?')?;
        let mut page = None;
        let mut per_page = None;

        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("page", value)) => page = value.parse::<usize>().ok(),
                Some(("per_page", value)) => per_page = value.parse::<usize>().ok(),
                _ => {}
            }
        }

        Some(Self::new(page?, per_page.unwrap_or(DEFAULT_PER_PAGE)).normalized(DEFAULT_PER_PAGE))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// Build the URL that requests `page` of `path`
pub fn page_url(path: &str, page: usize, per_page: usize) -> String {
    format!("{}?page={}&per_page={}", path, page, per_page)
}

/// Describes one window over a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationDescriptor {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    /// 1-based index of the first item on the page, 0 when the collection is empty
    pub from: usize,
    /// 1-based index of the last item on the page
    pub to: usize,
    pub total: usize,
    pub path: String,
    pub first_page_url: String,
    pub last_page_url: String,
    pub prev_page_url: Option<String>,
    pub next_page_url: Option<String>,
}

impl PaginationDescriptor {
    /// Describe the window selected by `request` over `total` items.
    ///
    /// The requested page is clamped into `[1, last_page]` first, so `from`
    /// and `to` always agree with the items actually returned.
    pub fn new(request: PageRequest, total: usize, path: &str) -> Self {
        let request = request.normalized(DEFAULT_PER_PAGE);
        let per_page = request.per_page;
        let last_page = total_pages(total, per_page);
        let page = clamp_page(request.page, total, per_page);
        let offset = (page - 1) * per_page;

        let from = if total == 0 { 0 } else { offset + 1 };
        let to = total.min(page.saturating_mul(per_page));

        let prev_page_url = if page <= 1 {
            None
        } else {
            Some(page_url(path, page - 1, per_page))
        };
        let next_page_url = if offset.saturating_add(per_page) >= total {
            None
        } else {
            Some(page_url(path, page + 1, per_page))
        };

        Self {
            current_page: page,
            last_page,
            per_page,
            from,
            to,
            total,
            path: path.to_string(),
            first_page_url: page_url(path, 1, per_page),
            last_page_url: page_url(path, last_page, per_page),
            prev_page_url,
            next_page_url,
        }
    }

    /// Descriptor for an empty collection
    pub fn empty(per_page: usize, path: &str) -> Self {
        Self::new(PageRequest::first(per_page), 0, path)
    }

    /// Index range of the described window, 0-based
    pub fn window(&self) -> Range<usize> {
        if self.total == 0 {
            0..0
        } else {
            (self.from - 1)..self.to
        }
    }

    /// Number of items on the described page
    pub fn len(&self) -> usize {
        self.window().len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_prev(&self) -> bool {
        self.prev_page_url.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_page_url.is_some()
    }

    /// The request that reproduces this window
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.per_page)
    }

    /// Request for the previous page, if there is one
    pub fn prev_request(&self) -> Option<PageRequest> {
        self.prev_page_url.as_deref().and_then(PageRequest::from_url)
    }

    /// Request for the next page, if there is one
    pub fn next_request(&self) -> Option<PageRequest> {
        self.next_page_url.as_deref().and_then(PageRequest::from_url)
    }

    /// Request for the first page
    pub fn first_request(&self) -> PageRequest {
        PageRequest::first(self.per_page)
    }

    /// Request for the last page
    pub fn last_request(&self) -> PageRequest {
        PageRequest::new(self.last_page, self.per_page)
    }

    /// One-line description such as `Showing 11-20 of 57 (page 2/6)`
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No results".to_string();
        }
        format!(
            "Showing {}-{} of {} (page {}/{})",
            self.from, self.to, self.total, self.current_page, self.last_page
        )
    }
}

/// A page of items together with the descriptor of its window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: PaginationDescriptor,
}

impl<T> Paged<T> {
    pub fn empty(per_page: usize, path: &str) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationDescriptor::empty(per_page, path),
        }
    }
}

/// Cut the page selected by `request` out of `source`
pub fn paginate<T: Clone>(source: &[T], request: PageRequest, path: &str) -> Paged<T> {
    let pagination = PaginationDescriptor::new(request, source.len(), path);
    let items = source[pagination.window()].to_vec();
    Paged { items, pagination }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_huge_page_size() {
        let paged = paginate(&items(57), PageRequest::new(1, usize::MAX), "/api/jobs");
        let p = &paged.pagination;

        assert_eq!(paged.items.len(), 57);
        assert_eq!(p.last_page, 1);
        assert_eq!((p.from, p.to), (1, 57));
        assert!(p.prev_page_url.is_none());
        assert!(p.next_page_url.is_none());

        // Asking for a later page snaps back to the only one
        let p = PaginationDescriptor::new(PageRequest::new(9, usize::MAX), 57, "/x");
        assert_eq!(p.current_page, 1);
        assert_eq!(p.to, 57);

        let url = format!("/api/jobs?page=2&per_page={}", usize::MAX);
        let request = PageRequest::from_url(&url).unwrap();
        assert_eq!(PaginationDescriptor::new(request, 57, "/api/jobs").window(), 0..57);
    }

    #[test]
    fn test_first_page_of_57() {
        let paged = paginate(&items(57), PageRequest::new(1, 10), "/api/jobs");
        let p = &paged.pagination;

        assert_eq!(paged.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(p.current_page, 1);
        assert_eq!(p.last_page, 6);
        assert_eq!(p.from, 1);
        assert_eq!(p.to, 10);
        assert!(p.prev_page_url.is_none());
        assert_eq!(p.next_page_url.as_deref(), Some("/api/jobs?page=2&per_page=10"));
        assert_eq!(p.last_page_url, "/api/jobs?page=6&per_page=10");
    }

    #[test]
    fn test_last_page_of_57() {
        let paged = paginate(&items(57), PageRequest::new(6, 10), "/api/jobs");
        let p = &paged.pagination;

        assert_eq!(paged.items, (51..=57).collect::<Vec<_>>());
        assert_eq!(p.from, 51);
        assert_eq!(p.to, 57);
        assert!(p.next_page_url.is_none());
        assert_eq!(p.prev_page_url.as_deref(), Some("/api/jobs?page=5&per_page=10"));
        assert_eq!(p.summary(), "Showing 51-57 of 57 (page 6/6)");
    }

    #[test]
    fn test_empty_collection() {
        let paged = paginate::<usize>(&[], PageRequest::new(1, 10), "/api/users");
        let p = &paged.pagination;

        assert!(paged.items.is_empty());
        assert_eq!(p.from, 0);
        assert_eq!(p.to, 0);
        assert_eq!(p.last_page, 1);
        assert!(p.prev_page_url.is_none());
        assert!(p.next_page_url.is_none());
        assert!(p.is_empty());
        assert_eq!(p.summary(), "No results");
    }

    #[test]
    fn test_from_is_zero_only_for_empty_and_window_matches_items() {
        for total in 0..=35usize {
            for per_page in [1usize, 4, 10] {
                let last = total_pages(total, per_page);
                for page in 1..=last {
                    let paged = paginate(&items(total), PageRequest::new(page, per_page), "/x");
                    let p = &paged.pagination;
                    assert_eq!(p.from == 0, total == 0);
                    if total > 0 {
                        assert_eq!(p.to - p.from + 1, paged.items.len());
                    }
                    assert_eq!(p.len(), paged.items.len());
                }
            }
        }
    }

    #[test]
    fn test_exact_multiple_has_no_next_page() {
        let p = PaginationDescriptor::new(PageRequest::new(2, 10), 20, "/x");
        assert!(p.next_page_url.is_none());
        assert_eq!(p.to, 20);
    }

    #[test]
    fn test_out_of_range_request_is_clamped() {
        let p = PaginationDescriptor::new(PageRequest::new(9, 10), 57, "/x");
        assert_eq!(p.current_page, 6);
        assert_eq!(p.from, 51);

        let p = PaginationDescriptor::new(PageRequest::new(0, 0), 57, "/x");
        assert_eq!(p.current_page, 1);
        assert_eq!(p.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_urls_round_trip_into_requests() {
        let p = PaginationDescriptor::new(PageRequest::new(3, 5), 57, "/api/users");
        assert_eq!(p.next_request(), Some(PageRequest::new(4, 5)));
        assert_eq!(p.prev_request(), Some(PageRequest::new(2, 5)));
        assert_eq!(p.last_request(), PageRequest::new(12, 5));
    }

    #[test]
    fn test_request_from_url() {
        assert_eq!(
            PageRequest::from_url("/api/users?per_page=20&page=3"),
            Some(PageRequest::new(3, 20))
        );
        assert_eq!(
            PageRequest::from_url("/api/users?page=2"),
            Some(PageRequest::new(2, DEFAULT_PER_PAGE))
        );
        assert_eq!(PageRequest::from_url("/api/users"), None);
        assert_eq!(PageRequest::from_url("/api/users?page=abc"), None);
    }

    #[test]
    fn test_descriptor_serializes_with_snake_case_fields() {
        let p = PaginationDescriptor::new(PageRequest::new(1, 10), 3, "/api/centers");
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["current_page"], 1);
        assert_eq!(value["last_page"], 1);
        assert_eq!(value["next_page_url"], serde_json::Value::Null);
        assert_eq!(value["first_page_url"], "/api/centers?page=1&per_page=10");
    }
}
