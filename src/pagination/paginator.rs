//! Client-side pagination over a shared, ordered collection.

use super::{clamp_page, total_pages, PaginationDescriptor, PageRequest};
use std::ops::Range;
use std::sync::Arc;

/// A relative move between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Prev,
    Next,
    Last,
}

/// Windows an in-memory collection into pages.
///
/// The page is kept inside `[1, total_pages]` after every mutation, so callers
/// never observe an out-of-range page. Replacing the source with a different
/// `Arc` or changing the page size starts again from page 1.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    /// Items being paged
    source: Arc<Vec<T>>,

    /// Current page (1-based)
    page: usize,

    /// Items per page
    per_page: usize,

    /// Page size restored when an invalid size is requested
    initial_per_page: usize,
}

impl<T> Paginator<T> {
    /// Create a paginator positioned on the first page
    pub fn new(source: Arc<Vec<T>>, initial_per_page: usize) -> Self {
        let initial_per_page = initial_per_page.max(1);
        Self {
            source,
            page: 1,
            per_page: initial_per_page,
            initial_per_page,
        }
    }

    /// Current page (1-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Total number of items in the source
    pub fn total(&self) -> usize {
        self.source.len()
    }

    /// Number of pages, at least one even for an empty source
    pub fn total_pages(&self) -> usize {
        total_pages(self.total(), self.per_page)
    }

    /// The collection being paged
    pub fn source(&self) -> &Arc<Vec<T>> {
        &self.source
    }

    /// Move to `page`, clamped into the valid range. Returns the resulting page.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.total(), self.per_page);
        self.page
    }

    /// Change the page size; zero falls back to the initial size.
    /// Always returns to page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = if per_page == 0 {
            self.initial_per_page
        } else {
            per_page
        };
        self.page = 1;
    }

    /// Replace the source. A different allocation resets to page 1, the same
    /// one keeps the current page.
    pub fn set_source(&mut self, source: Arc<Vec<T>>) {
        if !Arc::ptr_eq(&self.source, &source) {
            self.source = source;
            self.page = 1;
        }
    }

    /// Apply a `{page, per_page}` request as emitted by a pagination control
    pub fn apply(&mut self, request: PageRequest) {
        if request.per_page != self.per_page {
            self.set_per_page(request.per_page);
        }
        self.set_page(request.page);
    }

    /// Index range of the current page inside the source
    pub fn range(&self) -> Range<usize> {
        let total = self.total();
        let start = (self.page - 1).saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);
        start..end
    }

    /// Items on the current page
    pub fn items(&self) -> &[T] {
        &self.source[self.range()]
    }

    /// Go to the next page; false when already on the last one
    pub fn next_page(&mut self) -> bool {
        let before = self.page;
        self.set_page(self.page + 1) != before
    }

    /// Go to the previous page; false when already on the first one
    pub fn prev_page(&mut self) -> bool {
        let before = self.page;
        self.set_page(self.page.saturating_sub(1)) != before
    }

    /// Go to the first page
    pub fn first_page(&mut self) -> bool {
        let before = self.page;
        self.set_page(1) != before
    }

    /// Go to the last page
    pub fn last_page(&mut self) -> bool {
        let before = self.page;
        self.set_page(self.total_pages()) != before
    }

    /// Apply a relative move; false when the page did not change
    pub fn step(&mut self, step: PageMove) -> bool {
        match step {
            PageMove::First => self.first_page(),
            PageMove::Prev => self.prev_page(),
            PageMove::Next => self.next_page(),
            PageMove::Last => self.last_page(),
        }
    }

    /// The request that reproduces the current window
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    /// Describe the current window in list-API form
    pub fn descriptor(&self, path: &str) -> PaginationDescriptor {
        PaginationDescriptor::new(self.request(), self.total(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Arc<Vec<usize>> {
        Arc::new((1..=n).collect())
    }

    #[test]
    fn test_paginator_creation() {
        let paginator = Paginator::new(numbers(57), 10);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.per_page(), 10);
        assert_eq!(paginator.total(), 57);
        assert_eq!(paginator.total_pages(), 6);
        assert_eq!(paginator.items(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let mut paginator = Paginator::new(numbers(57), 10);
        assert_eq!(paginator.set_page(6), 6);
        assert_eq!(paginator.items(), &[51, 52, 53, 54, 55, 56, 57]);
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let mut paginator = Paginator::new(numbers(57), 10);
        assert_eq!(paginator.set_page(0), 1);
        assert_eq!(paginator.set_page(42), 6);
        assert_eq!(paginator.set_page(usize::MAX), 6);
    }

    #[test]
    fn test_set_per_page_resets_page() {
        let mut paginator = Paginator::new(numbers(57), 10);
        paginator.set_page(4);
        paginator.set_per_page(20);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.total_pages(), 3);

        paginator.set_page(2);
        paginator.set_per_page(20);
        assert_eq!(paginator.page(), 1, "even an unchanged size resets the page");
    }

    #[test]
    fn test_steps_stop_at_the_ends() {
        let mut paginator = Paginator::new(numbers(57), 10);
        assert!(!paginator.step(PageMove::Prev));
        assert!(paginator.step(PageMove::Next));
        assert_eq!(paginator.page(), 2);
        assert!(paginator.step(PageMove::Last));
        assert_eq!(paginator.page(), 6);
        assert!(!paginator.step(PageMove::Next));
        assert!(paginator.step(PageMove::First));
        assert_eq!(paginator.page(), 1);
    }

    #[test]
    fn test_huge_page_size_shows_everything() {
        let mut paginator = Paginator::new(numbers(57), usize::MAX);
        assert_eq!(paginator.total_pages(), 1);
        assert_eq!(paginator.items().len(), 57);
        assert!(!paginator.next_page());

        let descriptor = paginator.descriptor("/api/centers");
        assert_eq!(descriptor.last_page, 1);
        assert_eq!(descriptor.to, 57);
        assert!(descriptor.next_page_url.is_none());
    }

    #[test]
    fn test_zero_per_page_falls_back_to_initial() {
        let mut paginator = Paginator::new(numbers(57), 10);
        paginator.set_per_page(25);
        paginator.set_per_page(0);
        assert_eq!(paginator.per_page(), 10);
    }

    #[test]
    fn test_empty_source() {
        let mut paginator: Paginator<usize> = Paginator::new(Arc::new(Vec::new()), 10);
        assert_eq!(paginator.total(), 0);
        assert_eq!(paginator.total_pages(), 1);
        assert!(paginator.items().is_empty());
        assert_eq!(paginator.set_page(3), 1);
    }

    #[test]
    fn test_new_source_resets_page_but_same_source_does_not() {
        let source = numbers(57);
        let mut paginator = Paginator::new(source.clone(), 10);
        paginator.set_page(3);

        paginator.set_source(source.clone());
        assert_eq!(paginator.page(), 3);

        paginator.set_source(numbers(57));
        assert_eq!(paginator.page(), 1);
    }

    #[test]
    fn test_item_count_property() {
        for len in [0usize, 1, 9, 10, 11, 57, 100] {
            for per_page in [1usize, 3, 10, 25] {
                let mut paginator = Paginator::new(numbers(len), per_page);
                for page in 1..=paginator.total_pages() {
                    paginator.set_page(page);
                    let expected = if len == 0 {
                        0
                    } else {
                        per_page.min(len - (page - 1) * per_page)
                    };
                    assert_eq!(paginator.items().len(), expected, "len={len} per_page={per_page} page={page}");
                }
            }
        }
    }

    #[test]
    fn test_navigation_helpers() {
        let mut paginator = Paginator::new(numbers(25), 10);
        assert!(!paginator.prev_page());
        assert!(paginator.next_page());
        assert!(paginator.next_page());
        assert!(!paginator.next_page());
        assert_eq!(paginator.page(), 3);
        assert!(paginator.first_page());
        assert!(paginator.last_page());
        assert!(!paginator.last_page());
    }

    #[test]
    fn test_apply_request() {
        let mut paginator = Paginator::new(numbers(57), 10);
        paginator.apply(PageRequest::new(4, 10));
        assert_eq!(paginator.page(), 4);

        paginator.apply(PageRequest::new(2, 5));
        assert_eq!(paginator.per_page(), 5);
        assert_eq!(paginator.page(), 2);
    }

    #[test]
    fn test_descriptor_matches_window() {
        let mut paginator = Paginator::new(numbers(57), 10);
        paginator.set_page(6);
        let descriptor = paginator.descriptor("/api/centers");
        assert_eq!(descriptor.from, 51);
        assert_eq!(descriptor.to, 57);
        assert_eq!(descriptor.to - descriptor.from + 1, paginator.items().len());
        assert!(descriptor.next_page_url.is_none());
    }
}
