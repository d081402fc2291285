//! List queries: a search condition and a page request kept in step

use super::{PageRequest, SearchCondition, DEFAULT_PER_PAGE};
use serde::{Deserialize, Serialize};

/// What a list view asks the data source for.
///
/// Any change to the search condition or to the page size invalidates the
/// current offset, so those setters go back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: SearchCondition,
    pub request: PageRequest,
}

impl ListQuery {
    pub fn new(per_page: usize) -> Self {
        Self {
            search: SearchCondition::default(),
            request: PageRequest::first(per_page.max(1)),
        }
    }

    pub fn page(&self) -> usize {
        self.request.page
    }

    pub fn per_page(&self) -> usize {
        self.request.per_page
    }

    /// Set the free-text keyword. Returns false when it did not change.
    pub fn set_keyword(&mut self, keyword: &str) -> bool {
        if self.search.keyword == keyword {
            return false;
        }
        self.search.keyword = keyword.to_string();
        self.request.page = 1;
        true
    }

    /// Set or clear (`None`) an exact field filter. Returns false when nothing changed.
    pub fn set_filter(&mut self, field: &str, value: Option<&str>) -> bool {
        let changed = match value {
            Some(value) => self.search.filters.insert(field.to_string(), value.to_string()).as_deref() != Some(value),
            None => self.search.filters.remove(field).is_some(),
        };
        if changed {
            self.request.page = 1;
        }
        changed
    }

    /// Move to a page; the search condition is left as is
    pub fn set_page(&mut self, page: usize) {
        self.request.page = page.max(1);
    }

    /// Change the page size and go back to page 1
    pub fn set_per_page(&mut self, per_page: usize) {
        self.request.per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        self.request.page = 1;
    }

    /// Apply a request coming from a pagination control
    pub fn apply(&mut self, request: PageRequest) {
        if request.per_page != self.request.per_page {
            self.set_per_page(request.per_page);
        }
        self.set_page(request.page);
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}
