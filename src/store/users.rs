use super::Action;
use crate::api::{User, API_BASE_PATH};
use crate::pagination::{ListQuery, Paged};

/// Users list slice
#[derive(Debug, Clone)]
pub struct UsersState {
    /// Search condition and page request of the list view
    pub query: ListQuery,

    /// Last page received
    pub page: Paged<User>,

    /// Whether a page has been received at least once
    pub loaded: bool,
}

impl UsersState {
    pub fn new(per_page: usize) -> Self {
        Self {
            query: ListQuery::new(per_page),
            page: Paged::empty(per_page, &format!("{}/users", API_BASE_PATH)),
            loaded: false,
        }
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::UsersQueryChanged(query) => {
                if &self.query == query {
                    return false;
                }
                self.query = query.clone();
                true
            }
            Action::UsersLoaded(page) => {
                // Follow the data source if it had to clamp the requested page
                self.query.request = page.pagination.request();
                self.page = page.clone();
                self.loaded = true;
                true
            }
            _ => false,
        }
    }
}
