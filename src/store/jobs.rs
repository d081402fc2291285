use super::Action;
use crate::api::{Job, JobStats, API_BASE_PATH};
use crate::pagination::{ListQuery, Paged};

/// Jobs slice: the list view, the detail view and dashboard statistics
#[derive(Debug, Clone)]
pub struct JobsState {
    pub query: ListQuery,
    pub page: Paged<Job>,
    pub loaded: bool,
    pub stats: Option<JobStats>,
    /// Job shown by the detail view
    pub selected: Option<Job>,
}

impl JobsState {
    pub fn new(per_page: usize) -> Self {
        Self {
            query: ListQuery::new(per_page),
            page: Paged::empty(per_page, &format!("{}/jobs", API_BASE_PATH)),
            loaded: false,
            stats: None,
            selected: None,
        }
    }

    /// Active status filter of the list view
    pub fn status_filter(&self) -> Option<&str> {
        self.query.search.filters.get("status").map(String::as_str)
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::JobsQueryChanged(query) => {
                if &self.query == query {
                    return false;
                }
                self.query = query.clone();
                true
            }
            Action::JobsLoaded(page) => {
                self.query.request = page.pagination.request();
                self.page = page.clone();
                self.loaded = true;
                true
            }
            Action::JobStatsLoaded(stats) => {
                self.stats = Some(stats.clone());
                true
            }
            Action::JobSelected(job) => {
                self.selected = Some(job.clone());
                true
            }
            Action::JobCleared => self.selected.take().is_some(),
            _ => false,
        }
    }
}
