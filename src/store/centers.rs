use super::Action;
use crate::api::Center;
use crate::pagination::{Paginator, SearchCondition};
use std::sync::Arc;

/// Centers slice. The whole collection is held and paged on the client.
#[derive(Debug, Clone)]
pub struct CentersState {
    /// Every center known to the data source
    pub all: Arc<Vec<Center>>,

    /// Current search keyword
    pub keyword: String,

    /// Window over the centers matching `keyword`
    pub paginator: Paginator<Center>,

    pub loaded: bool,
}

impl CentersState {
    pub fn new(per_page: usize) -> Self {
        let all = Arc::new(Vec::new());
        Self {
            paginator: Paginator::new(all.clone(), per_page),
            all,
            keyword: String::new(),
            loaded: false,
        }
    }

    /// Centers on the current page
    pub fn items(&self) -> &[Center] {
        self.paginator.items()
    }

    /// Look up a center name by id
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.all.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    // A fresh Arc on every refilter sends the paginator back to page 1
    fn refilter(&mut self) {
        let condition = SearchCondition::new().with_keyword(self.keyword.clone());
        let matched = Arc::new(condition.filter(&self.all));
        self.paginator.set_source(matched);
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::CentersLoaded(centers) => {
                self.all = Arc::new(centers.clone());
                self.loaded = true;
                self.refilter();
                true
            }
            Action::CentersKeywordChanged(keyword) => {
                if &self.keyword == keyword {
                    return false;
                }
                self.keyword = keyword.clone();
                self.refilter();
                true
            }
            Action::CentersPageRequested(request) => {
                let before = self.paginator.request();
                self.paginator.apply(*request);
                self.paginator.request() != before
            }
            Action::CentersPageMoved(step) => self.paginator.step(*step),
            _ => false,
        }
    }
}
