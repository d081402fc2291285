pub mod centers;
pub mod dashboard;
pub mod job_detail;
pub mod jobs;
pub mod permissions;
pub mod users;

use crate::api::{ApiResult, DataSource};
use crate::config::Config;
use crate::navigation::Route;
use crate::store::Store;
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::collections::HashMap;

/// Page identifier type, matching [`Route::page_id`]
pub type PageId = &'static str;

/// What a page works with while handling input
pub struct PageContext<'a> {
    pub store: &'a mut Store,
    pub api: &'a dyn DataSource,
    pub config: &'a Config,
}

/// Result of a key press handled by a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The key was used
    Handled,
    /// The page has no use for the key
    Ignored,
    /// Open another location
    Navigate(String),
}

/// Base trait for all pages
#[async_trait]
pub trait Page: Send + Sync {
    /// Get the page ID
    fn id(&self) -> PageId;

    /// Get the page title
    fn title(&self) -> &str;

    /// Handle keyboard input
    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome>;

    /// Render the page
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store);

    /// Called when the router lands on the page
    async fn on_enter(&mut self, _route: &Route, _ctx: &mut PageContext<'_>) -> ApiResult<()> {
        Ok(())
    }

    /// Whether a text input on the page is taking every key
    fn is_editing(&self) -> bool {
        false
    }

    /// Get page-specific help text
    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![]
    }
}

/// Keeps one instance of every page and tracks the active one.
/// Location history lives in the router.
pub struct PageManager {
    /// All registered pages
    pages: HashMap<PageId, Box<dyn Page>>,

    /// Current active page
    current_page: Option<PageId>,
}

impl PageManager {
    /// Create a new page manager
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current_page: None,
        }
    }

    /// Register a page
    pub fn register_page(&mut self, page: Box<dyn Page>) {
        self.pages.insert(page.id(), page);
    }

    /// Make `page_id` the active page. Returns false when no such page is
    /// registered, leaving no page active.
    pub fn activate(&mut self, page_id: PageId) -> bool {
        if self.pages.contains_key(page_id) {
            self.current_page = Some(page_id);
            true
        } else {
            self.current_page = None;
            false
        }
    }

    /// Get the current page
    pub fn current_page(&self) -> Option<&dyn Page> {
        let id = self.current_page?;
        self.pages.get(id).map(|p| p.as_ref())
    }

    /// Get the current page mutably
    pub fn current_page_mut(&mut self) -> Option<&mut (dyn Page + 'static)> {
        let id = self.current_page?;
        self.pages.get_mut(id).map(|p| p.as_mut())
    }

    /// Get the current page ID
    pub fn current_page_id(&self) -> Option<PageId> {
        self.current_page
    }
}

impl Default for PageManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Console pages, one per routed view
pub fn all_pages(config: &Config) -> Vec<Box<dyn Page>> {
    vec![
        Box::new(dashboard::DashboardPage::new()),
        Box::new(users::UsersPage::new(config)),
        Box::new(centers::CentersPage::new(config)),
        Box::new(permissions::PermissionsPage::new()),
        Box::new(jobs::JobsPage::new(config)),
        Box::new(job_detail::JobDetailPage::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_routed_page_is_registered() {
        let mut manager = PageManager::new();
        for page in all_pages(&Config::default()) {
            manager.register_page(page);
        }

        for path in ["/dashboard", "/manage/User", "/manage/Center", "/manage/Permission", "/jobs", "/jobs/detail/J-0001"] {
            let route = Route::parse(path);
            assert!(manager.activate(route.page_id()), "no page for {}", path);
            assert_eq!(manager.current_page_id(), Some(route.page_id()));
        }

        assert!(!manager.activate(Route::parse("/nowhere").page_id()));
        assert!(manager.current_page().is_none());
    }
}
