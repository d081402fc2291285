//! Application state store.
//!
//! A single [`Store`] owns every state slice. State only changes through
//! [`Store::dispatch`], which hands each [`Action`] to the slice reducers in
//! the order actions are dispatched. Views read through the selector methods.

mod action;
mod autocomplete;
mod centers;
mod effects;
mod jobs;
mod permissions;
mod ui;
mod users;

pub use action::Action;
pub use autocomplete::AutocompleteState;
pub use centers::CentersState;
pub use effects::*;
pub use jobs::JobsState;
pub use permissions::PermissionsState;
pub use ui::UiState;
pub use users::UsersState;

use crate::api::{Center, Job, JobStats, OptionKind, User};
use crate::navigation::NavigationMemory;
use crate::pagination::{PaginationDescriptor, DEFAULT_PER_PAGE};
use tracing::{debug, trace};

/// Single-writer container for all application state
#[derive(Debug, Clone)]
pub struct Store {
    users: UsersState,
    centers: CentersState,
    jobs: JobsState,
    ui: UiState,
    autocomplete: AutocompleteState,
    permissions: PermissionsState,

    /// Number of dispatched actions that changed something
    revision: u64,
}

impl Store {
    /// Create a store with list views showing `per_page` rows and navigation
    /// memory tracking `tracked_sections`
    pub fn new(per_page: usize, tracked_sections: &[String]) -> Self {
        let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        Self {
            users: UsersState::new(per_page),
            centers: CentersState::new(per_page),
            jobs: JobsState::new(per_page),
            ui: UiState::new(tracked_sections),
            autocomplete: AutocompleteState::new(),
            permissions: PermissionsState::new(),
            revision: 0,
        }
    }

    /// Apply an action. Returns true when any slice changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        trace!(action = action.name(), "Dispatching action");

        let changed = self.reduce(&action);

        // A qualifying navigation produces exactly one memory upsert
        if let Action::Navigated(path) = &action {
            if let Some((section, path)) = self.ui.memory.pending_upsert(path) {
                self.reduce(&Action::PathRemembered { section, path });
            }
        }

        changed
    }

    /// Apply several actions in order
    pub fn dispatch_all<I: IntoIterator<Item = Action>>(&mut self, actions: I) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) || changed)
    }

    fn reduce(&mut self, action: &Action) -> bool {
        let changed = self.users.reduce(action)
            | self.centers.reduce(action)
            | self.jobs.reduce(action)
            | self.ui.reduce(action)
            | self.autocomplete.reduce(action)
            | self.permissions.reduce(action);

        if changed {
            self.revision += 1;
            debug!(action = action.name(), revision = self.revision, "State updated");
        }
        changed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // Slice access

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn centers(&self) -> &CentersState {
        &self.centers
    }

    pub fn jobs(&self) -> &JobsState {
        &self.jobs
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn autocomplete(&self) -> &AutocompleteState {
        &self.autocomplete
    }

    pub fn permissions(&self) -> &PermissionsState {
        &self.permissions
    }

    // Selectors

    /// Users on the current page
    pub fn user_rows(&self) -> &[User] {
        &self.users.page.items
    }

    /// Jobs on the current page
    pub fn job_rows(&self) -> &[Job] {
        &self.jobs.page.items
    }

    /// Centers on the current page
    pub fn center_rows(&self) -> &[Center] {
        self.centers.items()
    }

    /// Pagination descriptor of the centers window
    pub fn centers_pagination(&self, path: &str) -> PaginationDescriptor {
        self.centers.paginator.descriptor(path)
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.selected.as_ref()
    }

    pub fn job_stats(&self) -> Option<&JobStats> {
        self.jobs.stats.as_ref()
    }

    pub fn navigation_memory(&self) -> &NavigationMemory {
        &self.ui.memory
    }

    /// Link target for a menu section: its remembered path or `fallback`
    pub fn menu_target<'a>(&'a self, section: &str, fallback: &'a str) -> &'a str {
        self.ui.memory.resolve(section, fallback)
    }

    pub fn current_path(&self) -> &str {
        &self.ui.current_path
    }

    pub fn status(&self) -> Option<&str> {
        self.ui.status.as_deref()
    }

    /// Whether the active role holds a permission
    pub fn can(&self, code: &str) -> bool {
        self.permissions.can(code)
    }

    pub fn suggestions(&self, kind: OptionKind, input: &str, limit: usize) -> Vec<&str> {
        self.autocomplete.suggest(kind, input, limit)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE, &["/manage".to_string(), "/jobs".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Permission, Role};
    use crate::pagination::{paginate, ListQuery, PageRequest};

    fn center(id: &str, name: &str, location: &str) -> Center {
        Center {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            capacity: None,
            contact: None,
        }
    }

    #[test]
    fn test_navigation_creates_memory_entry_exactly_once() {
        let mut store = Store::default();
        assert!(store.navigation_memory().is_empty());

        assert!(store.dispatch(Action::Navigated("/manage/User".into())));
        assert_eq!(store.navigation_memory().get("/manage"), Some("/manage/User"));
        assert_eq!(store.navigation_memory().revision(), 1);

        assert!(!store.dispatch(Action::Navigated("/manage/User".into())));
        assert_eq!(store.navigation_memory().revision(), 1);
        let entries: Vec<_> = store.navigation_memory().entries().collect();
        assert_eq!(entries, vec![("/manage", "/manage/User")]);
    }

    #[test]
    fn test_repeated_upsert_mutates_once() {
        let mut store = Store::default();
        let upsert = Action::PathRemembered {
            section: "/jobs".into(),
            path: "/jobs/detail/J-0004".into(),
        };
        assert!(store.dispatch(upsert.clone()));
        let revision = store.revision();
        assert!(!store.dispatch(upsert));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.navigation_memory().revision(), 1);
    }

    #[test]
    fn test_menu_target_restores_deep_path() {
        let mut store = Store::default();
        assert_eq!(store.menu_target("/jobs", "/jobs"), "/jobs");

        store.dispatch(Action::Navigated("/jobs/detail/J-0012".into()));
        store.dispatch(Action::Navigated("/dashboard".into()));
        assert_eq!(store.current_path(), "/dashboard");
        assert_eq!(store.menu_target("/jobs", "/jobs"), "/jobs/detail/J-0012");
    }

    #[test]
    fn test_users_loaded_follows_clamped_page() {
        let mut store = Store::default();
        let mut query = ListQuery::new(10);
        query.set_page(9);
        store.dispatch(Action::UsersQueryChanged(query));

        let users: Vec<User> = Vec::new();
        let page = paginate(&users, store.users().query.request, "/api/users");
        store.dispatch(Action::UsersLoaded(page));

        assert_eq!(store.users().query.page(), 1);
        assert!(store.users().loaded);
        assert!(store.user_rows().is_empty());
    }

    #[test]
    fn test_centers_keyword_resets_page() {
        let mut store = Store::new(2, &[]);
        store.dispatch(Action::CentersLoaded(vec![
            center("C-1", "Lyon A", "Lyon"),
            center("C-2", "Lyon B", "Lyon"),
            center("C-3", "Lyon C", "Lyon"),
            center("C-4", "Berlin", "Berlin"),
            center("C-5", "Oslo", "Oslo"),
        ]));
        assert_eq!(store.centers().paginator.total_pages(), 3);

        store.dispatch(Action::CentersPageRequested(PageRequest::new(3, 2)));
        assert_eq!(store.centers().paginator.page(), 3);
        assert_eq!(store.center_rows().len(), 1);

        store.dispatch(Action::CentersKeywordChanged("lyon".into()));
        assert_eq!(store.centers().paginator.page(), 1);
        assert_eq!(store.centers().paginator.total(), 3);
        assert_eq!(store.center_rows().len(), 2);

        let descriptor = store.centers_pagination("/api/centers");
        assert_eq!(descriptor.last_page, 2);
        assert_eq!(store.centers().name_of("C-4"), Some("Berlin"));
    }

    #[test]
    fn test_centers_page_request_is_clamped() {
        let mut store = Store::new(10, &[]);
        store.dispatch(Action::CentersLoaded(vec![center("C-1", "A", "Lyon")]));
        assert!(!store.dispatch(Action::CentersPageRequested(PageRequest::new(5, 10))));
        assert_eq!(store.centers().paginator.page(), 1);
    }

    #[test]
    fn test_permissions_selector() {
        let mut store = Store::default();
        assert!(!store.can("jobs.view"));

        store.dispatch(Action::PermissionsLoaded {
            role: Role::Viewer,
            permissions: vec![
                Permission {
                    code: "jobs.view".into(),
                    description: "Browse jobs".into(),
                    roles: vec![Role::Viewer, Role::Admin],
                },
                Permission {
                    code: "manage.users".into(),
                    description: "Users".into(),
                    roles: vec![Role::Admin],
                },
            ],
        });
        assert!(store.can("jobs.view"));
        assert!(!store.can("manage.users"));
    }

    #[test]
    fn test_suggestions_prefer_prefix_matches() {
        let mut store = Store::default();
        store.dispatch(Action::OptionsLoaded {
            kind: OptionKind::Centers,
            options: vec!["Berlin Research".into(), "Lyon Compute".into(), "Old Lyon".into()],
        });
        assert_eq!(
            store.suggestions(OptionKind::Centers, "ly", 5),
            vec!["Lyon Compute", "Old Lyon"]
        );
        assert_eq!(store.suggestions(OptionKind::Centers, "ly", 1), vec!["Lyon Compute"]);
        assert!(store.suggestions(OptionKind::Users, "ly", 5).is_empty());
        assert!(store.suggestions(OptionKind::Centers, "  ", 5).is_empty());
    }

    #[test]
    fn test_status_and_job_selection() {
        let mut store = Store::default();
        store.dispatch(Action::StatusSet("job 'J-1' not found".into()));
        assert_eq!(store.status(), Some("job 'J-1' not found"));
        assert!(store.dispatch(Action::StatusCleared));
        assert!(!store.dispatch(Action::StatusCleared));
        assert!(!store.dispatch(Action::JobCleared));
    }

    #[test]
    fn test_dispatch_all_applies_in_order() {
        let mut store = Store::default();
        store.dispatch_all([
            Action::Navigated("/manage/User".into()),
            Action::Navigated("/manage/Center".into()),
            Action::Navigated("/jobs".into()),
        ]);
        assert_eq!(store.current_path(), "/jobs");
        assert_eq!(store.navigation_memory().get("/manage"), Some("/manage/Center"));
        assert_eq!(store.navigation_memory().get("/jobs"), Some("/jobs"));
    }
}
