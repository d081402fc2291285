//! Actions dispatched to the store

use crate::api::{Center, Job, JobStats, OptionKind, Permission, Role, User};
use crate::pagination::{ListQuery, PageMove, PageRequest, Paged};

/// Everything that can change application state
#[derive(Debug, Clone)]
pub enum Action {
    /// The users list asks for a different search or page
    UsersQueryChanged(ListQuery),

    /// A page of users arrived from the data source
    UsersLoaded(Paged<User>),

    /// The full center list arrived
    CentersLoaded(Vec<Center>),

    /// The centers search keyword changed
    CentersKeywordChanged(String),

    /// The centers pagination control requested a page
    CentersPageRequested(PageRequest),

    /// The centers list moved relative to its current page
    CentersPageMoved(PageMove),

    /// The jobs list asks for a different search or page
    JobsQueryChanged(ListQuery),

    /// A page of jobs arrived
    JobsLoaded(Paged<Job>),

    /// Dashboard statistics arrived
    JobStatsLoaded(JobStats),

    /// A single job was loaded for the detail view
    JobSelected(Job),

    /// The detail view was left or its job could not be loaded
    JobCleared,

    /// The router moved to a new location
    Navigated(String),

    /// Navigation memory upsert for a tracked section
    PathRemembered { section: String, path: String },

    /// Show a message in the status bar
    StatusSet(String),

    /// Clear the status bar message
    StatusCleared,

    /// Autocomplete options arrived
    OptionsLoaded { kind: OptionKind, options: Vec<String> },

    /// Permissions for the active role arrived
    PermissionsLoaded { role: Role, permissions: Vec<Permission> },
}

impl Action {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::UsersQueryChanged(_) => "users_query_changed",
            Action::UsersLoaded(_) => "users_loaded",
            Action::CentersLoaded(_) => "centers_loaded",
            Action::CentersKeywordChanged(_) => "centers_keyword_changed",
            Action::CentersPageRequested(_) => "centers_page_requested",
            Action::CentersPageMoved(_) => "centers_page_moved",
            Action::JobsQueryChanged(_) => "jobs_query_changed",
            Action::JobsLoaded(_) => "jobs_loaded",
            Action::JobStatsLoaded(_) => "job_stats_loaded",
            Action::JobSelected(_) => "job_selected",
            Action::JobCleared => "job_cleared",
            Action::Navigated(_) => "navigated",
            Action::PathRemembered { .. } => "path_remembered",
            Action::StatusSet(_) => "status_set",
            Action::StatusCleared => "status_cleared",
            Action::OptionsLoaded { .. } => "options_loaded",
            Action::PermissionsLoaded { .. } => "permissions_loaded",
        }
    }
}
