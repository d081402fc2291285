//! Path-based routing for the console pages

use std::fmt;

/// A parsed location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Users,
    Centers,
    Permissions,
    Jobs,
    JobDetail(String),
    NotFound(String),
}

impl Route {
    pub const DASHBOARD: &'static str = "/dashboard";
    pub const USERS: &'static str = "/manage/User";
    pub const CENTERS: &'static str = "/manage/Center";
    pub const PERMISSIONS: &'static str = "/manage/Permission";
    pub const JOBS: &'static str = "/jobs";
    pub const JOB_DETAIL_PREFIX: &'static str = "/jobs/detail/";

    /// Parse a location string. Query strings are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or_default();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        match path {
            "" | "/" | Self::DASHBOARD => Route::Dashboard,
            Self::USERS => Route::Users,
            Self::CENTERS => Route::Centers,
            Self::PERMISSIONS => Route::Permissions,
            Self::JOBS => Route::Jobs,
            other => match other.strip_prefix(Self::JOB_DETAIL_PREFIX) {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::JobDetail(id.to_string()),
                _ => Route::NotFound(other.to_string()),
            },
        }
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => Self::DASHBOARD.to_string(),
            Route::Users => Self::USERS.to_string(),
            Route::Centers => Self::CENTERS.to_string(),
            Route::Permissions => Self::PERMISSIONS.to_string(),
            Route::Jobs => Self::JOBS.to_string(),
            Route::JobDetail(id) => format!("{}{}", Self::JOB_DETAIL_PREFIX, id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Key of the page that renders this route
    pub fn page_id(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Users => "users",
            Route::Centers => "centers",
            Route::Permissions => "permissions",
            Route::Jobs => "jobs",
            Route::JobDetail(_) => "job_detail",
            Route::NotFound(_) => "not_found",
        }
    }

    /// Permission code needed to open this route, if any
    pub fn required_permission(&self) -> Option<&'static str> {
        match self {
            Route::Users => Some("manage.users"),
            Route::Centers => Some("manage.centers"),
            Route::Permissions => Some("manage.permissions"),
            Route::Jobs | Route::JobDetail(_) => Some("jobs.view"),
            Route::Dashboard | Route::NotFound(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Tracks the current location and a bounded back-history
#[derive(Debug, Clone)]
pub struct Router {
    /// Current location
    current: String,

    /// Previously visited locations, most recent last
    history: Vec<String>,

    /// Maximum history size
    max_history: usize,
}

impl Router {
    pub fn new(start: &str) -> Self {
        Self {
            current: start.to_string(),
            history: Vec::new(),
            max_history: 32,
        }
    }

    /// Current location string
    pub fn location(&self) -> &str {
        &self.current
    }

    /// Current location, parsed
    pub fn route(&self) -> Route {
        Route::parse(&self.current)
    }

    /// Go to `path`. Returns false when it is already the current location.
    pub fn navigate(&mut self, path: &str) -> bool {
        if self.current == path {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, path.to_string());
        self.add_to_history(previous);
        true
    }

    /// Return to the previous location, if any
    pub fn back(&mut self) -> Option<&str> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    fn add_to_history(&mut self, path: String) {
        // Don't add duplicate consecutive entries
        if self.history.last() != Some(&path) {
            self.history.push(path);
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("/manage/User"), Route::Users);
        assert_eq!(Route::parse("/manage/Center/"), Route::Centers);
        assert_eq!(Route::parse("/manage/Permission?tab=1"), Route::Permissions);
        assert_eq!(Route::parse("/jobs"), Route::Jobs);
        assert_eq!(Route::parse("/jobs/detail/J-0007"), Route::JobDetail("J-0007".into()));
        assert_eq!(Route::parse("/jobs/detail/"), Route::NotFound("/jobs/detail".into()));
        assert_eq!(Route::parse("/nowhere"), Route::NotFound("/nowhere".into()));
    }

    #[test]
    fn test_route_path_round_trip() {
        for route in [
            Route::Dashboard,
            Route::Users,
            Route::Centers,
            Route::Permissions,
            Route::Jobs,
            Route::JobDetail("J-0001".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_navigate_and_back() {
        let mut router = Router::new("/dashboard");
        assert!(!router.navigate("/dashboard"));
        assert!(router.navigate("/manage/User"));
        assert!(router.navigate("/jobs"));
        assert_eq!(router.route(), Route::Jobs);

        assert_eq!(router.back(), Some("/manage/User"));
        assert_eq!(router.back(), Some("/dashboard"));
        assert_eq!(router.back(), None);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut router = Router::new("/jobs");
        for i in 0..100 {
            router.navigate(&format!("/jobs/detail/J-{i:04}"));
        }
        let mut steps = 0;
        while router.back().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 32);
    }
}
