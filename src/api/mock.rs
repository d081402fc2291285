//! In-memory data source backed by JSON fixtures

use super::{
    ApiError, ApiResult, Center, DataSource, Job, JobStats, OptionKind, Permission, Role, User,
    API_BASE_PATH,
};
use crate::pagination::{paginate, ListQuery, Paged};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

const USERS_JSON: &str = include_str!("fixtures/users.json");
const CENTERS_JSON: &str = include_str!("fixtures/centers.json");
const JOBS_JSON: &str = include_str!("fixtures/jobs.json");
const PERMISSIONS_JSON: &str = include_str!("fixtures/permissions.json");

/// The raw record collections behind a [`MockApi`]
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub centers: Vec<Center>,
    pub jobs: Vec<Job>,
    pub permissions: Vec<Permission>,
}

impl Fixtures {
    /// Fixtures compiled into the binary
    pub fn embedded() -> ApiResult<Self> {
        Ok(Self {
            users: parse_records("user", USERS_JSON)?,
            centers: parse_records("center", CENTERS_JSON)?,
            jobs: parse_records("job", JOBS_JSON)?,
            permissions: parse_records("permission", PERMISSIONS_JSON)?,
        })
    }

    /// Load `users.json`, `centers.json`, `jobs.json` and `permissions.json`
    /// from `dir`. A file that does not exist falls back to the embedded copy.
    pub async fn load_dir(dir: &Path) -> ApiResult<Self> {
        debug!("Loading fixtures from: {}", dir.display());
        Ok(Self {
            users: load_file(dir, "users.json", "user", USERS_JSON).await?,
            centers: load_file(dir, "centers.json", "center", CENTERS_JSON).await?,
            jobs: load_file(dir, "jobs.json", "job", JOBS_JSON).await?,
            permissions: load_file(dir, "permissions.json", "permission", PERMISSIONS_JSON).await?,
        })
    }

    /// Check record invariants and cross references
    pub fn validate(&self) -> ApiResult<()> {
        unique_ids("center", self.centers.iter().map(|c| c.id.as_str()))?;
        unique_ids("user", self.users.iter().map(|u| u.id.as_str()))?;
        unique_ids("job", self.jobs.iter().map(|j| j.id.as_str()))?;
        unique_ids("permission", self.permissions.iter().map(|p| p.code.as_str()))?;

        let center_ids: HashSet<&str> = self.centers.iter().map(|c| c.id.as_str()).collect();
        let user_ids: HashSet<&str> = self.users.iter().map(|u| u.id.as_str()).collect();

        for (index, center) in self.centers.iter().enumerate() {
            if center.name.trim().is_empty() {
                return Err(invalid("center", index, "name is empty"));
            }
        }

        for (index, user) in self.users.iter().enumerate() {
            if user.name.trim().is_empty() {
                return Err(invalid("user", index, "name is empty"));
            }
            if !user.email.contains('@') {
                return Err(invalid("user", index, format!("malformed email '{}'", user.email)));
            }
            if let Some(center_id) = &user.center_id {
                if !center_ids.contains(center_id.as_str()) {
                    return Err(invalid("user", index, format!("unknown center '{}'", center_id)));
                }
            }
        }

        for (index, job) in self.jobs.iter().enumerate() {
            if job.name.trim().is_empty() {
                return Err(invalid("job", index, "name is empty"));
            }
            if job.priority > 10 {
                return Err(invalid("job", index, format!("priority {} is above 10", job.priority)));
            }
            if !user_ids.contains(job.owner_id.as_str()) {
                return Err(invalid("job", index, format!("unknown owner '{}'", job.owner_id)));
            }
            if !center_ids.contains(job.center_id.as_str()) {
                return Err(invalid("job", index, format!("unknown center '{}'", job.center_id)));
            }
            if let Some(started) = job.started_at {
                if started < job.submitted_at {
                    return Err(invalid("job", index, "started before it was submitted"));
                }
            }
            if let Some(finished) = job.finished_at {
                match job.started_at {
                    Some(started) if finished >= started => {}
                    Some(_) => return Err(invalid("job", index, "finished before it started")),
                    None => return Err(invalid("job", index, "finished without a start time")),
                }
            }
        }

        Ok(())
    }
}

/// Mock implementation of [`DataSource`]
#[derive(Debug, Clone)]
pub struct MockApi {
    fixtures: Fixtures,
    base_path: String,
}

impl MockApi {
    /// Build from fixtures, rejecting anything that fails validation
    pub fn new(fixtures: Fixtures) -> ApiResult<Self> {
        fixtures.validate()?;
        info!(
            users = fixtures.users.len(),
            centers = fixtures.centers.len(),
            jobs = fixtures.jobs.len(),
            "Mock data source ready"
        );
        Ok(Self {
            fixtures,
            base_path: API_BASE_PATH.to_string(),
        })
    }

    /// Mock API over the embedded fixtures
    pub fn embedded() -> ApiResult<Self> {
        Self::new(Fixtures::embedded()?)
    }

    /// Mock API over fixtures from `dir`, or the embedded ones when `dir` is `None`
    pub async fn load(dir: Option<&Path>) -> ApiResult<Self> {
        match dir {
            Some(dir) => Self::new(Fixtures::load_dir(dir).await?),
            None => Self::embedded(),
        }
    }

    /// Prefix for page URLs, e.g. `/api`
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_end_matches('/').to_string();
        self
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    fn path(&self, resource: &str) -> String {
        format!("{}/{}", self.base_path, resource)
    }
}

#[async_trait]
impl DataSource for MockApi {
    async fn list_users(&self, query: &ListQuery) -> ApiResult<Paged<User>> {
        let matched = query.search.filter(&self.fixtures.users);
        debug!(matched = matched.len(), page = query.page(), "Listing users");
        Ok(paginate(&matched, query.request, &self.path("users")))
    }

    async fn list_jobs(&self, query: &ListQuery) -> ApiResult<Paged<Job>> {
        let matched = query.search.filter(&self.fixtures.jobs);
        debug!(matched = matched.len(), page = query.page(), "Listing jobs");
        Ok(paginate(&matched, query.request, &self.path("jobs")))
    }

    async fn get_job(&self, id: &str) -> ApiResult<Job> {
        self.fixtures
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                kind: "job",
                id: id.to_string(),
            })
    }

    async fn list_centers(&self) -> ApiResult<Vec<Center>> {
        Ok(self.fixtures.centers.clone())
    }

    async fn job_stats(&self) -> ApiResult<JobStats> {
        Ok(JobStats::from_jobs(&self.fixtures.jobs))
    }

    async fn autocomplete(&self, kind: OptionKind) -> ApiResult<Vec<String>> {
        let mut options: Vec<String> = match kind {
            OptionKind::Users => self.fixtures.users.iter().map(|u| u.name.clone()).collect(),
            OptionKind::Centers => self.fixtures.centers.iter().map(|c| c.name.clone()).collect(),
            OptionKind::Jobs => self.fixtures.jobs.iter().map(|j| j.name.clone()).collect(),
        };
        options.sort();
        options.dedup();
        Ok(options)
    }

    async fn permissions(&self, role: Role) -> ApiResult<Vec<Permission>> {
        Ok(self
            .fixtures
            .permissions
            .iter()
            .filter(|p| p.granted_to(role))
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn parse_records<T: DeserializeOwned>(kind: &'static str, text: &str) -> ApiResult<Vec<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(text)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| invalid(kind, index, e.to_string()))
        })
        .collect()
}

async fn load_file<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    kind: &'static str,
    fallback: &str,
) -> ApiResult<Vec<T>> {
    let path = dir.join(file);
    if !path.exists() {
        debug!("No {} in fixtures directory, using embedded copy", file);
        return parse_records(kind, fallback);
    }
    let content = tokio::fs::read_to_string(&path).await?;
    parse_records(kind, &content)
}

fn unique_ids<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> ApiResult<()> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(invalid(kind, index, "id is empty"));
        }
        if !seen.insert(id) {
            return Err(invalid(kind, index, format!("duplicate id '{}'", id)));
        }
    }
    Ok(())
}

fn invalid(kind: &'static str, index: usize, reason: impl Into<String>) -> ApiError {
    ApiError::InvalidFixture {
        kind,
        index,
        reason: reason.into(),
    }
}
