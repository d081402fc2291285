//! Record types served by the data source

use crate::pagination::Searchable;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Operator role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{}' (expected admin, operator or viewer)", other)),
        }
    }
}

/// A console user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Searchable for User {
    const KEYWORD_FIELDS: &'static [&'static str] = &["id", "name", "email"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            "center_id" => self.center_id.as_deref().map(Cow::Borrowed),
            "active" => Some(Cow::Borrowed(if self.active { "true" } else { "false" })),
            "phone" => self.phone.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// A computing center jobs are dispatched to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Node capacity, unknown for some sites
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Searchable for Center {
    const KEYWORD_FIELDS: &'static [&'static str] = &["id", "name", "location"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "location" => Some(Cow::Borrowed(&self.location)),
            "capacity" => self.capacity.map(|c| Cow::Owned(c.to_string())),
            "contact" => self.contact.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// Lifecycle state of a batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Queued,
        JobStatus::Running,
        JobStatus::Succeeded,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the job can still change state
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown job status '{}'", s))
    }
}

/// A batch job submitted to a center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub center_id: String,
    pub status: JobStatus,
    /// 0 (lowest) to 10 (highest)
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub nodes: Option<u32>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub command: Option<String>,
}

impl Job {
    /// Time between start and finish, or until `now` for a job still running
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        let started = self.started_at?;
        let end = self.finished_at.unwrap_or(now);
        (end - started).to_std().ok()
    }

    /// Time spent waiting in the queue
    pub fn wait_time(&self, now: DateTime<Utc>) -> Option<Duration> {
        let end = self.started_at.unwrap_or(now);
        (end - self.submitted_at).to_std().ok()
    }
}

impl Searchable for Job {
    const KEYWORD_FIELDS: &'static [&'static str] = &["id", "name", "owner_id", "command"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "owner_id" => Some(Cow::Borrowed(&self.owner_id)),
            "center_id" => Some(Cow::Borrowed(&self.center_id)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "priority" => Some(Cow::Owned(self.priority.to_string())),
            "command" => self.command.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// A capability granted to one or more roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Permission {
    pub fn granted_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Job counts for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    pub total: usize,
    pub by_status: BTreeMap<JobStatus, usize>,
}

impl JobStats {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let mut by_status = BTreeMap::new();
        for job in jobs {
            *by_status.entry(job.status).or_insert(0) += 1;
        }
        Self {
            total: jobs.len(),
            by_status,
        }
    }

    pub fn count(&self, status: JobStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Jobs that are queued or running
    pub fn active(&self) -> usize {
        self.count(JobStatus::Queued) + self.count(JobStatus::Running)
    }
}

/// Sources of autocomplete options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Users,
    Centers,
    Jobs,
}
