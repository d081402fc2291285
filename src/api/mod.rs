//! Data access layer.
//!
//! [`DataSource`] is the boundary the views talk to. [`MockApi`] implements
//! it over validated in-memory fixtures; its futures resolve immediately.

mod mock;
mod records;

pub use mock::*;
pub use records::*;

use crate::pagination::{ListQuery, Paged};
use async_trait::async_trait;
use thiserror::Error;

/// Base path used for page URLs in pagination descriptors
pub const API_BASE_PATH: &str = "/api";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid {kind} fixture at index {index}: {reason}")]
    InvalidFixture {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Asynchronous access to console data
#[async_trait]
pub trait DataSource: Send + Sync {
    /// One page of users matching the query
    async fn list_users(&self, query: &ListQuery) -> ApiResult<Paged<User>>;

    /// One page of jobs matching the query
    async fn list_jobs(&self, query: &ListQuery) -> ApiResult<Paged<Job>>;

    /// A single job by id
    async fn get_job(&self, id: &str) -> ApiResult<Job>;

    /// Every center; centers are paged on the client side
    async fn list_centers(&self) -> ApiResult<Vec<Center>>;

    /// Job counts by status
    async fn job_stats(&self) -> ApiResult<JobStats>;

    /// Option values for search inputs
    async fn autocomplete(&self, kind: OptionKind) -> ApiResult<Vec<String>>;

    /// Permissions granted to a role
    async fn permissions(&self, role: Role) -> ApiResult<Vec<Permission>>;

    /// Name of the data source for logging
    fn name(&self) -> &str;
}
