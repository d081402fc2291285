use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::api::{Center, DataSource, Job, JobStatus, User};
use crate::config::Config;
use crate::pagination::{ListQuery, PageRequest, Paged, Paginator, SearchCondition};
use crate::utils::text::format::format_table;

/// Widest cell printed in text tables
const MAX_CELL_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Users,
    Centers,
    Jobs,
}

/// Print one page of users, centers or jobs
#[derive(Debug, Args)]
pub struct ListCommand {
    /// What to list
    #[arg(value_enum)]
    pub resource: Resource,

    /// Page to print, starting at 1
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(short = 'n', long = "per-page")]
    pub per_page: Option<usize>,

    /// Keyword matched against the searchable fields
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,

    /// Only jobs in this status
    #[arg(long = "status")]
    pub status: Option<JobStatus>,

    /// Print `{items, pagination}` as JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

impl ListCommand {
    pub async fn execute(&self, config: &Config, api: Arc<dyn DataSource>) -> Result<()> {
        let output = self.render(config, api.as_ref()).await?;
        println!("{}", output);
        Ok(())
    }

    /// Fetch the requested page and format it
    pub async fn render(&self, config: &Config, api: &dyn DataSource) -> Result<String> {
        if self.status.is_some() && self.resource != Resource::Jobs {
            return Err(anyhow!("--status only applies to jobs"));
        }

        let query = self.query(config);
        debug!("Listing {:?} with {:?}", self.resource, query);

        match self.resource {
            Resource::Users => {
                let paged = api.list_users(&query).await?;
                self.output(&paged, &["ID", "Name", "Email", "Role", "Center", "Active"], user_row)
            }
            Resource::Centers => {
                // The centers endpoint is not paged, so page on this side
                let centers = query.search.filter(&api.list_centers().await?);
                let mut paginator = Paginator::new(Arc::new(centers), query.per_page());
                paginator.apply(query.request);
                let paged = Paged {
                    items: paginator.items().to_vec(),
                    pagination: paginator.descriptor(&format!("{}/centers", config.api_base_path)),
                };
                self.output(&paged, &["ID", "Name", "Location", "Capacity", "Contact"], center_row)
            }
            Resource::Jobs => {
                let paged = api.list_jobs(&query).await?;
                self.output(
                    &paged,
                    &["ID", "Name", "Status", "Owner", "Center", "Prio", "Submitted"],
                    job_row,
                )
            }
        }
    }

    fn query(&self, config: &Config) -> ListQuery {
        let mut query = ListQuery::new(self.per_page.unwrap_or(config.per_page));
        let mut search = SearchCondition::new();
        if let Some(keyword) = &self.search {
            search = search.with_keyword(keyword.trim());
        }
        if let Some(status) = self.status {
            search = search.with_filter("status", status.as_str());
        }
        query.search = search;
        query.apply(PageRequest::new(self.page, query.per_page()));
        query
    }

    fn output<T: Serialize>(&self, paged: &Paged<T>, headers: &[&str], row: fn(&T) -> Vec<String>) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(paged)?);
        }

        let rows: Vec<Vec<String>> = paged.items.iter().map(row).collect();
        let mut output = format_table(headers, &rows, MAX_CELL_WIDTH);
        output.push_str(&paged.pagination.summary());
        Ok(output)
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.id.clone(),
        user.name.clone(),
        user.email.clone(),
        user.role.to_string(),
        or_dash(user.center_id.clone()),
        if user.active { "yes" } else { "no" }.to_string(),
    ]
}

fn center_row(center: &Center) -> Vec<String> {
    vec![
        center.id.clone(),
        center.name.clone(),
        center.location.clone(),
        or_dash(center.capacity.map(|c| c.to_string())),
        or_dash(center.contact.clone()),
    ]
}

fn job_row(job: &Job) -> Vec<String> {
    vec![
        job.id.clone(),
        job.name.clone(),
        job.status.to_string(),
        job.owner_id.clone(),
        job.center_id.clone(),
        job.priority.to_string(),
        job.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use serde_json::Value;

    fn command(resource: Resource) -> ListCommand {
        ListCommand {
            resource,
            page: 1,
            per_page: None,
            search: None,
            status: None,
            json: false,
        }
    }

    #[tokio::test]
    async fn test_last_page_of_jobs_as_text() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Jobs);
        cmd.page = 6;

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        assert!(output.starts_with("ID"));
        assert!(output.contains("J-0057"));
        assert!(!output.contains("J-0050"));
        assert!(output.ends_with("Showing 51-57 of 57 (page 6/6)"));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_clamped() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Jobs);
        cmd.page = 99;
        cmd.json = true;

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["pagination"]["current_page"], 6);
        assert_eq!(value["items"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_centers_are_paged_locally() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Centers);
        cmd.per_page = Some(3);
        cmd.page = 3;
        cmd.json = true;

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["pagination"]["total"], 7);
        assert_eq!(value["pagination"]["last_page"], 3);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
        assert!(value["pagination"]["next_page_url"].is_null());
    }

    #[tokio::test]
    async fn test_center_search() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Centers);
        cmd.search = Some("berlin".to_string());

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        assert!(output.contains("Berlin Research Cluster"));
        assert!(!output.contains("Lyon"));
        assert!(output.ends_with("Showing 1-1 of 1 (page 1/1)"));
    }

    #[tokio::test]
    async fn test_status_filter() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Jobs);
        cmd.status = Some(JobStatus::Running);
        cmd.per_page = Some(100);
        cmd.json = true;

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        let items = value["items"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|job| job["status"] == "running"));
    }

    #[tokio::test]
    async fn test_status_is_rejected_for_users() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Users);
        cmd.status = Some(JobStatus::Failed);

        let err = cmd.render(&Config::default(), &api).await.unwrap_err();
        assert!(err.to_string().contains("--status"));
    }

    #[tokio::test]
    async fn test_huge_page_size_prints_every_job() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Jobs);
        cmd.per_page = Some(usize::MAX);

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        assert!(output.contains("J-0001"));
        assert!(output.contains("J-0057"));
        assert!(output.ends_with("Showing 1-57 of 57 (page 1/1)"));

        let mut cmd = command(Resource::Centers);
        cmd.per_page = Some(usize::MAX);
        cmd.page = 4;
        let output = cmd.render(&Config::default(), &api).await.unwrap();
        assert!(output.ends_with("Showing 1-7 of 7 (page 1/1)"));
    }

    #[tokio::test]
    async fn test_search_without_matches() {
        let api = MockApi::embedded().unwrap();
        let mut cmd = command(Resource::Users);
        cmd.search = Some("no-such-user-anywhere".to_string());

        let output = cmd.render(&Config::default(), &api).await.unwrap();
        assert!(output.ends_with("No results"));
    }
}
