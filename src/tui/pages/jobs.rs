use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, Job, JobStatus, OptionKind};
use crate::config::Config;
use crate::navigation::Route;
use crate::store::{self, Store};
use crate::tui::components::{PaginationControl, RecordTable, SearchBar, SearchEvent, TableView};
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row},
};

const HEADERS: &[&str] = &["ID", "Name", "Status", "Owner", "Center", "Prio", "Submitted"];

/// Server-paged job list with a status filter
pub struct JobsPage {
    title: String,
    search: SearchBar,
    table: RecordTable,
    pagination: PaginationControl,
}

impl JobsPage {
    pub fn new(config: &Config) -> Self {
        Self {
            title: "Jobs".to_string(),
            search: SearchBar::new(OptionKind::Jobs, "Search by id, name, owner or command"),
            table: RecordTable::new(),
            pagination: PaginationControl::new(&config.page_sizes),
        }
    }

    /// Status filter after `current`: all, then each status in turn
    fn next_status_filter(current: Option<&str>) -> Option<JobStatus> {
        let current = current.and_then(|s| s.parse::<JobStatus>().ok());
        match current {
            None => JobStatus::ALL.first().copied(),
            Some(status) => JobStatus::ALL
                .iter()
                .skip_while(|s| **s != status)
                .nth(1)
                .copied(),
        }
    }

    fn row(job: &Job, store: &Store, theme: &Theme) -> Row<'static> {
        let center = store
            .centers()
            .name_of(&job.center_id)
            .unwrap_or(&job.center_id)
            .to_string();

        Row::new(vec![
            Cell::from(job.id.clone()),
            Cell::from(job.name.clone()),
            Cell::from(job.status.as_str()).style(theme.job_status_style(job.status)),
            Cell::from(job.owner_id.clone()),
            Cell::from(center),
            Cell::from(job.priority.to_string()),
            Cell::from(job.submitted_at.format("%Y-%m-%d %H:%M").to_string()),
        ])
    }
}

#[async_trait]
impl Page for JobsPage {
    fn id(&self) -> PageId {
        "jobs"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, _route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        store::fetch_jobs(ctx.store, ctx.api).await
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        if self.search.is_editing() {
            if let Some(SearchEvent::Changed(keyword)) = self.search.handle_key_event(event, ctx.store) {
                let mut query = ctx.store.jobs().query.clone();
                if query.set_keyword(&keyword) {
                    self.table.reset();
                    store::query_jobs(ctx.store, ctx.api, query).await?;
                }
            }
            return Ok(PageOutcome::Handled);
        }

        let descriptor = &ctx.store.jobs().page.pagination;
        if let Some(request) = self.pagination.handle_key_event(event, descriptor) {
            self.table.reset();
            store::request_jobs_page(ctx.store, ctx.api, request).await?;
            return Ok(PageOutcome::Handled);
        }

        let rows = ctx.store.job_rows();
        if self.table.handle_key_event(event, rows.len()) {
            return Ok(PageOutcome::Handled);
        }

        match event.code {
            KeyCode::Enter => Ok(self
                .table
                .selected(rows.len())
                .map(|i| PageOutcome::Navigate(format!("{}{}", Route::JOB_DETAIL_PREFIX, rows[i].id)))
                .unwrap_or(PageOutcome::Handled)),
            KeyCode::Char('/') => {
                self.search.start_editing(ctx.store);
                Ok(PageOutcome::Handled)
            }
            KeyCode::Char('s') => {
                let mut query = ctx.store.jobs().query.clone();
                let status = Self::next_status_filter(ctx.store.jobs().status_filter());
                if query.set_filter("status", status.as_ref().map(JobStatus::as_str)) {
                    self.table.reset();
                    store::query_jobs(ctx.store, ctx.api, query).await?;
                }
                Ok(PageOutcome::Handled)
            }
            KeyCode::Char('r') => {
                store::fetch_jobs(ctx.store, ctx.api).await?;
                Ok(PageOutcome::Handled)
            }
            _ => Ok(PageOutcome::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        self.search.render(frame, chunks[0], theme);

        let title = match store.jobs().status_filter() {
            Some(status) => format!("{} | status: {}", self.title, status),
            None => self.title.clone(),
        };
        let rows = store
            .job_rows()
            .iter()
            .map(|job| Self::row(job, store, theme))
            .collect();

        self.table.render(
            frame,
            chunks[1],
            theme,
            TableView {
                title,
                headers: HEADERS,
                widths: vec![
                    Constraint::Length(7),
                    Constraint::Percentage(25),
                    Constraint::Length(10),
                    Constraint::Length(6),
                    Constraint::Percentage(20),
                    Constraint::Length(4),
                    Constraint::Length(16),
                ],
                rows,
                focused: !self.search.is_editing(),
            },
        );

        self.pagination.render(frame, chunks[2], &store.jobs().page.pagination, theme);
    }

    fn is_editing(&self) -> bool {
        self.search.is_editing()
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("/", "Search jobs"),
            ("s", "Cycle status filter"),
            ("Enter", "Open job"),
            ("r", "Refresh"),
            ("←/→ Home/End", "Change page"),
            ("+/-", "Change page size"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_cycles_through_every_status() {
        let mut seen = Vec::new();
        let mut current = JobsPage::next_status_filter(None);
        while let Some(status) = current {
            seen.push(status);
            current = JobsPage::next_status_filter(Some(status.as_str()));
        }
        assert_eq!(seen, JobStatus::ALL.to_vec());
    }
}
