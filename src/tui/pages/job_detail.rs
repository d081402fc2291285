use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, Job};
use crate::navigation::Route;
use crate::store::{self, Store};
use crate::tui::{styles::Theme, Frame};
use crate::utils::text::format::format_elapsed;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Details of one job, addressed by `/jobs/detail/{id}`
pub struct JobDetailPage {
    title: String,
    /// Id taken from the route
    job_id: Option<String>,
}

impl JobDetailPage {
    pub fn new() -> Self {
        Self {
            title: "Job".to_string(),
            job_id: None,
        }
    }

    fn timestamp(value: Option<DateTime<Utc>>) -> String {
        value.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }

    fn detail_lines(job: &Job, store: &Store, theme: &Theme, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), theme.dim_style()),
                Span::styled(value, theme.text_style()),
            ])
        };

        let center = match store.centers().name_of(&job.center_id) {
            Some(name) => format!("{} ({})", name, job.center_id),
            None => job.center_id.clone(),
        };

        vec![
            field("Name", job.name.clone()),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Status"), theme.dim_style()),
                Span::styled(job.status.to_string(), theme.job_status_style(job.status)),
            ]),
            field("Owner", job.owner_id.clone()),
            field("Center", center),
            field("Priority", job.priority.to_string()),
            field("Nodes", job.nodes.map_or_else(|| "-".to_string(), |n| n.to_string())),
            Line::default(),
            field("Submitted", Self::timestamp(Some(job.submitted_at))),
            field("Started", Self::timestamp(job.started_at)),
            field("Finished", Self::timestamp(job.finished_at)),
            field("Waited", job.wait_time(now).map_or_else(|| "-".to_string(), format_elapsed)),
            field("Elapsed", job.elapsed(now).map_or_else(|| "-".to_string(), format_elapsed)),
            Line::default(),
            field("Command", job.command.clone().unwrap_or_else(|| "-".to_string())),
        ]
    }
}

#[async_trait]
impl Page for JobDetailPage {
    fn id(&self) -> PageId {
        "job_detail"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        let Route::JobDetail(id) = route else {
            return Ok(());
        };
        self.job_id = Some(id.clone());
        store::fetch_job(ctx.store, ctx.api, id).await
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        match event.code {
            KeyCode::Char('r') => {
                if let Some(id) = self.job_id.clone() {
                    store::fetch_job(ctx.store, ctx.api, &id).await?;
                }
                Ok(PageOutcome::Handled)
            }
            KeyCode::Char('l') => Ok(PageOutcome::Navigate(Route::JOBS.to_string())),
            _ => Ok(PageOutcome::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let id = self.job_id.as_deref().unwrap_or("?");
        let job = store.selected_job().filter(|job| job.id == id);

        let lines = match job {
            Some(job) => Self::detail_lines(job, store, theme, Utc::now()),
            None => vec![Line::from(Span::styled(
                format!("Job '{}' is not available", id),
                theme.placeholder_style(),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} {}", self.title, id))
                    .border_style(theme.border_style(true)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![("r", "Reload job"), ("l", "Job list"), ("Esc", "Back")]
    }
}

impl Default for JobDetailPage {
    fn default() -> Self {
        Self::new()
    }
}
